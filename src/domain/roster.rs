// ==========================================
// 智能抽签系统 - 花名册领域模型
// ==========================================
// 职责: 原始表格、人员、省区分组
// 红线: 加载后只读; 导出只改标记列
// ==========================================

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ==========================================
// Cell - 单元格（原样文本 + 源类型）
// ==========================================

/// 单元格源类型，导出 xlsx 时按类型写回
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Text,
    Number(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
}

/// 单元格
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// 原样文本（不去空白；日期为 YYYY-MM-DD）
    pub text: String,
    pub value: CellValue,
}

impl Cell {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            value: CellValue::Text,
        }
    }

    pub fn number(n: f64) -> Self {
        Self {
            text: n.to_string(),
            value: CellValue::Number(n),
        }
    }

    pub fn boolean(b: bool) -> Self {
        Self {
            text: b.to_string(),
            value: CellValue::Boolean(b),
        }
    }

    pub fn datetime(dt: NaiveDateTime) -> Self {
        let text = if dt.time() == NaiveTime::MIN {
            dt.format("%Y-%m-%d").to_string()
        } else {
            dt.format("%Y-%m-%d %H:%M:%S").to_string()
        };
        Self {
            text,
            value: CellValue::DateTime(dt),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

/// Excel 日期序列号 → 日期时间（1900 日期系统）
pub fn datetime_from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let millis = (serial * 86_400_000.0).round() as i64;
    excel_epoch().checked_add_signed(chrono::Duration::milliseconds(millis))
}

/// 日期时间 → Excel 日期序列号
pub fn excel_serial_from_datetime(dt: &NaiveDateTime) -> f64 {
    (*dt - excel_epoch()).num_milliseconds() as f64 / 86_400_000.0
}

// ==========================================
// RawTable - 原始表格（保留列顺序与所有单元格）
// ==========================================

/// 原始行
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 工作表中的行号（1 起, 表头为第 1 行）
    pub row_number: usize,
    /// 单元格（与表头等宽）
    pub cells: Vec<Cell>,
}

impl RawRow {
    /// 取单元格原样文本，越界返回空串
    pub fn get(&self, col_idx: usize) -> &str {
        self.cells
            .get(col_idx)
            .map(|c| c.text.as_str())
            .unwrap_or("")
    }

    /// 取去空白后的文本（用于 ID/姓名/省区匹配）
    pub fn key(&self, col_idx: usize) -> &str {
        self.get(col_idx).trim()
    }
}

/// 原始表格
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// 表头原样文本
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 追加一行纯文本（补齐/截断到表头宽度）
    pub fn push_row(&mut self, row_number: usize, cells: Vec<String>) {
        self.push_cells(row_number, cells.into_iter().map(Cell::text).collect());
    }

    /// 追加一行（补齐/截断到表头宽度）
    pub fn push_cells(&mut self, row_number: usize, mut cells: Vec<Cell>) {
        cells.resize(self.headers.len(), Cell::default());
        self.rows.push(RawRow { row_number, cells });
    }

    /// 按列名查找列下标（忽略表头首尾空白）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// Person - 人员
// ==========================================

/// 花名册中的一名人员
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// 员工 ID（唯一标识）
    pub employee_id: String,
    /// 姓名
    pub name: String,
    /// 源文件行号
    pub row_number: usize,
    /// 展示用省区（按分组规则优先级解析，加载时缓存）
    pub display_group: Option<String>,
    /// 所属省区（加载时缓存，抽签时不再重新解析）
    pub groups: Vec<String>,
}

impl Person {
    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

// ==========================================
// GroupInfo - 省区
// ==========================================

/// 可选省区
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// 省区名称
    pub name: String,
    /// 来源列（如 四级部门 / 三级部门）
    pub source_field: String,
    /// 人数
    pub member_count: usize,
}

// ==========================================
// Roster - 花名册
// ==========================================

/// 已加载的花名册
///
/// `persons` 只包含员工 ID 非空的行；`table` 保留全部行用于导出
#[derive(Debug, Clone)]
pub struct Roster {
    source_path: PathBuf,
    id_column: usize,
    table: RawTable,
    persons: Vec<Person>,
    groups: Vec<GroupInfo>,
}

impl Roster {
    pub fn new(
        source_path: PathBuf,
        id_column: usize,
        table: RawTable,
        persons: Vec<Person>,
        groups: Vec<GroupInfo>,
    ) -> Self {
        Self {
            source_path,
            id_column,
            table,
            persons,
            groups,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// 员工 ID 列下标
    pub fn id_column(&self) -> usize {
        self.id_column
    }

    pub fn table(&self) -> &RawTable {
        &self.table
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// 省区列表（已按名称排序）
    pub fn groups(&self) -> &[GroupInfo] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&GroupInfo> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}
