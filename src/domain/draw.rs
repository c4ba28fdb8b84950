// ==========================================
// 智能抽签系统 - 抽签事件与导出结果
// ==========================================

use crate::domain::roster::{GroupInfo, Person};
use crate::domain::types::ExportTrigger;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 花名册加载结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub session_id: String,
    pub source_path: PathBuf,
    pub total_people: usize,
    pub groups: Vec<GroupInfo>,
}

/// 被抽中的人员（抽签结果展示用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnPerson {
    pub employee_id: String,
    pub name: String,
    pub row_number: usize,
    pub display_group: Option<String>,
    /// 第几轮抽中
    pub round: u32,
}

impl DrawnPerson {
    pub fn from_person(person: &Person, round: u32) -> Self {
        Self {
            employee_id: person.employee_id.clone(),
            name: person.name.clone(),
            row_number: person.row_number,
            display_group: person.display_group.clone(),
            round,
        }
    }
}

/// 抽签后自动导出的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoExportStatus {
    Written { path: PathBuf },
    Failed { path: PathBuf, reason: String },
}

impl AutoExportStatus {
    pub fn path(&self) -> &PathBuf {
        match self {
            AutoExportStatus::Written { path } | AutoExportStatus::Failed { path, .. } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, AutoExportStatus::Written { .. })
    }
}

/// 一次抽签
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawEvent {
    /// 抽签轮次（从 1 开始）
    pub round: u32,
    /// 选中的省区
    pub groups: Vec<String>,
    /// 请求人数
    pub requested: usize,
    /// 本次抽中人员（抽样顺序）
    pub drawn: Vec<DrawnPerson>,
    /// 本次抽签前的可抽人数
    pub eligible_before: usize,
    /// 累计抽中人数
    pub cumulative_count: usize,
    pub drawn_at: NaiveDateTime,
    pub auto_export: AutoExportStatus,
}

/// 导出结果汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub trigger: ExportTrigger,
    /// 抽签次数
    pub draw_count: u32,
    /// 累计抽中人数
    pub drawn_count: usize,
    /// 导出总行数（= 花名册行数）
    pub total_rows: usize,
    /// 被标记的行数
    pub marked_rows: usize,
}

/// 抽签历史（最新在前）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    /// 序号（从 1 开始）
    pub index: usize,
    pub row_number: usize,
    pub employee_id: String,
    pub name: String,
    pub group: String,
    pub round: u32,
}

/// 会话快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub source_path: PathBuf,
    pub total_people: usize,
    pub group_count: usize,
    pub draw_count: u32,
    pub drawn_count: usize,
    pub ended: bool,
    pub export_path: Option<PathBuf>,
}
