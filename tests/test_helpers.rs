// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 在临时目录中生成花名册文件、构造测试配置
// ==========================================

#![allow(dead_code)]

use csv::Writer;
use roster_draw::config::DrawConfig;
use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::path::{Path, PathBuf};

/// 标准表头: 员工 ID / 姓名 / 三级部门 / 四级部门 / 岗位
pub const HEADERS: &[&str] = &["员工 ID", "姓名", "三级部门", "四级部门", "岗位"];

/// 花名册行
#[derive(Debug, Clone)]
pub struct RosterRow {
    pub id: String,
    pub name: String,
    pub level3: String,
    pub level4: String,
    pub title: String,
}

impl RosterRow {
    pub fn new(id: &str, name: &str, level3: &str, level4: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            level3: level3.to_string(),
            level4: level4.to_string(),
            title: "业务员".to_string(),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [&self.id, &self.name, &self.level3, &self.level4, &self.title]
    }
}

/// 10 人: A省区 6 人 (E001-E006), B省区 4 人 (E007-E010)
pub fn scenario_rows() -> Vec<RosterRow> {
    (1..=10)
        .map(|i| {
            let group = if i <= 6 { "A省区" } else { "B省区" };
            RosterRow::new(
                &format!("E{:03}", i),
                &format!("员工{}", i),
                "销售大区",
                group,
            )
        })
        .collect()
}

/// 写出 CSV 花名册
pub fn write_roster_csv(dir: &Path, file_name: &str, rows: &[RosterRow]) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(file_name);
    let mut writer = Writer::from_path(&path)?;
    writer.write_record(HEADERS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;
    Ok(path)
}

/// 写出 XLSX 花名册（首个工作表）
pub fn write_roster_xlsx(dir: &Path, file_name: &str, rows: &[RosterRow]) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(file_name);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, cell) in row.cells().iter().enumerate() {
            sheet.write_string((i + 1) as u32, col as u16, *cell)?;
        }
    }
    workbook.save(&path)?;
    Ok(path)
}

/// 导出目录指向临时目录的默认配置
pub fn test_config(export_dir: &Path) -> DrawConfig {
    DrawConfig {
        export_dir: export_dir.to_path_buf(),
        ..DrawConfig::default()
    }
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
