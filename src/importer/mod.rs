// ==========================================
// 智能抽签系统 - 导入层
// ==========================================
// 职责: 花名册文件解析、字段映射、省区解析
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod file_parser_trait;
pub mod group_resolver;
pub mod roster_builder;

use crate::config::DrawConfig;
use crate::domain::roster::Roster;
use std::path::Path;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use file_parser_trait::FileParser;
pub use group_resolver::{bind_rules, resolve_group, BoundGroupRule};
pub use roster_builder::build_roster;

/// 加载花名册（解析 + 构建）
pub fn load_roster<P: AsRef<Path>>(file_path: P, config: &DrawConfig) -> ImportResult<Roster> {
    let path = file_path.as_ref();
    tracing::info!("开始加载花名册: {}", path.display());

    let table = UniversalFileParser.parse(path)?;
    build_roster(table, path.to_path_buf(), config)
}
