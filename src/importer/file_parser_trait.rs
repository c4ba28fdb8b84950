// ==========================================
// 智能抽签系统 - 文件解析 Trait
// ==========================================
// 职责: 定义花名册文件解析接口（不包含实现）
// ==========================================

use crate::domain::roster::RawTable;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格（保留列顺序）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 数据行（已跳过完全空白的行）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}
