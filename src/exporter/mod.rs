// ==========================================
// 智能抽签系统 - 导出层
// ==========================================
// 职责: 标记规则 + 表格写出
// 支持: Excel (.xlsx), CSV
// ==========================================

pub mod error;
pub mod marker;
pub mod writer;

// 重导出核心类型
pub use error::{ExportError, ExportResult};
pub use marker::{mark_roster, MarkedTable};
pub use writer::{CsvWriter, FileWriter, UniversalFileWriter, XlsxWriter};
