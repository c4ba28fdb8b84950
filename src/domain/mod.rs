// ==========================================
// 智能抽签系统 - 领域模型层
// ==========================================
// 职责: 定义花名册、抽签事件、导出结果等领域类型
// 红线: 不含文件读写逻辑,不含抽样逻辑
// ==========================================

pub mod draw;
pub mod roster;
pub mod types;

// 重导出核心类型
pub use draw::{
    AutoExportStatus, DrawEvent, DrawnPerson, ExportSummary, HistoryRow, LoadSummary,
    SessionSnapshot,
};
pub use roster::{Cell, CellValue, GroupInfo, Person, RawRow, RawTable, Roster};
pub use types::ExportTrigger;
