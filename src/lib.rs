// ==========================================
// 智能抽签系统 - 核心库
// ==========================================
// 功能: 加载花名册 → 按省区随机抽签 → 累计结果 → 标记导出
// 技术栈: Rust + calamine/csv/rust_xlsxwriter
// 系统定位: 人员抽签工具 (操作员控制抽签节奏)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 抽签会话
pub mod engine;

// 导入层 - 花名册解析
pub mod importer;

// 导出层 - 标记与写出
pub mod exporter;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 展示层入口
pub mod api;

// 应用层 - 控制台
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::ExportTrigger;

// 领域实体
pub use domain::{
    AutoExportStatus, DrawEvent, DrawnPerson, ExportSummary, GroupInfo, HistoryRow, LoadSummary,
    Person, Roster, SessionSnapshot,
};

// 配置
pub use config::DrawConfig;

// 引擎
pub use engine::{DrawError, DrawSessionManager};

// API
pub use api::{ApiError, DrawApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "智能抽签系统";
