// ==========================================
// 智能抽签系统 - 应用层
// ==========================================
// 职责: 应用状态与控制台前端，连接操作员与抽签 API
// ==========================================

pub mod cli;
pub mod console;
pub mod state;

// 重导出
pub use cli::{parse_cli_args, CliArgs};
pub use console::{parse_command, Command, Console};
pub use state::AppState;
