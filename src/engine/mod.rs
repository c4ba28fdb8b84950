// ==========================================
// 智能抽签系统 - 引擎层
// ==========================================
// 职责: 抽签会话管理、随机抽样
// 红线: 已抽中人员本会话内不可再次抽中
// ==========================================

pub mod draw_manager;
pub mod error;
pub mod sampler;
pub mod session;

// 重导出核心引擎
pub use draw_manager::DrawSessionManager;
pub use error::{DrawError, DrawResult};
pub use sampler::{Sampler, UniformSampler};
pub use session::DrawSession;
