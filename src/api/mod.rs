// ==========================================
// 智能抽签系统 - API 层
// ==========================================
// 职责: 面向展示层（控制台/GUI/测试）的业务接口
// 约束: 不暴露任何 UI 框架类型
// ==========================================

pub mod draw_api;
pub mod error;

pub use draw_api::DrawApi;
pub use error::{map_api_error, ApiError, ApiResult, ErrorResponse};
