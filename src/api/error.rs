// ==========================================
// 智能抽签系统 - API层错误类型
// ==========================================
// 职责: 将引擎错误转换为带稳定错误码的用户可读错误
// ==========================================

use crate::engine::DrawError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("文件导入失败: {0}")]
    LoadError(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("选中省区中只有 {eligible} 人未抽中，无法抽取 {requested} 人")]
    InsufficientPool { eligible: usize, requested: usize },

    #[error("抽签已结束，如需重新开始请重新加载文件")]
    SessionEnded,

    #[error("请先加载 Excel 文件")]
    NoRosterLoaded,

    #[error("还没有进行抽签")]
    NoDrawYet,

    #[error("导出失败: {0}")]
    ExportError(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 稳定错误码（供前端/脚本判断）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::LoadError(_) => "LOAD_ERROR",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InsufficientPool { .. } => "INSUFFICIENT_POOL",
            ApiError::SessionEnded => "SESSION_ENDED",
            ApiError::NoRosterLoaded => "NO_ROSTER",
            ApiError::NoDrawYet => "NO_DRAW_YET",
            ApiError::ExportError(_) => "EXPORT_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

// ==========================================
// 从 DrawError 转换
// ==========================================
impl From<DrawError> for ApiError {
    fn from(err: DrawError) -> Self {
        match err {
            DrawError::Load(e) => ApiError::LoadError(e.to_string()),
            DrawError::Validation(msg) => ApiError::ValidationError(msg),
            DrawError::InsufficientPool {
                eligible,
                requested,
            } => ApiError::InsufficientPool {
                eligible,
                requested,
            },
            DrawError::SessionEnded => ApiError::SessionEnded,
            DrawError::NoRosterLoaded => ApiError::NoRosterLoaded,
            DrawError::NoDrawYet => ApiError::NoDrawYet,
            DrawError::Export(e) => ApiError::ExportError(e.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

/// 错误响应（返回给展示层）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        ErrorResponse {
            code: err.code().to_string(),
            message: err.to_string(),
            details: match err {
                ApiError::InsufficientPool {
                    eligible,
                    requested,
                } => Some(serde_json::json!({
                    "eligible": eligible,
                    "requested": requested,
                })),
                _ => None,
            },
        }
    }
}

/// 将 ApiError 转换为 JSON 字符串
pub fn map_api_error(err: &ApiError) -> String {
    serde_json::to_string(&ErrorResponse::from(err)).unwrap_or_else(|_| err.to_string())
}
