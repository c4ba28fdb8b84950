// ==========================================
// 智能抽签系统 - 抽签引擎错误类型
// ==========================================

use crate::exporter::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

/// 抽签会话错误
#[derive(Error, Debug)]
pub enum DrawError {
    /// 花名册加载失败（文件不可读/缺列/主键缺失）
    #[error("花名册加载失败: {0}")]
    Load(#[from] ImportError),

    /// 参数校验失败（人数非正、未选省区、未知省区）
    #[error("参数校验失败: {0}")]
    Validation(String),

    /// 可抽人数不足
    #[error("可抽人数不足: 选中省区中只有 {eligible} 人未抽中，无法抽取 {requested} 人")]
    InsufficientPool { eligible: usize, requested: usize },

    /// 抽签已结束
    #[error("抽签已结束，如需重新开始请重新加载文件")]
    SessionEnded,

    #[error("尚未加载花名册")]
    NoRosterLoaded,

    #[error("还没有进行抽签")]
    NoDrawYet,

    /// 写文件失败
    #[error("导出失败: {0}")]
    Export(#[from] ExportError),
}

/// Result 类型别名
pub type DrawResult<T> = Result<T, DrawError>;
