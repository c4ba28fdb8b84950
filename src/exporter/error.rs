// ==========================================
// 智能抽签系统 - 导出模块错误类型
// ==========================================

use thiserror::Error;

/// 导出错误（写文件失败）
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("导出格式不支持: {0}（仅支持 .xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("导出目录不存在: {0}")]
    DirectoryNotFound(String),

    #[error("文件写入失败: {0}")]
    Io(String),

    #[error("CSV 写出失败: {0}")]
    Csv(String),

    #[error("Excel 写出失败: {0}")]
    Xlsx(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Xlsx(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
