// ==========================================
// 智能抽签系统 - 抽签 API
// ==========================================
// 职责: 展示层唯一入口（load / draw / end / export）
// 并发: 管理器置于 Mutex 中，多个调用方的 draw/end/export 串行执行
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::draw::{DrawEvent, ExportSummary, HistoryRow, LoadSummary, SessionSnapshot};
use crate::domain::roster::GroupInfo;
use crate::domain::types::ExportTrigger;
use crate::engine::DrawSessionManager;

/// 抽签 API
pub struct DrawApi {
    manager: Mutex<DrawSessionManager>,
}

impl DrawApi {
    pub fn new(manager: DrawSessionManager) -> Self {
        Self {
            manager: Mutex::new(manager),
        }
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, DrawSessionManager>> {
        self.manager
            .lock()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))
    }

    /// 加载花名册
    pub fn load_roster(&self, file_path: &str) -> ApiResult<LoadSummary> {
        let file_path = file_path.trim();
        if file_path.is_empty() {
            return Err(ApiError::ValidationError("请先选择文件".to_string()));
        }
        Ok(self.lock()?.load(file_path)?)
    }

    /// 省区列表
    pub fn list_groups(&self) -> ApiResult<Vec<GroupInfo>> {
        Ok(self.lock()?.groups()?.to_vec())
    }

    /// 抽签
    ///
    /// # 参数
    /// - groups: 选中的省区名称
    /// - count: 抽取人数（展示层原样传入，在此校验）
    pub fn draw(&self, groups: &[String], count: i64) -> ApiResult<DrawEvent> {
        let count = validate_count(count)?;
        Ok(self.lock()?.draw(groups, count)?)
    }

    /// 对全部省区抽签
    pub fn draw_all(&self, count: i64) -> ApiResult<DrawEvent> {
        let count = validate_count(count)?;
        Ok(self.lock()?.draw_from_all(count)?)
    }

    /// 结束抽签
    pub fn end_draw(&self, destination: Option<&str>) -> ApiResult<ExportSummary> {
        let destination = destination
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Path::new);
        Ok(self.lock()?.end(destination)?)
    }

    /// 导出结果
    pub fn export_result(&self, destination: &str) -> ApiResult<ExportSummary> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(ApiError::ValidationError("请指定导出路径".to_string()));
        }
        Ok(self.lock()?.export(destination)?)
    }

    /// 默认导出路径
    pub fn suggest_export_path(&self, trigger: ExportTrigger) -> ApiResult<PathBuf> {
        Ok(self.lock()?.suggest_export_path(trigger)?)
    }

    pub fn history(&self) -> ApiResult<Vec<HistoryRow>> {
        Ok(self.lock()?.history()?)
    }

    pub fn snapshot(&self) -> ApiResult<SessionSnapshot> {
        Ok(self.lock()?.snapshot()?)
    }
}

fn validate_count(count: i64) -> ApiResult<usize> {
    if count < 1 {
        return Err(ApiError::ValidationError("抽取人数必须大于 0".to_string()));
    }
    usize::try_from(count)
        .map_err(|_| ApiError::ValidationError(format!("抽取人数无效: {}", count)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrawConfig;
    use std::sync::Arc;

    #[test]
    fn test_negative_count_rejected_before_lock() {
        let api = DrawApi::new(DrawSessionManager::with_seed(DrawConfig::default(), 1));
        let err = api.draw(&["A省区".to_string()], -3).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_calls_without_roster() {
        let api = DrawApi::new(DrawSessionManager::with_seed(DrawConfig::default(), 1));
        assert_eq!(api.list_groups().unwrap_err().code(), "NO_ROSTER");
        assert_eq!(api.end_draw(None).unwrap_err().code(), "NO_ROSTER");
        assert_eq!(api.load_roster("  ").unwrap_err().code(), "VALIDATION_ERROR");
        assert_eq!(api.export_result("").unwrap_err().code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_load_missing_file() {
        let api = DrawApi::new(DrawSessionManager::with_seed(DrawConfig::default(), 1));
        let err = api.load_roster("/nonexistent/roster.xlsx").unwrap_err();
        assert_eq!(err.code(), "LOAD_ERROR");
    }

    #[test]
    fn test_api_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DrawApi>();
        let _shared = Arc::new(DrawApi::new(DrawSessionManager::with_seed(
            DrawConfig::default(),
            1,
        )));
    }
}
