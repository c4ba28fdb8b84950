// ==========================================
// 智能抽签系统 - 应用状态
// ==========================================
// 职责: 持有配置与 API 实例，供展示层共享
// ==========================================

use std::sync::Arc;

use crate::api::DrawApi;
use crate::config::DrawConfig;
use crate::engine::DrawSessionManager;

/// 应用状态
pub struct AppState {
    /// 生效配置
    pub config: DrawConfig,

    /// 抽签API
    pub draw_api: Arc<DrawApi>,
}

impl AppState {
    /// 创建应用状态
    ///
    /// # 参数
    /// - config: 已校验的配置
    /// - seed: 随机种子（None 时使用系统熵源）
    pub fn new(config: DrawConfig, seed: Option<u64>) -> Self {
        tracing::info!(
            "初始化AppState, 导出目录: {}, 固定种子: {}",
            config.export_dir.display(),
            seed.is_some()
        );

        let manager = match seed {
            Some(seed) => DrawSessionManager::with_seed(config.clone(), seed),
            None => DrawSessionManager::new(config.clone()),
        };

        Self {
            config,
            draw_api: Arc::new(DrawApi::new(manager)),
        }
    }
}
