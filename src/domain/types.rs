// ==========================================
// 智能抽签系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 导出触发来源 (Export Trigger)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportTrigger {
    /// 每次抽签成功后自动刷新
    Auto,
    /// 操作员手动导出
    Manual,
    /// 结束抽签时的最终导出
    Final,
}

impl fmt::Display for ExportTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportTrigger::Auto => write!(f, "AUTO"),
            ExportTrigger::Manual => write!(f, "MANUAL"),
            ExportTrigger::Final => write!(f, "FINAL"),
        }
    }
}
