// ==========================================
// 智能抽签系统 - 配置层
// ==========================================
// 职责: 列名、分组规则、标记列、导出目录等配置
// 存储: JSON 配置文件（可选）+ 环境变量覆写
// ==========================================

pub mod draw_config;

// 重导出核心配置
pub use draw_config::{env_keys, ConfigError, DrawConfig, GroupTagRule};
