// ==========================================
// 智能抽签系统 - 抽签配置
// ==========================================
// 职责: 配置加载、默认值、校验
// 来源优先级: 显式路径 > ROSTER_DRAW_CONFIG > 用户配置目录 > 内置默认
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 环境变量键
pub mod env_keys {
    /// 配置文件路径
    pub const CONFIG_PATH: &str = "ROSTER_DRAW_CONFIG";
    /// 导出目录覆写
    pub const EXPORT_DIR: &str = "ROSTER_DRAW_EXPORT_DIR";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

/// 分组规则：某列的值包含 marker 时，该值即为一个可选省区
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTagRule {
    /// 列名（如 四级部门）
    pub field: String,
    /// 标识子串（如 省区）
    pub marker: String,
}

impl GroupTagRule {
    pub fn new(field: &str, marker: &str) -> Self {
        Self {
            field: field.to_string(),
            marker: marker.to_string(),
        }
    }
}

/// 抽签配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// 员工 ID 列名
    pub id_column: String,
    /// 姓名列名
    pub name_column: String,
    /// 分组规则（按优先级排列）
    pub group_rules: Vec<GroupTagRule>,
    /// 标记列名
    pub marker_column: String,
    /// 被抽中时的标记值
    pub marker_value: String,
    /// 未解析到省区时的展示文本
    pub unknown_group_label: String,
    /// 自动导出目录
    pub export_dir: PathBuf,
    /// 自动导出文件名前缀
    pub auto_export_prefix: String,
    /// 手动导出默认文件名前缀
    pub manual_export_prefix: String,
    /// 结束抽签默认文件名前缀
    pub final_export_prefix: String,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            id_column: "员工 ID".to_string(),
            name_column: "姓名".to_string(),
            group_rules: vec![
                GroupTagRule::new("四级部门", "省区"),
                GroupTagRule::new("三级部门", "独立省区"),
            ],
            marker_column: "是否被抽中".to_string(),
            marker_value: "是".to_string(),
            unknown_group_label: "未知".to_string(),
            export_dir: PathBuf::from("."),
            auto_export_prefix: "抽签结果_自动更新".to_string(),
            manual_export_prefix: "抽签结果".to_string(),
            final_export_prefix: "抽签结果最终".to_string(),
        }
    }
}

impl DrawConfig {
    /// 从 JSON 文件加载（缺省字段取默认值）
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: DrawConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// 按优先级解析配置
    ///
    /// # 参数
    /// - explicit: 命令行显式指定的配置文件
    ///
    /// # 说明
    /// - 显式路径读取失败直接报错
    /// - 环境变量/用户目录中的文件不存在时回退到默认配置
    /// - 最后应用 ROSTER_DRAW_EXPORT_DIR 覆写
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::discover_path() {
                Some(path) => {
                    tracing::info!("使用配置文件: {}", path.display());
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };

        if let Ok(dir) = std::env::var(env_keys::EXPORT_DIR) {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                config.export_dir = PathBuf::from(trimmed);
            }
        }

        Ok(config)
    }

    /// 查找可用的配置文件
    fn discover_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(env_keys::CONFIG_PATH) {
            let path = PathBuf::from(path.trim());
            if path.is_file() {
                return Some(path);
            }
            tracing::warn!("{} 指向的文件不存在: {}", env_keys::CONFIG_PATH, path.display());
        }

        dirs::config_dir()
            .map(|dir| dir.join("roster-draw").join("config.json"))
            .filter(|path| path.is_file())
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("id_column", &self.id_column),
            ("name_column", &self.name_column),
            ("marker_column", &self.marker_column),
            ("marker_value", &self.marker_value),
            ("auto_export_prefix", &self.auto_export_prefix),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "不能为空".to_string(),
                });
            }
        }

        if self.group_rules.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "group_rules".to_string(),
                message: "至少需要一条分组规则".to_string(),
            });
        }

        for (idx, rule) in self.group_rules.iter().enumerate() {
            if rule.field.trim().is_empty() || rule.marker.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("group_rules[{}]", idx),
                    message: "field 与 marker 均不能为空".to_string(),
                });
            }
        }

        Ok(())
    }

    /// 分组列名列表
    pub fn group_fields(&self) -> Vec<String> {
        self.group_rules.iter().map(|r| r.field.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = DrawConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.group_rules.len(), 2);
        assert_eq!(config.group_rules[0], GroupTagRule::new("四级部门", "省区"));
        assert_eq!(config.marker_column, "是否被抽中");
    }

    #[test]
    fn test_from_file_partial_override() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"marker_value": "Y", "id_column": "工号"}}"#).unwrap();

        let config = DrawConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.marker_value, "Y");
        assert_eq!(config.id_column, "工号");
        // 未指定字段取默认值
        assert_eq!(config.name_column, "姓名");
    }

    #[test]
    fn test_from_file_rejects_empty_rules() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"group_rules": []}}"#).unwrap();

        let err = DrawConfig::from_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "group_rules"));
    }

    #[test]
    fn test_from_file_bad_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not json").unwrap();

        let err = DrawConfig::from_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = DrawConfig::resolve(Some(Path::new("/nonexistent/roster-draw.json")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
