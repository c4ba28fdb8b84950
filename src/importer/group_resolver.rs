// ==========================================
// 智能抽签系统 - 省区解析
// ==========================================
// 规则: 按优先级依次检查分组列，值包含该列标识子串即为省区
// 例: 四级部门含「省区」优先，其次三级部门含「独立省区」
// ==========================================

use crate::config::GroupTagRule;
use crate::domain::roster::RawRow;

/// 已绑定到表格列下标的分组规则
#[derive(Debug, Clone)]
pub struct BoundGroupRule {
    pub field: String,
    pub marker: String,
    pub col_idx: usize,
}

/// 将分组规则绑定到表头，缺失的列被跳过
pub fn bind_rules(rules: &[GroupTagRule], headers: &[String]) -> Vec<BoundGroupRule> {
    rules
        .iter()
        .filter_map(|rule| {
            headers
                .iter()
                .position(|h| h.trim() == rule.field.trim())
                .map(|col_idx| BoundGroupRule {
                    field: rule.field.clone(),
                    marker: rule.marker.clone(),
                    col_idx,
                })
        })
        .collect()
}

/// 解析某行的省区
///
/// # 返回
/// - Some(省区名): 第一条命中的规则对应列的值
/// - None: 所有规则均未命中
pub fn resolve_group(row: &RawRow, rules: &[BoundGroupRule]) -> Option<String> {
    rules.iter().find_map(|rule| {
        let value = row.key(rule.col_idx);
        if !value.is_empty() && value.contains(rule.marker.as_str()) {
            Some(value.to_string())
        } else {
            None
        }
    })
}
