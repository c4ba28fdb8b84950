// ==========================================
// 智能抽签系统 - 花名册构建
// ==========================================
// 职责: 字段映射（员工 ID / 姓名 / 分组列）、主键校验、省区目录生成
// 省区归属在此一次性解析并缓存到 Person
// ==========================================

use crate::config::DrawConfig;
use crate::domain::roster::{GroupInfo, Person, RawRow, RawTable, Roster};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::group_resolver::{bind_rules, resolve_group, BoundGroupRule};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 由原始表格构建花名册
///
/// # 说明
/// - 员工 ID 为空的行（如合计行/备注行）不参与抽签，但保留在导出表中
/// - ID/姓名/省区按去空白后的文本匹配，表格本身保持原样
///
/// # 错误
/// - MissingColumn: 缺少员工 ID 或姓名列
/// - MissingGroupColumns: 所有分组列均缺失
/// - PrimaryKeyMissing: 所有数据行的员工 ID 均为空
pub fn build_roster(
    table: RawTable,
    source_path: PathBuf,
    config: &DrawConfig,
) -> ImportResult<Roster> {
    let id_idx = table
        .column_index(&config.id_column)
        .ok_or_else(|| ImportError::MissingColumn(config.id_column.clone()))?;
    let name_idx = table
        .column_index(&config.name_column)
        .ok_or_else(|| ImportError::MissingColumn(config.name_column.clone()))?;

    let rules = bind_rules(&config.group_rules, &table.headers);
    if rules.is_empty() {
        return Err(ImportError::MissingGroupColumns(config.group_fields()));
    }

    let mut person_rows: Vec<&RawRow> = Vec::with_capacity(table.len());
    for row in &table.rows {
        if row.key(id_idx).is_empty() {
            tracing::warn!(
                "第 {} 行 {} 为空，跳过（导出时保留该行）",
                row.row_number,
                config.id_column
            );
            continue;
        }
        person_rows.push(row);
    }

    if person_rows.is_empty() {
        if let Some(first) = table.rows.first() {
            return Err(ImportError::PrimaryKeyMissing {
                row: first.row_number,
                column: config.id_column.clone(),
            });
        }
    }

    // 省区目录: 同名省区由优先级最高的规则定义
    let mut catalogue: BTreeMap<String, &BoundGroupRule> = BTreeMap::new();
    for rule in &rules {
        for row in &person_rows {
            let value = row.key(rule.col_idx);
            if !value.is_empty() && value.contains(rule.marker.as_str()) {
                catalogue.entry(value.to_string()).or_insert(rule);
            }
        }
    }

    let persons: Vec<Person> = person_rows
        .iter()
        .map(|row| {
            let mut groups: Vec<String> = Vec::new();
            for rule in &rules {
                let value = row.key(rule.col_idx);
                let is_member = catalogue
                    .get(value)
                    .map(|source| source.col_idx == rule.col_idx)
                    .unwrap_or(false);
                if is_member && !groups.iter().any(|g| g == value) {
                    groups.push(value.to_string());
                }
            }

            Person {
                employee_id: row.key(id_idx).to_string(),
                name: row.key(name_idx).to_string(),
                row_number: row.row_number,
                display_group: resolve_group(row, &rules),
                groups,
            }
        })
        .collect();

    let groups: Vec<GroupInfo> = catalogue
        .iter()
        .map(|(name, source)| GroupInfo {
            name: name.clone(),
            source_field: source.field.clone(),
            member_count: person_rows
                .iter()
                .filter(|row| row.key(source.col_idx) == name.as_str())
                .count(),
        })
        .collect();

    tracing::info!(
        "花名册构建完成: {} 人, {} 个省区, 跳过 {} 行",
        persons.len(),
        groups.len(),
        table.len() - person_rows.len()
    );

    Ok(Roster::new(source_path, id_idx, table, persons, groups))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 4]]) -> RawTable {
        let mut table = RawTable::new(vec![
            "员工 ID".into(),
            "姓名".into(),
            "三级部门".into(),
            "四级部门".into(),
        ]);
        for (i, r) in rows.iter().enumerate() {
            table.push_row(i + 2, r.iter().map(|s| s.to_string()).collect());
        }
        table
    }

    #[test]
    fn test_build_roster_catalogue_sorted_with_counts() {
        let t = table(&[
            ["E001", "张三", "华东大区", "浙江省区"],
            ["E002", "李四", "华东大区", "江苏省区"],
            ["E003", "王五", "华东大区", "浙江省区"],
            ["E004", "赵六", "海南独立省区", "海口办"],
            ["E005", "钱七", "总部", "财务部"],
        ]);

        let roster = build_roster(t, PathBuf::from("roster.csv"), &DrawConfig::default()).unwrap();

        let names: Vec<&str> = roster.groups().iter().map(|g| g.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 3);

        let zhejiang = roster.group("浙江省区").unwrap();
        assert_eq!(zhejiang.member_count, 2);
        assert_eq!(zhejiang.source_field, "四级部门");

        let hainan = roster.group("海南独立省区").unwrap();
        assert_eq!(hainan.member_count, 1);
        assert_eq!(hainan.source_field, "三级部门");

        // 无省区的人员
        assert_eq!(roster.persons()[4].display_group, None);
        assert!(roster.persons()[4].groups.is_empty());
    }

    #[test]
    fn test_person_can_belong_to_two_groups() {
        let t = table(&[["E001", "张三", "海南独立省区", "琼北省区"]]);
        let roster = build_roster(t, PathBuf::from("r.csv"), &DrawConfig::default()).unwrap();

        let person = &roster.persons()[0];
        assert_eq!(person.display_group.as_deref(), Some("琼北省区"));
        assert!(person.is_member_of("琼北省区"));
        assert!(person.is_member_of("海南独立省区"));
    }

    #[test]
    fn test_missing_id_column() {
        let mut t = RawTable::new(vec!["工号".into(), "姓名".into(), "四级部门".into()]);
        t.push_row(2, vec!["E001".into(), "张三".into(), "华东省区".into()]);

        let err = build_roster(t, PathBuf::from("r.csv"), &DrawConfig::default()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(ref c) if c == "员工 ID"));
    }

    #[test]
    fn test_missing_all_group_columns() {
        let mut t = RawTable::new(vec!["员工 ID".into(), "姓名".into()]);
        t.push_row(2, vec!["E001".into(), "张三".into()]);

        let err = build_roster(t, PathBuf::from("r.csv"), &DrawConfig::default()).unwrap_err();
        assert!(matches!(err, ImportError::MissingGroupColumns(_)));
    }

    #[test]
    fn test_blank_id_rows_skipped_but_kept_in_table() {
        let t = table(&[
            ["E001", "张三", "", "华东省区"],
            ["  ", "合计", "", ""],
            [" E002 ", " 李四 ", "", " 华东省区"],
        ]);

        let roster = build_roster(t, PathBuf::from("r.csv"), &DrawConfig::default()).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.table().len(), 3);
        assert_eq!(roster.persons()[1].employee_id, "E002");
        assert_eq!(roster.persons()[1].name, "李四");
        assert_eq!(roster.persons()[1].row_number, 4);
        assert_eq!(roster.group("华东省区").unwrap().member_count, 2);
        // 原表文本不变
        assert_eq!(roster.table().rows[2].get(0), " E002 ");
    }

    #[test]
    fn test_all_ids_blank_rejected() {
        let t = table(&[["", "张三", "", "华东省区"], ["", "李四", "", "华东省区"]]);

        let err = build_roster(t, PathBuf::from("r.csv"), &DrawConfig::default()).unwrap_err();
        assert!(matches!(err, ImportError::PrimaryKeyMissing { row: 2, .. }));
    }
}
