// ==========================================
// 智能抽签系统 - 标记规则
// ==========================================
// 规则:
// 1. 输出 = 加载时的完整花名册（行序、其他列不变）
// 2. 标记列已存在则覆盖，否则追加到末尾
// 3. 先整列清空，再对累计抽中的员工 ID 写入标记值
// 4. 其他单元格原样复制（文本与类型均不变）
// 每次导出都从花名册整表重建，不做增量更新
// ==========================================

use crate::config::DrawConfig;
use crate::domain::roster::{Cell, RawTable, Roster};
use std::collections::HashSet;

/// 已标记的输出表
#[derive(Debug, Clone)]
pub struct MarkedTable {
    pub table: RawTable,
    /// 标记列下标
    pub marker_column: usize,
    /// 被标记的行数
    pub marked_rows: usize,
}

/// 生成带标记列的输出表
pub fn mark_roster(roster: &Roster, drawn_ids: &HashSet<String>, config: &DrawConfig) -> MarkedTable {
    let source = roster.table();
    let id_col = roster.id_column();

    let mut headers = source.headers.clone();
    let marker_column = match source.column_index(&config.marker_column) {
        Some(idx) => idx,
        None => {
            headers.push(config.marker_column.clone());
            headers.len() - 1
        }
    };

    let mut table = RawTable::new(headers);
    let mut marked_rows = 0;
    for row in &source.rows {
        let mut cells = row.cells.clone();
        cells.resize(table.headers.len(), Cell::default());

        let id = row.key(id_col);
        cells[marker_column] = if !id.is_empty() && drawn_ids.contains(id) {
            marked_rows += 1;
            Cell::text(config.marker_value.as_str())
        } else {
            Cell::default()
        };

        table.push_cells(row.row_number, cells);
    }

    MarkedTable {
        table,
        marker_column,
        marked_rows,
    }
}
