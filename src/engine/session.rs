// ==========================================
// 智能抽签系统 - 抽签会话状态
// ==========================================
// 状态: 累计抽中集合 / 抽签次数 / 导出路径 / 结束标志
// 红线: 累计集合只增不减; ended 单向置位; 重新加载花名册才会重置
// ==========================================

use crate::domain::draw::DrawnPerson;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 抽签会话
#[derive(Debug, Clone)]
pub struct DrawSession {
    session_id: String,
    drawn_ids: HashSet<String>,
    /// 累计抽中人员（抽中顺序）
    drawn: Vec<DrawnPerson>,
    draw_count: u32,
    export_path: Option<PathBuf>,
    ended: bool,
}

impl DrawSession {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            drawn_ids: HashSet::new(),
            drawn: Vec::new(),
            draw_count: 0,
            export_path: None,
            ended: false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn drawn_ids(&self) -> &HashSet<String> {
        &self.drawn_ids
    }

    pub fn drawn(&self) -> &[DrawnPerson] {
        &self.drawn
    }

    pub fn is_drawn(&self, employee_id: &str) -> bool {
        self.drawn_ids.contains(employee_id)
    }

    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn export_path(&self) -> Option<&Path> {
        self.export_path.as_deref()
    }

    /// 下一轮次编号
    pub fn next_round(&self) -> u32 {
        self.draw_count + 1
    }

    /// 记录一次成功的抽签
    ///
    /// 调用方保证 `persons` 与已抽集合不相交
    pub fn record_draw(&mut self, persons: &[DrawnPerson]) {
        debug_assert!(persons.iter().all(|p| !self.drawn_ids.contains(&p.employee_id)));

        for person in persons {
            if self.drawn_ids.insert(person.employee_id.clone()) {
                self.drawn.push(person.clone());
            }
        }
        self.draw_count += 1;
    }

    pub fn set_export_path(&mut self, path: PathBuf) {
        self.export_path = Some(path);
    }

    /// 结束抽签（不可撤销）
    pub fn end(&mut self) {
        self.ended = true;
    }
}

impl Default for DrawSession {
    fn default() -> Self {
        Self::new()
    }
}
