// ==========================================
// 智能抽签系统 - 抽签会话管理器
// ==========================================
// 职责: 加载花名册 / 按省区抽签 / 累计结果 / 标记导出
// 流程:
// 1. load: 解析成功才替换花名册并开启新会话
// 2. draw: 校验 → 候选池(去重+排除已抽) → 抽样 → 累计 → 自动导出(尽力而为)
// 3. end: 置结束标志 → 最终导出
// 4. export: 只读导出，不改变会话
// 并发: draw/end 需要 &mut self，同一管理器同一时刻只允许一个操作
// ==========================================

use crate::config::DrawConfig;
use crate::domain::draw::{
    AutoExportStatus, DrawEvent, DrawnPerson, ExportSummary, HistoryRow, LoadSummary,
    SessionSnapshot,
};
use crate::domain::roster::{GroupInfo, Person, Roster};
use crate::domain::types::ExportTrigger;
use crate::engine::error::{DrawError, DrawResult};
use crate::engine::sampler::{Sampler, UniformSampler};
use crate::engine::session::DrawSession;
use crate::exporter::{mark_roster, ExportResult, UniversalFileWriter};
use crate::importer::load_roster;
use chrono::Local;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 已加载的花名册及其会话
struct Loaded {
    roster: Roster,
    session: DrawSession,
}

/// 抽签会话管理器
pub struct DrawSessionManager {
    config: DrawConfig,
    sampler: Box<dyn Sampler>,
    loaded: Option<Loaded>,
}

impl DrawSessionManager {
    /// 使用系统熵源创建
    pub fn new(config: DrawConfig) -> Self {
        Self::with_sampler(config, Box::new(UniformSampler::from_entropy()))
    }

    /// 使用固定种子创建（测试/复现）
    pub fn with_seed(config: DrawConfig, seed: u64) -> Self {
        Self::with_sampler(config, Box::new(UniformSampler::seeded(seed)))
    }

    pub fn with_sampler(config: DrawConfig, sampler: Box<dyn Sampler>) -> Self {
        Self {
            config,
            sampler,
            loaded: None,
        }
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.loaded.as_ref().map(|l| &l.roster)
    }

    pub fn session(&self) -> Option<&DrawSession> {
        self.loaded.as_ref().map(|l| &l.session)
    }

    fn loaded(&self) -> DrawResult<&Loaded> {
        self.loaded.as_ref().ok_or(DrawError::NoRosterLoaded)
    }

    // ==========================================
    // 加载
    // ==========================================

    /// 从文件加载花名册
    ///
    /// # 返回
    /// - Ok(LoadSummary): 总人数与省区列表
    /// - Err(DrawError::Load): 文件不可读/缺列，原有花名册与会话保持不变
    pub fn load<P: AsRef<Path>>(&mut self, file_path: P) -> DrawResult<LoadSummary> {
        let roster = load_roster(file_path, &self.config).map_err(|e| {
            tracing::error!("花名册加载失败: {}", e);
            DrawError::from(e)
        })?;
        Ok(self.install_roster(roster))
    }

    /// 安装已构建的花名册并开启新会话
    pub fn install_roster(&mut self, roster: Roster) -> LoadSummary {
        let session = DrawSession::new();

        tracing::info!(
            "已加载: {} 人, {} 个省区, session_id={}",
            roster.len(),
            roster.groups().len(),
            session.session_id()
        );

        let summary = LoadSummary {
            session_id: session.session_id().to_string(),
            source_path: roster.source_path().to_path_buf(),
            total_people: roster.len(),
            groups: roster.groups().to_vec(),
        };

        self.loaded = Some(Loaded { roster, session });
        summary
    }

    /// 省区列表（按名称排序）
    pub fn groups(&self) -> DrawResult<&[GroupInfo]> {
        Ok(self.loaded()?.roster.groups())
    }

    // ==========================================
    // 抽签
    // ==========================================

    /// 从选中省区中抽取 `count` 名未抽中人员
    ///
    /// # 错误
    /// - NoRosterLoaded / SessionEnded
    /// - Validation: count 为 0、未选省区、未知省区
    /// - InsufficientPool: 可抽人数不足（不做部分抽取，状态不变）
    ///
    /// # 说明
    /// 抽签成功后自动刷新导出文件；写文件失败只记录在返回值中，不回滚抽签
    pub fn draw(&mut self, groups: &[String], count: usize) -> DrawResult<DrawEvent> {
        let Loaded { roster, session } = self.loaded.as_mut().ok_or(DrawError::NoRosterLoaded)?;

        if session.is_ended() {
            return Err(DrawError::SessionEnded);
        }
        if count == 0 {
            return Err(DrawError::Validation("抽取人数必须大于 0".to_string()));
        }

        let selected = normalize_groups(groups);
        if selected.is_empty() {
            return Err(DrawError::Validation("请至少选择一个省区".to_string()));
        }
        if let Some(unknown) = selected.iter().find(|g| roster.group(g).is_none()) {
            return Err(DrawError::Validation(format!("未知省区: {}", unknown)));
        }

        let pool = candidate_pool(roster, session, &selected);
        tracing::debug!(
            "候选池: 省区={:?}, 可抽={}, 请求={}",
            selected,
            pool.len(),
            count
        );

        if pool.len() < count {
            tracing::info!("可抽人数不足: 可抽={}, 请求={}", pool.len(), count);
            return Err(DrawError::InsufficientPool {
                eligible: pool.len(),
                requested: count,
            });
        }

        let round = session.next_round();
        let drawn: Vec<DrawnPerson> = self
            .sampler
            .sample_indices(pool.len(), count)
            .into_iter()
            .map(|idx| DrawnPerson::from_person(pool[idx], round))
            .collect();
        let eligible_before = pool.len();

        session.record_draw(&drawn);

        tracing::info!(
            "第{}次抽签完成: 省区={:?}, 抽取 {} 人, 累计 {} 人",
            round,
            selected,
            drawn.len(),
            session.drawn().len()
        );

        // 自动导出（尽力而为）
        let auto_path = match session.export_path() {
            Some(path) => path.to_path_buf(),
            None => {
                let path = default_export_path(&self.config, roster, ExportTrigger::Auto);
                session.set_export_path(path.clone());
                path
            }
        };
        let auto_export = match write_marked(
            roster,
            session,
            &self.config,
            &auto_path,
            ExportTrigger::Auto,
        ) {
            Ok(_) => AutoExportStatus::Written { path: auto_path },
            Err(e) => {
                tracing::warn!("自动更新导出文件失败 ({}): {}", auto_path.display(), e);
                AutoExportStatus::Failed {
                    path: auto_path,
                    reason: e.to_string(),
                }
            }
        };

        Ok(DrawEvent {
            round,
            groups: selected,
            requested: count,
            drawn,
            eligible_before,
            cumulative_count: session.drawn().len(),
            drawn_at: Local::now().naive_local(),
            auto_export,
        })
    }

    /// 对所有省区抽签
    pub fn draw_from_all(&mut self, count: usize) -> DrawResult<DrawEvent> {
        let all: Vec<String> = self.groups()?.iter().map(|g| g.name.clone()).collect();
        self.draw(&all, count)
    }

    // ==========================================
    // 结束 / 导出
    // ==========================================

    /// 结束抽签并写出最终结果
    ///
    /// # 参数
    /// - destination: 目标路径；None 时写到会话已有的自动导出路径
    ///
    /// # 说明
    /// 结束标志先于写文件置位，写文件失败也不会恢复
    pub fn end(&mut self, destination: Option<&Path>) -> DrawResult<ExportSummary> {
        let Loaded { roster, session } = self.loaded.as_mut().ok_or(DrawError::NoRosterLoaded)?;

        if session.draw_count() == 0 {
            return Err(DrawError::NoDrawYet);
        }

        session.end();

        if let Some(path) = destination {
            session.set_export_path(path.to_path_buf());
        }
        let path = match session.export_path() {
            Some(path) => path.to_path_buf(),
            None => {
                let path = default_export_path(&self.config, roster, ExportTrigger::Final);
                session.set_export_path(path.clone());
                path
            }
        };

        let summary = write_marked(roster, session, &self.config, &path, ExportTrigger::Final)?;
        tracing::info!(
            "抽签已结束: 共 {} 次, 累计 {} 人, 结果: {}",
            summary.draw_count,
            summary.drawn_count,
            path.display()
        );
        Ok(summary)
    }

    /// 导出当前结果（不改变会话状态，结束前后均可调用）
    pub fn export<P: AsRef<Path>>(&self, destination: P) -> DrawResult<ExportSummary> {
        let loaded = self.loaded()?;
        let summary = write_marked(
            &loaded.roster,
            &loaded.session,
            &self.config,
            destination.as_ref(),
            ExportTrigger::Manual,
        )?;
        tracing::info!(
            "导出完成: {} 条记录, 抽中 {} 人, 文件: {}",
            summary.total_rows,
            summary.marked_rows,
            summary.path.display()
        );
        Ok(summary)
    }

    /// 生成默认导出路径: `<export_dir>/<前缀>_<YYYYMMDD_HHMMSS>.<ext>`
    pub fn suggest_export_path(&self, trigger: ExportTrigger) -> DrawResult<PathBuf> {
        let loaded = self.loaded()?;
        Ok(default_export_path(&self.config, &loaded.roster, trigger))
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 累计抽签结果（最新在前）
    pub fn history(&self) -> DrawResult<Vec<HistoryRow>> {
        let loaded = self.loaded()?;
        let unknown = &self.config.unknown_group_label;

        Ok(loaded
            .session
            .drawn()
            .iter()
            .rev()
            .enumerate()
            .map(|(i, p)| HistoryRow {
                index: i + 1,
                row_number: p.row_number,
                employee_id: p.employee_id.clone(),
                name: p.name.clone(),
                group: p.display_group.clone().unwrap_or_else(|| unknown.clone()),
                round: p.round,
            })
            .collect())
    }

    pub fn snapshot(&self) -> DrawResult<SessionSnapshot> {
        let loaded = self.loaded()?;
        Ok(SessionSnapshot {
            session_id: loaded.session.session_id().to_string(),
            source_path: loaded.roster.source_path().to_path_buf(),
            total_people: loaded.roster.len(),
            group_count: loaded.roster.groups().len(),
            draw_count: loaded.session.draw_count(),
            drawn_count: loaded.session.drawn().len(),
            ended: loaded.session.is_ended(),
            export_path: loaded.session.export_path().map(Path::to_path_buf),
        })
    }
}

/// 去空白、去重，保持选择顺序
fn normalize_groups(groups: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .filter(|g| seen.insert(g.to_string()))
        .map(str::to_string)
        .collect()
}

/// 候选池: 属于任一选中省区、按员工 ID 去重、排除已抽中（保持花名册顺序）
fn candidate_pool<'a>(
    roster: &'a Roster,
    session: &DrawSession,
    selected: &[String],
) -> Vec<&'a Person> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut pool = Vec::new();
    for person in roster.persons() {
        if !selected.iter().any(|g| person.is_member_of(g)) {
            continue;
        }
        if session.is_drawn(&person.employee_id) {
            continue;
        }
        if seen.insert(person.employee_id.as_str()) {
            pool.push(person);
        }
    }
    pool
}

fn default_export_path(config: &DrawConfig, roster: &Roster, trigger: ExportTrigger) -> PathBuf {
    let prefix = match trigger {
        ExportTrigger::Auto => &config.auto_export_prefix,
        ExportTrigger::Manual => &config.manual_export_prefix,
        ExportTrigger::Final => &config.final_export_prefix,
    };
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let ext = UniversalFileWriter::output_extension_for(roster.source_path());
    config
        .export_dir
        .join(format!("{}_{}.{}", prefix, timestamp, ext))
}

/// 按标记规则写出完整花名册
fn write_marked(
    roster: &Roster,
    session: &DrawSession,
    config: &DrawConfig,
    path: &Path,
    trigger: ExportTrigger,
) -> ExportResult<ExportSummary> {
    let marked = mark_roster(roster, session.drawn_ids(), config);
    UniversalFileWriter.write(&marked.table, path)?;

    tracing::debug!(
        "[{}] 写出 {} 行, 标记 {} 行 -> {}",
        trigger,
        marked.table.len(),
        marked.marked_rows,
        path.display()
    );

    Ok(ExportSummary {
        path: path.to_path_buf(),
        trigger,
        draw_count: session.draw_count(),
        drawn_count: session.drawn().len(),
        total_rows: marked.table.len(),
        marked_rows: marked.marked_rows,
    })
}
