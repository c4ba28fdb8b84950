// ==========================================
// 智能抽签系统 - 控制台前端
// ==========================================
// 职责: 解析操作员命令，调用 DrawApi，渲染结果/错误
// 约束: 只通过 DrawApi 访问核心，所有文案走 i18n
// ==========================================

use std::io::{self, BufRead, Write};

use crate::api::{ApiError, DrawApi};
use crate::domain::draw::DrawEvent;
use crate::domain::types::ExportTrigger;
use crate::i18n::{t, t_with_args};

/// 控制台命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(String),
    Groups,
    Draw { count: String, groups: Vec<String> },
    DrawAll { count: String },
    History,
    Status,
    Export(Option<String>),
    End(Option<String>),
    Help,
    Quit,
}

/// 命令解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    Usage(&'static str),
}

/// 解析一行输入
///
/// # 返回
/// - Ok(None): 空行
/// - Ok(Some(cmd)): 命令
/// - Err: 未知命令或缺少参数
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let optional = |s: &str| {
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    };

    let cmd = match head.to_lowercase().as_str() {
        "load" => match optional(rest) {
            Some(path) => Command::Load(path),
            None => return Err(ParseError::Usage("load <path>")),
        },
        "groups" => Command::Groups,
        "draw" => {
            let (count, groups) = match rest.split_once(char::is_whitespace) {
                Some((count, groups)) => (count, groups),
                None => return Err(ParseError::Usage("draw <count> <group>[,<group>]")),
            };
            let groups: Vec<String> = groups
                .split([',', '，'])
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect();
            if groups.is_empty() {
                return Err(ParseError::Usage("draw <count> <group>[,<group>]"));
            }
            Command::Draw {
                count: count.to_string(),
                groups,
            }
        }
        "draw-all" => match optional(rest) {
            Some(count) => Command::DrawAll { count },
            None => return Err(ParseError::Usage("draw-all <count>")),
        },
        "history" => Command::History,
        "status" => Command::Status,
        "export" => Command::Export(optional(rest)),
        "end" => Command::End(optional(rest)),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(cmd))
}

/// 控制台
pub struct Console<'a> {
    api: &'a DrawApi,
}

impl<'a> Console<'a> {
    pub fn new(api: &'a DrawApi) -> Self {
        Self { api }
    }

    /// 交互循环: 逐行读取命令直到 quit 或输入结束
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}", t("app.help"))?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            let rendered = match parse_command(&line) {
                Ok(None) => String::new(),
                Ok(Some(Command::Quit)) => {
                    writeln!(output, "{}", t("app.bye"))?;
                    return Ok(());
                }
                Ok(Some(cmd)) => self.execute(cmd),
                Err(ParseError::UnknownCommand(cmd)) => {
                    t_with_args("error.unknown_command", &[("command", &cmd)])
                }
                Err(ParseError::Usage(usage)) => t_with_args("error.usage", &[("usage", usage)]),
            };

            if !rendered.is_empty() {
                writeln!(output, "{}", rendered)?;
            }
            write!(output, "> ")?;
            output.flush()?;
        }

        Ok(())
    }

    /// 执行命令并渲染输出
    pub fn execute(&self, cmd: Command) -> String {
        let result = match cmd {
            Command::Load(path) => self.load(&path),
            Command::Groups => self.groups(),
            Command::Draw { count, groups } => self.draw(&count, Some(groups)),
            Command::DrawAll { count } => self.draw(&count, None),
            Command::History => self.history(),
            Command::Status => self.status(),
            Command::Export(path) => self.export(path),
            Command::End(path) => self.end(path),
            Command::Help => Ok(t("app.help")),
            Command::Quit => Ok(t("app.bye")),
        };

        result.unwrap_or_else(|e| render_error(&e))
    }

    fn load(&self, path: &str) -> Result<String, ApiError> {
        let summary = self.api.load_roster(path)?;
        let mut out = t_with_args(
            "load.success",
            &[
                ("total", &summary.total_people.to_string()),
                ("groups", &summary.groups.len().to_string()),
            ],
        );
        out.push('\n');
        out.push_str(&self.groups()?);
        Ok(out)
    }

    fn groups(&self) -> Result<String, ApiError> {
        let groups = self.api.list_groups()?;
        if groups.is_empty() {
            return Ok(t("groups.empty"));
        }

        let mut lines = vec![t("groups.header")];
        for (i, group) in groups.iter().enumerate() {
            lines.push(t_with_args(
                "groups.item",
                &[
                    ("index", &(i + 1).to_string()),
                    ("name", &group.name),
                    ("count", &group.member_count.to_string()),
                ],
            ));
        }
        Ok(lines.join("\n"))
    }

    /// 省区参数可以是名称或 `groups` 列表中的序号
    fn resolve_group_tokens(&self, tokens: Vec<String>) -> Result<Vec<String>, ApiError> {
        let groups = self.api.list_groups()?;
        Ok(tokens
            .into_iter()
            .map(|token| {
                if groups.iter().any(|g| g.name == token) {
                    return token;
                }
                token
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| idx.checked_sub(1))
                    .and_then(|idx| groups.get(idx))
                    .map(|g| g.name.clone())
                    .unwrap_or(token)
            })
            .collect())
    }

    fn draw(&self, count: &str, groups: Option<Vec<String>>) -> Result<String, ApiError> {
        let count: i64 = match count.parse() {
            Ok(c) => c,
            Err(_) => return Ok(t("draw.invalid_count")),
        };

        let event = match groups {
            Some(tokens) => {
                let groups = self.resolve_group_tokens(tokens)?;
                self.api.draw(&groups, count)
            }
            None => self.api.draw_all(count),
        };

        match event {
            Ok(event) => Ok(render_draw_event(&event)),
            Err(ApiError::InsufficientPool { eligible: 0, .. }) => Ok(t("draw.pool_exhausted")),
            Err(e) => Err(e),
        }
    }

    fn history(&self) -> Result<String, ApiError> {
        let rows = self.api.history()?;
        if rows.is_empty() {
            return Ok(t("history.empty"));
        }

        let mut lines = vec![t("history.header")];
        for row in rows {
            lines.push(t_with_args(
                "history.row",
                &[
                    ("index", &row.index.to_string()),
                    ("row", &row.row_number.to_string()),
                    ("id", &row.employee_id),
                    ("name", &row.name),
                    ("group", &row.group),
                ],
            ));
        }
        Ok(lines.join("\n"))
    }

    fn status(&self) -> Result<String, ApiError> {
        let snapshot = self.api.snapshot()?;
        let ended = if snapshot.ended {
            t("status.ended_yes")
        } else {
            t("status.ended_no")
        };

        let mut out = t_with_args(
            "status.line",
            &[
                ("path", &snapshot.source_path.display().to_string()),
                ("total", &snapshot.total_people.to_string()),
                ("groups", &snapshot.group_count.to_string()),
                ("draws", &snapshot.draw_count.to_string()),
                ("drawn", &snapshot.drawn_count.to_string()),
                ("ended", &ended),
            ],
        );
        if let Some(path) = snapshot.export_path {
            out.push('\n');
            out.push_str(&t_with_args(
                "status.export_path",
                &[("path", &path.display().to_string())],
            ));
        }
        Ok(out)
    }

    fn export(&self, path: Option<String>) -> Result<String, ApiError> {
        let path = match path {
            Some(path) => path,
            None => self
                .api
                .suggest_export_path(ExportTrigger::Manual)?
                .display()
                .to_string(),
        };

        let summary = self.api.export_result(&path)?;
        let success = t_with_args(
            "export.success",
            &[
                ("path", &summary.path.display().to_string()),
                ("rows", &summary.total_rows.to_string()),
                ("marked", &summary.marked_rows.to_string()),
            ],
        );

        if summary.draw_count == 0 {
            return Ok(format!("{}\n{}", t("export.no_draw_warning"), success));
        }
        Ok(success)
    }

    fn end(&self, path: Option<String>) -> Result<String, ApiError> {
        let summary = self.api.end_draw(path.as_deref())?;
        Ok(t_with_args(
            "end.success",
            &[
                ("draws", &summary.draw_count.to_string()),
                ("drawn", &summary.drawn_count.to_string()),
                ("path", &summary.path.display().to_string()),
            ],
        ))
    }
}

/// 省区摘要: 前两个省区 + 「等 N 个省区」
fn summarize_groups(groups: &[String]) -> String {
    let mut text = groups
        .iter()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if groups.len() > 2 {
        text.push_str(&t_with_args(
            "draw.groups_more",
            &[("count", &groups.len().to_string())],
        ));
    }
    text
}

fn render_draw_event(event: &DrawEvent) -> String {
    let mut lines = vec![t_with_args(
        "draw.success",
        &[
            ("round", &event.round.to_string()),
            ("groups", &summarize_groups(&event.groups)),
            ("count", &event.drawn.len().to_string()),
            ("total", &event.cumulative_count.to_string()),
        ],
    )];

    for (i, person) in event.drawn.iter().enumerate() {
        lines.push(t_with_args(
            "history.row",
            &[
                ("index", &(i + 1).to_string()),
                ("row", &person.row_number.to_string()),
                ("id", &person.employee_id),
                ("name", &person.name),
                ("group", person.display_group.as_deref().unwrap_or("-")),
            ],
        ));
    }

    lines.push(match &event.auto_export {
        crate::domain::draw::AutoExportStatus::Written { path } => t_with_args(
            "draw.auto_export_ok",
            &[("path", &path.display().to_string())],
        ),
        crate::domain::draw::AutoExportStatus::Failed { path, reason } => t_with_args(
            "draw.auto_export_failed",
            &[("path", &path.display().to_string()), ("reason", reason)],
        ),
    });

    lines.join("\n")
}

fn render_error(err: &ApiError) -> String {
    tracing::debug!("命令失败: code={}, message={}", err.code(), err);
    t_with_args("error.prefix", &[("message", &err.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrawConfig;
    use crate::engine::DrawSessionManager;
    use crate::i18n::{set_locale, tests::LOCALE_TEST_LOCK};
    use std::io::Write as _;
    use tempfile::tempdir;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("groups"), Ok(Some(Command::Groups)));
        assert_eq!(
            parse_command("load /tmp/名单 2024.xlsx"),
            Ok(Some(Command::Load("/tmp/名单 2024.xlsx".to_string())))
        );
        assert_eq!(
            parse_command("draw 3 华东省区，华南省区, 1"),
            Ok(Some(Command::Draw {
                count: "3".to_string(),
                groups: vec!["华东省区".into(), "华南省区".into(), "1".into()],
            }))
        );
        assert_eq!(parse_command("end"), Ok(Some(Command::End(None))));
        assert_eq!(parse_command("QUIT"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_command("draw 3"), Err(ParseError::Usage(_))));
        assert!(matches!(parse_command("load"), Err(ParseError::Usage(_))));
        assert_eq!(
            parse_command("shuffle"),
            Err(ParseError::UnknownCommand("shuffle".to_string()))
        );
    }

    #[test]
    fn test_console_session_flow() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("zh-CN");

        let dir = tempdir().unwrap();
        let roster_path = dir.path().join("roster.csv");
        let mut file = std::fs::File::create(&roster_path).unwrap();
        writeln!(file, "员工 ID,姓名,四级部门").unwrap();
        writeln!(file, "E001,张三,华东省区").unwrap();
        writeln!(file, "E002,李四,华东省区").unwrap();
        writeln!(file, "E003,王五,华南省区").unwrap();
        drop(file);

        let config = DrawConfig {
            export_dir: dir.path().to_path_buf(),
            ..DrawConfig::default()
        };
        let api = DrawApi::new(DrawSessionManager::with_seed(config, 11));
        let console = Console::new(&api);

        let out = console.execute(Command::Load(roster_path.display().to_string()));
        assert!(out.contains("3 人"), "{}", out);
        assert!(out.contains("[1] 华东省区"), "{}", out);

        // 未抽签即导出: 提示但仍写出文件
        let early = dir.path().join("early.csv");
        let out = console.execute(Command::Export(Some(early.display().to_string())));
        assert!(out.starts_with(&t("export.no_draw_warning")), "{}", out);
        assert!(early.exists());

        // 按序号选择省区
        let out = console.execute(parse_command("draw 2 1").unwrap().unwrap());
        assert!(out.contains("第1次抽签完成"), "{}", out);

        let out = console.execute(parse_command("draw 1 华东省区").unwrap().unwrap());
        assert!(out.contains("已无未抽中"), "{}", out);

        let out = console.execute(parse_command("draw x 华南省区").unwrap().unwrap());
        assert_eq!(out, t("draw.invalid_count"));

        let out = console.execute(Command::Export(Some(
            dir.path().join("mid.csv").display().to_string(),
        )));
        assert!(!out.contains(&t("export.no_draw_warning")), "{}", out);

        let out = console.execute(Command::End(None));
        assert!(out.contains("抽签已结束"), "{}", out);

        let out = console.execute(parse_command("draw 1 华南省区").unwrap().unwrap());
        assert!(out.starts_with("❌"), "{}", out);
    }

    #[test]
    fn test_run_loop_stops_on_quit() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("en");

        let api = DrawApi::new(DrawSessionManager::with_seed(DrawConfig::default(), 1));
        let console = Console::new(&api);
        let input = b"bogus\nquit\ngroups\n";
        let mut output = Vec::new();

        console.run(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("Unknown command: bogus"));
        assert!(text.contains("Bye"));
        // quit 之后的命令不再执行
        assert!(!text.contains("Groups:"));

        set_locale("zh-CN");
    }
}
