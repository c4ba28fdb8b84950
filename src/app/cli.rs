// ==========================================
// 智能抽签系统 - 命令行参数
// ==========================================
// 用法:
//   roster-draw [--config <file>] [--seed <n>] [--lang zh-CN|en] [<花名册文件>]
// ==========================================

use clap::{value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;

/// 命令行参数
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub lang: Option<String>,
    pub roster: Option<String>,
}

/// 构建命令定义
pub fn build_command() -> Command {
    Command::new("roster-draw")
        .version(crate::VERSION)
        .about("智能抽签系统 - 按省区随机抽取人员并标记导出")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("配置文件路径（JSON）"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(value_parser!(u64))
                .help("随机种子，用于复现抽签结果"),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .value_name("LANG")
                .value_parser(["zh-CN", "en"])
                .help("界面语言"),
        )
        .arg(
            Arg::new("roster")
                .value_name("ROSTER")
                .help("启动时加载的花名册文件（.xlsx/.xls/.csv）"),
        )
}

fn from_matches(matches: &ArgMatches) -> CliArgs {
    CliArgs {
        config: matches.get_one::<PathBuf>("config").cloned(),
        seed: matches.get_one::<u64>("seed").copied(),
        lang: matches.get_one::<String>("lang").cloned(),
        roster: matches.get_one::<String>("roster").cloned(),
    }
}

/// 解析进程参数（出错时由 clap 打印用法并退出）
pub fn parse_cli_args() -> CliArgs {
    from_matches(&build_command().get_matches())
}
