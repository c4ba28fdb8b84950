// ==========================================
// 智能抽签系统 - 控制台主入口
// ==========================================
// 用法:
//   roster-draw [--config <file>] [--seed <n>] [--lang zh-CN|en] [<花名册文件>]
// ==========================================

use std::io;

use anyhow::Context;
use roster_draw::app::{parse_cli_args, AppState, Command, Console};
use roster_draw::config::DrawConfig;
use roster_draw::i18n;
use roster_draw::logging;

fn main() -> anyhow::Result<()> {
    let cli = parse_cli_args();

    // 初始化日志系统
    logging::init();

    // 语言: --lang > LANG 环境变量 > zh-CN
    let locale = cli
        .lang
        .as_deref()
        .and_then(i18n::normalize_locale)
        .or_else(|| {
            std::env::var("LANG")
                .ok()
                .and_then(|raw| i18n::normalize_locale(&raw))
        })
        .unwrap_or("zh-CN");
    i18n::set_locale(locale);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", roster_draw::APP_NAME, roster_draw::VERSION);
    tracing::info!("==================================================");

    let config = DrawConfig::resolve(cli.config.as_deref()).context("配置加载失败")?;
    let state = AppState::new(config, cli.seed);
    let console = Console::new(&state.draw_api);

    println!(
        "{}",
        i18n::t_with_args("app.banner", &[("version", roster_draw::VERSION)])
    );

    if let Some(path) = cli.roster {
        println!("{}", console.execute(Command::Load(path)));
    }

    let stdin = io::stdin();
    console.run(stdin.lock(), io::stdout().lock())?;

    tracing::info!("控制台已退出");
    Ok(())
}
