use clap::Parser;
use std::process;

use wifi_viewer::cli::{Cli, CliApp, apply_language};
use wifi_viewer::config::AppConfig;
use wifi_viewer::error::Result;
use wifi_viewer::i18n::{current_language, t};
use wifi_viewer::service::WifiService;

#[tokio::main]
async fn main() {
    // 初始化日志系统
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("{}: {}", t("error.prefix"), e.localized_message());
        process::exit(1);
    }
}

/// 主运行函数
///
/// 加载配置、构建服务并运行命令行应用
async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    cli.apply_overrides(&mut config)?;
    apply_language(&config);

    let client = config.build_client()?;
    let service = WifiService::new(client, config.max_concurrency);
    log::debug!(
        "Using {} with up to {} concurrent calls, language {}",
        config.program,
        service.max_concurrency(),
        current_language().code()
    );

    CliApp::new(service).run(cli).await
}
