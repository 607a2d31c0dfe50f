//! 命令行接口模块

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::{Result, WifiError};
use crate::i18n::{Language, set_language, t};
use crate::models::{DeleteStatus, WifiRecord};
use crate::runner::CommandRunner;
use crate::service::WifiService;
use crate::utils::{default_export_path, display_width, format_record_info};

/// Command line interface
#[derive(Parser)]
#[command(
    name = "wifi-viewer",
    about = "Show passwords of Wi-Fi profiles saved on this machine",
    version
)]
pub struct Cli {
    /// Maximum number of netsh calls running at the same time
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,
    /// Timeout in seconds for a single netsh call
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
    /// Interface language (zh / en)
    #[arg(long, global = true)]
    pub lang: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List all saved profiles with their passwords
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Hide profiles without a stored password
        #[arg(long)]
        secured_only: bool,
    },
    /// Search profiles by name
    Search {
        /// Case-insensitive part of the profile name
        query: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show name and password of one profile
    Show {
        /// Profile name
        name: String,
    },
    /// Show the currently connected network
    Current,
    /// Delete a saved profile
    Delete {
        /// Profile name
        name: String,
    },
    /// Export all profiles to a JSON file
    Export {
        /// Output file (defaults to a timestamped file in the current directory)
        path: Option<PathBuf>,
    },
}

impl Cli {
    /// 用命令行参数覆盖配置
    pub fn apply_overrides(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.command_timeout_secs = timeout;
        }
        if let Some(lang) = &self.lang {
            config.language = Some(lang.clone());
        }
        config.validate()
    }
}

/// 根据配置切换界面语言
pub fn apply_language(config: &AppConfig) {
    if let Some(code) = &config.language {
        match Language::from_code(code) {
            Some(language) => {
                log::debug!("Interface language: {}", language.name());
                set_language(language)
            }
            None => log::warn!("Unsupported language '{}', keeping default", code),
        }
    }
}

/// 命令行应用
pub struct CliApp<R> {
    service: WifiService<R>,
}

impl<R: CommandRunner + 'static> CliApp<R> {
    /// 创建一个新的命令行应用
    pub fn new(service: WifiService<R>) -> Self {
        Self { service }
    }

    /// 运行命令行应用，无子命令时等同于 `list`
    pub async fn run(&self, cli: Cli) -> Result<()> {
        let command = cli.command.unwrap_or(Commands::List {
            json: false,
            secured_only: false,
        });

        match command {
            Commands::List { json, secured_only } => self.list(json, secured_only).await,
            Commands::Search { query, json } => self.search(&query, json).await,
            Commands::Show { name } => self.show(&name).await,
            Commands::Current => self.current().await,
            Commands::Delete { name } => self.delete(&name).await,
            Commands::Export { path } => self.export(path).await,
        }
    }

    async fn refresh(&self) -> Result<()> {
        eprintln!("{}", t("cli.fetching"));
        let set = self.service.refresh().await?;

        if !set.duplicates.is_empty() {
            eprintln!(
                "{}",
                t("cli.duplicates_dropped").replace("{}", &set.duplicates.join(", "))
            );
        }
        Ok(())
    }

    /// 列出所有配置文件
    async fn list(&self, json: bool, secured_only: bool) -> Result<()> {
        self.refresh().await?;

        let records = if secured_only {
            self.service.secured_only()
        } else {
            self.service.records()
        };

        if json {
            return print_json(&records);
        }

        if records.is_empty() {
            println!("{}", t("cli.no_profiles"));
            return Ok(());
        }

        println!("{}:", t("cli.profile_list"));
        print_table(&records);
        Ok(())
    }

    /// 按名称搜索
    async fn search(&self, query: &str, json: bool) -> Result<()> {
        self.refresh().await?;
        let records = self.service.filter(query);

        if json {
            return print_json(&records);
        }

        if records.is_empty() {
            println!("{}", t("cli.no_matching_profiles").replace("{}", query));
            return Ok(());
        }

        println!("{}", t("cli.search_results").replace("{}", query));
        print_table(&records);
        Ok(())
    }

    /// 显示单个配置文件
    async fn show(&self, name: &str) -> Result<()> {
        self.refresh().await?;

        let record = self
            .service
            .get(name)
            .ok_or_else(|| WifiError::ProfileNotFound {
                name: name.to_string(),
            })?;

        println!("{}", record.share_text());
        Ok(())
    }

    /// 当前连接的网络
    async fn current(&self) -> Result<()> {
        match self.service.current_ssid().await {
            Some(ssid) => println!("{}: {}", t("cli.current_network"), ssid),
            None => println!("{}", t("cli.not_connected")),
        }
        Ok(())
    }

    /// 删除配置文件
    async fn delete(&self, name: &str) -> Result<()> {
        let outcome = self.service.delete(name).await?;

        match outcome.status {
            DeleteStatus::Deleted => {
                println!("✓ {}", t("cli.delete_success").replace("{}", &outcome.name));
                Ok(())
            }
            DeleteStatus::NotFound => Err(WifiError::ProfileNotFound { name: outcome.name }),
            DeleteStatus::Failed => Err(WifiError::DeleteFailed {
                name: outcome.name,
                message: outcome.message,
            }),
        }
    }

    /// 导出为 JSON 文件
    async fn export(&self, path: Option<PathBuf>) -> Result<()> {
        self.refresh().await?;

        let path = path.unwrap_or_else(default_export_path);
        let json = serde_json::to_string_pretty(&self.service.snapshot())?;
        std::fs::write(&path, json)?;

        println!("✓ {}: {}", t("cli.export_success"), path.display());
        Ok(())
    }
}

fn print_json(records: &[WifiRecord]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

fn print_table(records: &[WifiRecord]) {
    let width = records
        .iter()
        .map(|record| display_width(&record.display_name()))
        .max()
        .unwrap_or(0);

    println!("{:-<60}", "");
    for record in records {
        println!("{}", format_record_info(record, width));
    }
    println!("{:-<60}", "");
    println!("{}", t("cli.total").replace("{}", &records.len().to_string()));
}
