//! 应用配置
//!
//! 优先级：命令行参数 > 环境变量 > 配置文件 > 默认值。

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::decode::TextDecoder;
use crate::error::{Result, WifiError};
use crate::i18n::t;
use crate::labels::{ExtraLabels, Labels};
use crate::runner::{DEFAULT_PROGRAM, SystemCommandRunner};
use crate::utils::{default_concurrency, get_config_path};
use crate::wlan::WlanClient;

pub const CONCURRENCY_ENV: &str = "WIFI_VIEWER_CONCURRENCY";
pub const TIMEOUT_ENV: &str = "WIFI_VIEWER_TIMEOUT";

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_fallback_encoding() -> String {
    "gbk".to_string()
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 外部工具
    #[serde(default = "default_program")]
    pub program: String,
    /// 同时执行的外部调用上限
    #[serde(default = "default_concurrency")]
    pub max_concurrency: usize,
    /// 单次外部调用的超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub command_timeout_secs: u64,
    /// UTF-8 解码不可用时的备用编码
    #[serde(default = "default_fallback_encoding")]
    pub fallback_encoding: String,
    /// 界面语言（zh / en）
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub extra_labels: ExtraLabels,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            max_concurrency: default_concurrency(),
            command_timeout_secs: default_timeout_secs(),
            fallback_encoding: default_fallback_encoding(),
            language: None,
            extra_labels: ExtraLabels::default(),
        }
    }
}

fn parse_positive(name: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(WifiError::ConfigParse(format!(
            "{}: {}={}",
            t("error.invalid_number"),
            name,
            value
        ))),
    }
}

impl AppConfig {
    /// 从默认位置加载，文件不存在时使用默认值，然后应用环境变量
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;
        let mut config = Self::from_file(&path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 从指定文件加载
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// 用环境变量覆盖配置
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(CONCURRENCY_ENV) {
            self.max_concurrency = usize::try_from(parse_positive(CONCURRENCY_ENV, &value)?)
                .map_err(|e| WifiError::ConfigParse(e.to_string()))?;
        }

        if let Some(value) = lookup(TIMEOUT_ENV) {
            self.command_timeout_secs = parse_positive(TIMEOUT_ENV, &value)?;
        }

        if let Some(value) = lookup(crate::i18n::LANG_ENV) {
            self.language = Some(value);
        }

        Ok(())
    }

    /// 检查配置取值
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(WifiError::ConfigParse(format!(
                "{}: max_concurrency=0",
                t("error.invalid_number")
            )));
        }

        if self.command_timeout_secs == 0 {
            return Err(WifiError::ConfigParse(format!(
                "{}: command_timeout_secs=0",
                t("error.invalid_number")
            )));
        }

        if self.program.trim().is_empty() {
            return Err(WifiError::ConfigParse(t("error.empty_program")));
        }

        self.decoder()?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// 内置标签加上配置中追加的标签
    pub fn labels(&self) -> Labels {
        Labels::default().with_extra(&self.extra_labels)
    }

    pub fn decoder(&self) -> Result<TextDecoder> {
        TextDecoder::new(self.labels().decode_markers).with_fallback_label(&self.fallback_encoding)
    }

    /// 按配置构建调用真实 netsh 的客户端
    pub fn build_client(&self) -> Result<WlanClient<SystemCommandRunner>> {
        let runner = SystemCommandRunner::new(self.program.clone(), self.timeout());
        Ok(WlanClient::with_labels(runner, self.labels()).with_decoder(self.decoder()?))
    }
}
