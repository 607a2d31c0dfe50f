//! netsh wlan 命令封装
//!
//! 列出配置文件、读取密码、检测当前连接以及删除配置文件。

use crate::decode::TextDecoder;
use crate::error::{Result, WifiError};
use crate::labels::Labels;
use crate::models::{DeleteOutcome, DeleteStatus, Secret};
use crate::parser::{Field, extract_all, extract_field, find_secret_field, split_lines};
use crate::runner::{CommandOutput, CommandRunner};
use crate::utils::validate_profile_name;

/// 无线配置文件客户端
pub struct WlanClient<R> {
    runner: R,
    decoder: TextDecoder,
    labels: Labels,
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| (*p).to_string()).collect()
}

impl<R: CommandRunner> WlanClient<R> {
    /// 使用默认标签和 GBK 备用编码创建客户端
    pub fn new(runner: R) -> Self {
        Self::with_labels(runner, Labels::default())
    }

    pub fn with_labels(runner: R, labels: Labels) -> Self {
        let decoder = TextDecoder::new(labels.decode_markers.clone());
        Self {
            runner,
            decoder,
            labels,
        }
    }

    /// 替换解码器（例如更换备用编码）
    pub fn with_decoder(mut self, decoder: TextDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.runner.program(), args.join(" "))
    }

    /// 运行命令并解码标准输出；stdout 为空时使用 stderr
    fn run_text(&self, args: &[String]) -> Result<(CommandOutput, String)> {
        let output = self.runner.run(args)?;
        let bytes = if output.stdout.is_empty() {
            &output.stderr
        } else {
            &output.stdout
        };
        let text = self.decoder.decode(bytes);
        Ok((output, text))
    }

    /// 列出所有用户配置文件名称，顺序与系统报告一致，保留重复项
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        let args = args(&["wlan", "show", "profiles"]);
        let (output, text) = self.run_text(&args)?;

        if !output.success() {
            return Err(WifiError::CommandFailed {
                command: self.describe(&args),
                code: output.exit_code,
                output: text,
            });
        }

        let names = extract_all(&split_lines(&text), &self.labels.profile);
        log::info!("Found {} saved profiles", names.len());
        Ok(names)
    }

    /// 读取单个配置文件的密码，失败以错误返回
    pub fn try_fetch_secret(&self, name: &str) -> Result<Secret> {
        validate_profile_name(name)?;

        let args = vec![
            "wlan".to_string(),
            "show".to_string(),
            "profile".to_string(),
            format!("name={}", name),
            "key=clear".to_string(),
        ];
        let (output, text) = self.run_text(&args)?;

        if !output.success() {
            return Err(WifiError::CommandFailed {
                command: self.describe(&args),
                code: output.exit_code,
                output: text,
            });
        }

        Ok(match find_secret_field(&split_lines(&text), &self.labels.key_content) {
            Field::Value(secret) => Secret::Revealed(secret),
            Field::Absent => Secret::NoSecret,
            Field::Malformed => Secret::Unparsable,
        })
    }

    /// 读取单个配置文件的密码；任何失败都降级为 [`Secret::Unparsable`]
    pub fn fetch_secret(&self, name: &str) -> Secret {
        match self.try_fetch_secret(name) {
            Ok(secret) => {
                if secret == Secret::Unparsable {
                    log::warn!("Key content of '{}' could not be parsed", name);
                }
                secret
            }
            Err(e) => {
                log::warn!("Failed to query profile '{}': {}", name, e);
                Secret::Unparsable
            }
        }
    }

    /// 当前连接的网络名称；未连接或查询失败时为 None
    pub fn current_ssid(&self) -> Option<String> {
        let args = args(&["wlan", "show", "interfaces"]);
        match self.run_text(&args) {
            Ok((output, text)) if output.success() => {
                let ssid = extract_field(&split_lines(&text), &self.labels.ssid);
                log::debug!("Current SSID: {:?}", ssid);
                ssid
            }
            Ok((output, _)) => {
                log::debug!("Interface query exited with {:?}", output.exit_code);
                None
            }
            Err(e) => {
                log::debug!("Interface query failed: {}", e);
                None
            }
        }
    }

    /// 删除配置文件
    ///
    /// 先看未找到标记，再看退出码，最后确认删除成功标记；
    /// 都不满足时按失败处理，并附带原始输出。
    pub fn delete_profile(&self, name: &str) -> Result<DeleteOutcome> {
        validate_profile_name(name)?;

        let args = vec![
            "wlan".to_string(),
            "delete".to_string(),
            "profile".to_string(),
            format!("name={}", name),
        ];
        let (output, text) = self.run_text(&args)?;

        let status = if self.labels.is_not_found_text(&text) {
            DeleteStatus::NotFound
        } else if !output.success() {
            DeleteStatus::Failed
        } else if self.labels.is_deleted_text(&text) {
            DeleteStatus::Deleted
        } else {
            log::warn!("Unrecognized delete response for '{}'", name);
            DeleteStatus::Failed
        };

        log::info!("Delete profile '{}': {:?}", name, status);

        Ok(DeleteOutcome {
            name: name.to_string(),
            status,
            message: text.trim().to_string(),
        })
    }
}
