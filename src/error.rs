//! 错误处理模块

use std::fmt;
use std::io;

/// 应用程序错误类型
#[derive(Debug)]
pub enum WifiError {
    Io(io::Error),
    /// 外部工具无法启动（不存在或无权限）
    Launch { program: String, source: io::Error },
    /// 外部工具在限定时间内没有退出
    Timeout { program: String, secs: u64 },
    /// 外部工具返回了非零退出码
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },
    InvalidProfileName { name: String },
    ProfileNotFound { name: String },
    DeleteFailed { name: String, message: String },
    ConfigParse(String),
    Serialization(String),
    Runtime(String),
}

impl fmt::Display for WifiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.localized_message())
    }
}

impl std::error::Error for WifiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WifiError::Io(err) => Some(err),
            WifiError::Launch { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for WifiError {
    fn from(err: io::Error) -> Self {
        WifiError::Io(err)
    }
}

impl From<serde_json::Error> for WifiError {
    fn from(err: serde_json::Error) -> Self {
        WifiError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for WifiError {
    fn from(err: serde_yaml::Error) -> Self {
        WifiError::ConfigParse(err.to_string())
    }
}

impl WifiError {
    /// 获取本地化的错误消息
    pub fn localized_message(&self) -> String {
        use crate::i18n::t;

        match self {
            WifiError::Io(err) => format!("{}: {}", t("error.io"), err),
            WifiError::Launch { program, source } => {
                format!("{}: {} ({})", t("error.launch"), program, source)
            }
            WifiError::Timeout { program, secs } => {
                format!("{}: {} ({}s)", t("error.timeout"), program, secs)
            }
            WifiError::CommandFailed {
                command,
                code,
                output,
            } => {
                let code = code.map_or_else(|| "?".to_string(), |c| c.to_string());
                let output = output.trim();
                if output.is_empty() {
                    format!("{}: {} [{}]", t("error.command_failed"), command, code)
                } else {
                    format!(
                        "{}: {} [{}]\n{}",
                        t("error.command_failed"),
                        command,
                        code,
                        output
                    )
                }
            }
            WifiError::InvalidProfileName { name } => {
                format!("{}: '{}'", t("error.invalid_profile_name"), name)
            }
            WifiError::ProfileNotFound { name } => {
                format!("{}: '{}'", t("error.profile_not_found"), name)
            }
            WifiError::DeleteFailed { name, message } => {
                format!(
                    "{}: {}",
                    t("error.delete_failed").replace("{}", name),
                    message.trim()
                )
            }
            WifiError::ConfigParse(msg) => format!("{}: {}", t("error.config_parse"), msg),
            WifiError::Serialization(msg) => format!("{}: {}", t("error.serialization"), msg),
            WifiError::Runtime(msg) => format!("{}: {}", t("error.runtime"), msg),
        }
    }

    /// 是否为外部工具层面的失败（启动失败或超时）
    pub fn is_launch_level(&self) -> bool {
        matches!(self, WifiError::Launch { .. } | WifiError::Timeout { .. })
    }
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, WifiError>;
