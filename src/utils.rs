//! 工具函数模块

use crate::error::{Result, WifiError};
use crate::i18n::t;
use crate::models::WifiRecord;
use std::path::PathBuf;

/// 应用目录名
const APP_DIR: &str = "wifi-viewer";

/// 获取配置文件路径（不创建目录）
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| WifiError::ConfigParse(t("error.config_dir")))?;

    Ok(config_dir.join(APP_DIR).join("config.yaml"))
}

/// 默认导出文件名，带时间戳
pub fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "wifi-profiles-{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// 默认并发数：CPU 核数 + 4，最多 32
pub fn default_concurrency() -> usize {
    let cpus = std::thread::available_parallelism().map_or(1, usize::from);
    (cpus + 4).min(32)
}

/// 验证配置文件名称
pub fn validate_profile_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name.chars().any(char::is_control) {
        return Err(WifiError::InvalidProfileName {
            name: name.escape_debug().to_string(),
        });
    }

    Ok(())
}

/// 格式化单条记录用于列表显示
pub fn format_record_info(record: &WifiRecord, width: usize) -> String {
    let name = record.display_name();
    let pad = width.saturating_sub(display_width(&name));
    format!("{}{}  {}", name, " ".repeat(pad), record.secret.display_string())
}

/// 终端显示宽度，中日韩字符按两列计算
pub fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| match u32::from(c) {
            0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6 => 2,
            _ => 1,
        })
        .sum()
}
