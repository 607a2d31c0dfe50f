//! netsh 输出中的标签文本
//!
//! netsh 的输出语言随系统区域设置变化，同一字段可能以中文或英文出现。
//! 所有标签都集中在这里，配置文件里的 `extra_labels` 只能追加，不会替换内置值。

use serde::{Deserialize, Serialize};

/// 内置的 "所有用户配置文件" 标签
pub const PROFILE_LABELS: &[&str] = &["All User Profile", "所有用户配置文件"];

/// 内置的 "关键内容"（密码）标签
pub const KEY_CONTENT_LABELS: &[&str] = &["Key Content", "关键内容"];

/// 内置的 SSID 标签
pub const SSID_LABELS: &[&str] = &["SSID"];

/// 删除成功时输出中出现的文本
pub const DELETED_MARKERS: &[&str] = &["is deleted from interface", "中删除配置文件"];

/// 配置文件不存在时输出中出现的文本
pub const NOT_FOUND_MARKERS: &[&str] = &["is not found on any interface", "找不到配置文件"];

/// 任何正常的 netsh wlan 输出中至少会出现其中之一，用于判断解码是否正确
pub const DECODE_MARKERS: &[&str] = &[
    "Profile",
    "profile",
    "interface",
    "Interface",
    "配置文件",
    "接口",
];

/// 用户在配置文件中追加的标签
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraLabels {
    pub profile: Vec<String>,
    pub key_content: Vec<String>,
    pub ssid: Vec<String>,
    pub deleted: Vec<String>,
    pub not_found: Vec<String>,
    pub decode_markers: Vec<String>,
}

/// 全部生效的标签集合
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    pub profile: Vec<String>,
    pub key_content: Vec<String>,
    pub ssid: Vec<String>,
    pub deleted: Vec<String>,
    pub not_found: Vec<String>,
    pub decode_markers: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn append_unique(target: &mut Vec<String>, extra: &[String]) {
    for value in extra {
        let value = value.trim();
        if !value.is_empty() && !target.iter().any(|v| v == value) {
            target.push(value.to_string());
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            profile: owned(PROFILE_LABELS),
            key_content: owned(KEY_CONTENT_LABELS),
            ssid: owned(SSID_LABELS),
            deleted: owned(DELETED_MARKERS),
            not_found: owned(NOT_FOUND_MARKERS),
            decode_markers: owned(DECODE_MARKERS),
        }
    }
}

impl Labels {
    /// 在内置标签的基础上追加用户配置的标签
    pub fn with_extra(mut self, extra: &ExtraLabels) -> Self {
        append_unique(&mut self.profile, &extra.profile);
        append_unique(&mut self.key_content, &extra.key_content);
        append_unique(&mut self.ssid, &extra.ssid);
        append_unique(&mut self.deleted, &extra.deleted);
        append_unique(&mut self.not_found, &extra.not_found);
        append_unique(&mut self.decode_markers, &extra.decode_markers);
        self
    }

    /// 文本中是否出现任一删除成功标记
    pub fn is_deleted_text(&self, text: &str) -> bool {
        self.deleted.iter().any(|m| text.contains(m.as_str()))
    }

    /// 文本中是否出现任一未找到标记
    pub fn is_not_found_text(&self, text: &str) -> bool {
        self.not_found.iter().any(|m| text.contains(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_labels_append() {
        let extra = ExtraLabels {
            key_content: vec!["Schlüsselinhalt".to_string(), "Key Content".to_string()],
            ..Default::default()
        };

        let labels = Labels::default().with_extra(&extra);
        assert_eq!(
            labels.key_content,
            vec!["Key Content", "关键内容", "Schlüsselinhalt"]
        );
        assert_eq!(labels.profile, Labels::default().profile);
    }

    #[test]
    fn test_blank_extra_labels_ignored() {
        let extra = ExtraLabels {
            ssid: vec!["   ".to_string()],
            ..Default::default()
        };
        assert_eq!(Labels::default().with_extra(&extra).ssid, vec!["SSID"]);
    }

    #[test]
    fn test_delete_markers() {
        let labels = Labels::default();
        assert!(labels.is_deleted_text("已从接口“WLAN”中删除配置文件“Home”。"));
        assert!(labels.is_deleted_text("Profile \"Home\" is deleted from interface \"Wi-Fi\"."));
        assert!(labels.is_not_found_text("任何接口上都找不到配置文件“Home”。"));
        assert!(labels.is_not_found_text("Profile \"Home\" is not found on any interface."));
        assert!(!labels.is_deleted_text("任何接口上都找不到配置文件“Home”。"));
    }
}
