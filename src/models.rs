//! 数据模型定义

use crate::i18n::{t, texts_for_all_languages};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 配置文件中保存的密码状态
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Secret {
    /// 已取出的明文密码
    Revealed(String),
    /// 该配置文件没有保存密码（开放网络等）
    NoSecret,
    /// 找到了密码行，但无法解析；或者查询本身失败
    Unparsable,
}

impl Secret {
    pub fn is_revealed(&self) -> bool {
        matches!(self, Secret::Revealed(_))
    }

    /// 显示用文本
    pub fn display_string(&self) -> String {
        match self {
            Secret::Revealed(value) => value.clone(),
            Secret::NoSecret => t("record.no_secret"),
            Secret::Unparsable => t("record.unparsable"),
        }
    }
}

/// 一个已保存的WiFi配置文件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WifiRecord {
    /// 系统报告的配置文件名称
    pub name: String,
    pub secret: Secret,
    /// 是否为当前连接的网络
    pub is_active: bool,
}

impl WifiRecord {
    pub fn new(name: impl Into<String>, secret: Secret) -> Self {
        Self {
            name: name.into(),
            secret,
            is_active: false,
        }
    }

    /// 显示用名称，当前连接的网络带有标注
    pub fn display_name(&self) -> String {
        if self.is_active {
            format!("{}{}", self.name, t("record.active_suffix"))
        } else {
            self.name.clone()
        }
    }

    /// 名称和密码，便于分享
    pub fn share_text(&self) -> String {
        format!(
            "{}：{}\n{}：{}",
            t("record.share_name"),
            self.name,
            t("record.share_password"),
            self.secret.display_string()
        )
    }

    /// 名称是否包含查询文本（不区分大小写）
    pub fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// 显示顺序：当前连接的排最前，其余按名称不区分大小写升序
    pub fn display_order(&self, other: &Self) -> Ordering {
        other
            .is_active
            .cmp(&self.is_active)
            .then_with(|| self.name.to_lowercase().cmp(&other.name.to_lowercase()))
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// 去掉显示时追加的 "当前连接" 标注，得到原始名称
pub fn strip_active_annotation(name: &str) -> &str {
    texts_for_all_languages("record.active_suffix")
        .iter()
        .filter(|suffix| !suffix.is_empty())
        .find_map(|suffix| name.strip_suffix(suffix.as_str()))
        .unwrap_or(name)
}

/// 按显示顺序排列
pub fn arrange(records: &mut [WifiRecord]) {
    records.sort_by(WifiRecord::display_order);
}

/// 一次完整获取得到的记录集合
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordSet {
    pub records: Vec<WifiRecord>,
    /// 系统重复报告、已被丢弃的配置文件名称
    pub duplicates: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

impl RecordSet {
    /// 由任意顺序的记录构造，并整理为显示顺序
    pub fn new(mut records: Vec<WifiRecord>, duplicates: Vec<String>) -> Self {
        arrange(&mut records);
        Self {
            records,
            duplicates,
            fetched_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::empty()
    }
}

/// 删除结果分类
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStatus {
    Deleted,
    NotFound,
    /// 退出码非零或输出无法判断
    Failed,
}

/// 删除配置文件的结果，始终携带外部工具的原始输出
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub name: String,
    pub status: DeleteStatus,
    pub message: String,
}

impl DeleteOutcome {
    pub fn is_success(&self) -> bool {
        self.status == DeleteStatus::Deleted
    }
}
