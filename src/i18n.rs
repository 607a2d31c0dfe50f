//! 国际化模块
//!
//! 中英文界面文本，翻译内容保存在 `locales/*.yaml` 中并在编译期嵌入

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::sync::{Mutex, MutexGuard};

lazy_static::lazy_static! {
    static ref I18N_INSTANCE: Mutex<I18n> = Mutex::new(I18n::new());
}

/// 语言环境变量
pub const LANG_ENV: &str = "WIFI_VIEWER_LANG";

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Chinese,
    English,
}

impl Language {
    /// 获取语言代码
    pub fn code(&self) -> &'static str {
        match self {
            Language::Chinese => "zh",
            Language::English => "en",
        }
    }

    /// 获取语言名称
    pub fn name(&self) -> &'static str {
        match self {
            Language::Chinese => "中文",
            Language::English => "English",
        }
    }

    /// 从语言代码解析
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "zh" | "zh_cn" | "zh_tw" | "zh-cn" | "chinese" => Some(Language::Chinese),
            "en" | "en_us" | "en_gb" | "en-us" | "english" => Some(Language::English),
            _ => None,
        }
    }

    /// 获取所有支持的语言
    pub fn all() -> Vec<Language> {
        vec![Language::Chinese, Language::English]
    }

    /// 从环境变量检测语言
    pub fn from_env() -> Self {
        if let Some(lang) = env::var(LANG_ENV).ok().and_then(|v| Self::from_code(&v)) {
            return lang;
        }

        let env_vars = ["LC_ALL", "LC_MESSAGES", "LANG", "LANGUAGE"];
        for var in &env_vars {
            if let Ok(env_value) = env::var(var) {
                // en_US.UTF-8 -> en
                let lang_part = env_value.split(['_', '.', '-']).next().unwrap_or("");
                if let Some(lang) = Self::from_code(lang_part) {
                    return lang;
                }
            }
        }

        Language::Chinese
    }

    fn source(&self) -> &'static str {
        match self {
            Language::Chinese => include_str!("../locales/zh.yaml"),
            Language::English => include_str!("../locales/en.yaml"),
        }
    }
}

/// 把嵌套的YAML映射展开为 `section.key` 形式
fn flatten_into(prefix: &str, value: &serde_yaml::Value, out: &mut HashMap<String, String>) {
    let Some(mapping) = value.as_mapping() else {
        return;
    };

    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            continue;
        };
        let full_key = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            serde_yaml::Value::String(text) => {
                out.insert(full_key, text.clone());
            }
            serde_yaml::Value::Mapping(_) => flatten_into(&full_key, value, out),
            _ => {}
        }
    }
}

fn load_translations(lang: Language) -> HashMap<String, String> {
    let mut translations = HashMap::new();
    match serde_yaml::from_str::<serde_yaml::Value>(lang.source()) {
        Ok(root) => flatten_into("", &root, &mut translations),
        Err(e) => log::error!("Failed to parse {} locale: {}", lang.code(), e),
    }
    translations
}

/// 国际化管理器
pub struct I18n {
    current_language: Language,
    cache: HashMap<Language, HashMap<String, String>>,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

impl I18n {
    /// 创建新的国际化管理器
    pub fn new() -> Self {
        Self {
            current_language: Language::from_env(),
            cache: HashMap::new(),
        }
    }

    /// 设置当前语言
    pub fn set_language(&mut self, language: Language) {
        self.current_language = language;
    }

    /// 获取当前语言
    pub fn current_language(&self) -> Language {
        self.current_language
    }

    fn lookup(&mut self, language: Language, key: &str) -> Option<String> {
        self.cache
            .entry(language)
            .or_insert_with(|| load_translations(language))
            .get(key)
            .cloned()
    }

    /// 获取翻译文本，依次回退到英文、中文，最后返回键本身
    pub fn get_text(&mut self, key: &str) -> String {
        let mut order = vec![self.current_language];
        for fallback in [Language::English, Language::Chinese] {
            if !order.contains(&fallback) {
                order.push(fallback);
            }
        }

        order
            .into_iter()
            .find_map(|language| self.lookup(language, key))
            .unwrap_or_else(|| key.to_string())
    }

    /// 列出缺失的翻译（以英文为基准）
    pub fn list_missing_translations(&mut self, language: Language) -> Vec<String> {
        let base: Vec<String> = self
            .cache
            .entry(Language::English)
            .or_insert_with(|| load_translations(Language::English))
            .keys()
            .cloned()
            .collect();
        let target = self
            .cache
            .entry(language)
            .or_insert_with(|| load_translations(language));

        let mut missing: Vec<String> = base
            .into_iter()
            .filter(|key| !target.contains_key(key))
            .collect();
        missing.sort();
        missing
    }
}

fn instance() -> MutexGuard<'static, I18n> {
    I18N_INSTANCE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 全局翻译函数
pub fn t(key: &str) -> String {
    instance().get_text(key)
}

/// 获取当前语言
pub fn current_language() -> Language {
    instance().current_language()
}

/// 设置当前语言
pub fn set_language(language: Language) {
    instance().set_language(language);
}

/// 某个键在所有支持语言下的翻译
pub fn texts_for_all_languages(key: &str) -> Vec<String> {
    let mut guard = instance();
    Language::all()
        .into_iter()
        .filter_map(|language| guard.lookup(language, key))
        .collect()
}

/// 列出缺失的翻译
pub fn list_missing_translations(language: Language) -> Vec<String> {
    instance().list_missing_translations(language)
}
