//! 并发获取所有配置文件的密码
//!
//! 一次获取周期：列出配置文件 → 受限并发地读取每个密码 → 检测当前连接 → 生成记录集合。
//! 每个 netsh 调用都是阻塞的，放在 `spawn_blocking` 上执行；同时在途的调用数
//! 由 `max_concurrency` 限制，与配置文件数量无关。

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::error::{Result, WifiError};
use crate::models::{RecordSet, Secret, WifiRecord};
use crate::runner::CommandRunner;
use crate::wlan::WlanClient;

async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| WifiError::Runtime(e.to_string()))
}

/// 按名称并发读取密码，返回结果与输入一一对应
pub async fn fetch_secrets<R>(
    client: Arc<WlanClient<R>>,
    names: &[String],
    max_concurrency: usize,
) -> Vec<Secret>
where
    R: CommandRunner + 'static,
{
    let completed: Vec<(usize, Secret)> = stream::iter(names.iter().cloned().enumerate())
        .map(|(index, name)| {
            let client = Arc::clone(&client);
            async move {
                let label = name.clone();
                let secret = blocking(move || client.fetch_secret(&name))
                    .await
                    .unwrap_or_else(|e| {
                        log::warn!("Worker for '{}' did not finish: {}", label, e);
                        Secret::Unparsable
                    });
                (index, secret)
            }
        })
        .buffer_unordered(max_concurrency.max(1))
        .collect()
        .await;

    let mut secrets: Vec<Option<Secret>> = vec![None; names.len()];
    for (index, secret) in completed {
        if let Some(slot) = secrets.get_mut(index) {
            *slot = Some(secret);
        }
    }

    secrets
        .into_iter()
        .map(|secret| secret.unwrap_or(Secret::Unparsable))
        .collect()
}

/// 合并名称与密码，重复名称保留第一次出现的那一条
pub fn merge(
    names: Vec<String>,
    secrets: Vec<Secret>,
    active_ssid: Option<&str>,
) -> RecordSet {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(names.len());
    let mut duplicates = Vec::new();

    for (name, secret) in names.into_iter().zip(secrets) {
        if !seen.insert(name.clone()) {
            log::warn!("Profile '{}' reported more than once, keeping the first", name);
            duplicates.push(name);
            continue;
        }

        let mut record = WifiRecord::new(name, secret);
        record.is_active = active_ssid.is_some_and(|ssid| ssid == record.name);
        records.push(record);
    }

    RecordSet::new(records, duplicates)
}

/// 执行一次完整的获取周期
///
/// 只有列出配置文件失败时整个周期才失败；单个配置文件的失败
/// 只会让该条记录变为 [`Secret::Unparsable`]。
pub async fn run_fetch_cycle<R>(
    client: Arc<WlanClient<R>>,
    max_concurrency: usize,
) -> Result<RecordSet>
where
    R: CommandRunner + 'static,
{
    let lister = Arc::clone(&client);
    let names = blocking(move || lister.list_profiles()).await??;

    let secrets = fetch_secrets(Arc::clone(&client), &names, max_concurrency).await;

    let detector = Arc::clone(&client);
    let active = blocking(move || detector.current_ssid())
        .await
        .unwrap_or_else(|e| {
            log::debug!("Interface detection did not finish: {}", e);
            None
        });

    let set = merge(names, secrets, active.as_deref());
    log::info!(
        "Fetch cycle finished: {} records, {} duplicates, active: {}",
        set.len(),
        set.duplicates.len(),
        active.is_some()
    );
    Ok(set)
}
