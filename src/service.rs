//! 面向前端的服务对象
//!
//! 前端只持有 [`WifiService`]，通过它读取、过滤、刷新和删除记录。
//! 获取周期与删除操作共用一个操作锁，同一时刻只有一个在执行；
//! 读取操作不经过该锁，看到的始终是最近一次完整提交的集合。

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex;

use crate::error::{Result, WifiError};
use crate::fetch::run_fetch_cycle;
use crate::models::{DeleteOutcome, RecordSet, WifiRecord};
use crate::runner::CommandRunner;
use crate::store::RecordStore;
use crate::wlan::WlanClient;

/// WiFi 配置文件服务
pub struct WifiService<R> {
    client: Arc<WlanClient<R>>,
    store: RwLock<RecordStore>,
    operations: Mutex<()>,
    max_concurrency: usize,
}

impl<R: CommandRunner + 'static> WifiService<R> {
    pub fn new(client: WlanClient<R>, max_concurrency: usize) -> Self {
        Self {
            client: Arc::new(client),
            store: RwLock::new(RecordStore::new()),
            operations: Mutex::new(()),
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    fn read(&self) -> RwLockReadGuard<'_, RecordStore> {
        self.store
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RecordStore> {
        self.store
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 执行一次获取周期并整体提交；失败时保留原有记录
    pub async fn refresh(&self) -> Result<RecordSet> {
        let _guard = self.operations.lock().await;

        let set = run_fetch_cycle(Arc::clone(&self.client), self.max_concurrency).await?;
        self.write().replace(set.clone());
        Ok(set)
    }

    /// 当前全部记录（显示顺序）
    pub fn records(&self) -> Vec<WifiRecord> {
        self.read().records().to_vec()
    }

    /// 当前记录集合的快照
    pub fn snapshot(&self) -> RecordSet {
        self.read().record_set().clone()
    }

    pub fn filter(&self, query: &str) -> Vec<WifiRecord> {
        self.read().filter(query)
    }

    pub fn secured_only(&self) -> Vec<WifiRecord> {
        self.read().secured_only()
    }

    pub fn get(&self, name: &str) -> Option<WifiRecord> {
        self.read().get(name).cloned()
    }

    pub fn active(&self) -> Option<WifiRecord> {
        self.read().active().cloned()
    }

    /// 查询当前连接的网络名称
    pub async fn current_ssid(&self) -> Option<String> {
        let detector = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || detector.current_ssid())
            .await
            .unwrap_or_default()
    }

    /// 删除配置文件
    ///
    /// 成功后只移除对应记录；若删除的是当前连接的网络，重新查询一次当前连接并更新标记。
    pub async fn delete(&self, name: &str) -> Result<DeleteOutcome> {
        let _guard = self.operations.lock().await;

        // 只有能在当前集合中找到时才按显示名解析，否则原样交给 netsh
        let name = self
            .read()
            .get(name)
            .map_or_else(|| name.to_string(), |record| record.name.clone());
        let deleter = Arc::clone(&self.client);
        let target = name.clone();
        let outcome = tokio::task::spawn_blocking(move || deleter.delete_profile(&target))
            .await
            .map_err(|e| WifiError::Runtime(e.to_string()))??;

        if !outcome.is_success() {
            return Ok(outcome);
        }

        let was_active = {
            let mut store = self.write();
            let was_active = store.get(&name).is_some_and(|record| record.is_active);
            store.remove(&name);
            was_active
        };

        if was_active {
            let ssid = self.current_ssid().await;
            self.write().mark_active(ssid.as_deref());
        }

        Ok(outcome)
    }
}
