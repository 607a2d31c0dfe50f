//! 当前记录集合

use crate::models::{RecordSet, WifiRecord, arrange, strip_active_annotation};

/// 保存最近一次获取到的记录集合
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    set: RecordSet,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 整体替换为新一轮获取的结果
    pub fn replace(&mut self, set: RecordSet) {
        self.set = set;
    }

    pub fn record_set(&self) -> &RecordSet {
        &self.set
    }

    /// 按显示顺序返回全部记录
    pub fn records(&self) -> &[WifiRecord] {
        &self.set.records
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// 名称包含查询文本的记录（不区分大小写），查询为空白时返回全部
    pub fn filter(&self, query: &str) -> Vec<WifiRecord> {
        let query = query.trim();
        if query.is_empty() {
            return self.set.records.clone();
        }

        self.set
            .records
            .iter()
            .filter(|record| record.matches_query(query))
            .cloned()
            .collect()
    }

    /// 只保留已取出密码的记录
    pub fn secured_only(&self) -> Vec<WifiRecord> {
        self.set
            .records
            .iter()
            .filter(|record| record.secret.is_revealed())
            .cloned()
            .collect()
    }

    /// 名称对应的下标
    ///
    /// 先按原样精确匹配；找不到时才把名称当作带 "当前连接" 标注的显示名，
    /// 且去掉标注后只能对应当前连接的那一条记录。
    fn position(&self, name: &str) -> Option<usize> {
        let records = &self.set.records;
        if let Some(index) = records.iter().position(|record| record.name == name) {
            return Some(index);
        }

        let stripped = strip_active_annotation(name);
        if stripped == name {
            return None;
        }
        records
            .iter()
            .position(|record| record.is_active && record.name == stripped)
    }

    /// 按名称查找（也接受当前连接记录的显示名）
    pub fn get(&self, name: &str) -> Option<&WifiRecord> {
        self.position(name).map(|index| &self.set.records[index])
    }

    /// 当前连接的记录
    pub fn active(&self) -> Option<&WifiRecord> {
        self.set.records.iter().find(|record| record.is_active)
    }

    /// 删除第一条名称匹配的记录，返回是否删除
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.set.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// 重新标记当前连接的记录，并恢复显示顺序
    pub fn mark_active(&mut self, ssid: Option<&str>) {
        for record in &mut self.set.records {
            record.is_active = ssid.is_some_and(|ssid| ssid == record.name);
        }
        arrange(&mut self.set.records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::t;
    use crate::models::Secret;

    fn store(names: &[&str], active: Option<&str>) -> RecordStore {
        let records = names
            .iter()
            .map(|name| {
                let mut record = WifiRecord::new(*name, Secret::Revealed(format!("pw-{}", name)));
                record.is_active = active == Some(*name);
                record
            })
            .collect();
        let mut store = RecordStore::new();
        store.replace(RecordSet::new(records, Vec::new()));
        store
    }

    fn names(records: &[WifiRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_records_sorted_case_insensitive() {
        let store = store(&["Office", "bAlpha", "Home"], None);
        assert_eq!(names(store.records()), vec!["bAlpha", "Home", "Office"]);
    }

    #[test]
    fn test_filter_blank_returns_everything() {
        let store = store(&["Home", "Office", "bAlpha"], Some("Office"));
        assert_eq!(store.filter(""), store.records().to_vec());
        assert_eq!(store.filter("   "), store.records().to_vec());
    }

    #[test]
    fn test_filter_is_case_insensitive_and_idempotent() {
        let store = store(&["Home", "Office", "bAlpha", "office-5G"], None);

        let once = store.filter("OFF");
        assert_eq!(names(&once), vec!["Office", "office-5G"]);

        let mut again = RecordStore::new();
        again.replace(RecordSet::new(once.clone(), Vec::new()));
        assert_eq!(again.filter("OFF"), once);

        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_remove() {
        let mut store = store(&["Home", "Office", "bAlpha"], None);

        assert!(store.remove("Office"));
        assert_eq!(store.len(), 2);
        assert!(store.get("Office").is_none());

        assert!(!store.remove("Office"));
        assert!(!store.remove("Nowhere"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_strips_active_annotation() {
        let mut store = store(&["Home", "Office"], Some("Home"));
        let shown = store.records()[0].display_name();
        assert_eq!(shown, format!("Home{}", t("record.active_suffix")));

        assert!(store.remove(&shown));
        assert_eq!(names(store.records()), vec!["Office"]);
    }

    #[test]
    fn test_annotated_name_prefers_exact_record() {
        let mut store = store(&["Cafe", "Cafe [connected]"], None);

        assert_eq!(
            store.get("Cafe [connected]").map(|r| r.name.as_str()),
            Some("Cafe [connected]")
        );
        assert!(store.remove("Cafe [connected]"));
        assert_eq!(names(store.records()), vec!["Cafe"]);

        // 去掉标注后的名称不是当前连接，不能被当作显示名
        assert!(store.get("Cafe [connected]").is_none());
        assert!(!store.remove("Cafe【当前连接的WiFi】"));
        assert_eq!(names(store.records()), vec!["Cafe"]);
    }

    #[test]
    fn test_mark_active_repins() {
        let mut store = store(&["A", "B", "C"], Some("A"));
        assert_eq!(store.active().map(|r| r.name.as_str()), Some("A"));

        store.mark_active(Some("C"));
        assert_eq!(names(store.records()), vec!["C", "A", "B"]);
        assert_eq!(store.records().iter().filter(|r| r.is_active).count(), 1);

        store.mark_active(None);
        assert_eq!(names(store.records()), vec!["A", "B", "C"]);
        assert!(store.active().is_none());
    }

    #[test]
    fn test_secured_only() {
        let mut store = store(&["Home"], None);
        let mut records = store.records().to_vec();
        records.push(WifiRecord::new("Open", Secret::NoSecret));
        records.push(WifiRecord::new("Odd", Secret::Unparsable));
        store.replace(RecordSet::new(records, Vec::new()));

        assert_eq!(names(&store.secured_only()), vec!["Home"]);
    }
}
