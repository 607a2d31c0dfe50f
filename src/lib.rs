//! 本机WiFi密码查看工具库

pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod i18n;
pub mod labels;
pub mod models;
pub mod parser;
pub mod runner;
pub mod service;
pub mod store;
pub mod utils;
pub mod wlan;

// 重新导出常用类型
pub use error::{Result, WifiError};
pub use models::{DeleteOutcome, DeleteStatus, RecordSet, Secret, WifiRecord};
pub use runner::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use service::WifiService;
pub use store::RecordStore;
pub use wlan::WlanClient;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::t;
    use models::strip_active_annotation;

    #[test]
    fn test_wifi_record_new() {
        let record = WifiRecord::new("Home", Secret::NoSecret);
        assert_eq!(record.name, "Home");
        assert_eq!(record.secret, Secret::NoSecret);
        assert!(!record.is_active);
    }

    #[test]
    fn test_display_name_annotation() {
        let mut record = WifiRecord::new("Home", Secret::Revealed("pw".to_string()));
        assert_eq!(record.display_name(), "Home");

        record.is_active = true;
        let shown = record.display_name();
        assert_ne!(shown, "Home");
        assert_eq!(strip_active_annotation(&shown), "Home");
        assert_eq!(strip_active_annotation("Home"), "Home");
    }

    #[test]
    fn test_secret_display_string() {
        assert_eq!(Secret::Revealed("88888888".to_string()).display_string(), "88888888");
        assert_eq!(Secret::NoSecret.display_string(), t("record.no_secret"));
        assert_eq!(Secret::Unparsable.display_string(), t("record.unparsable"));
        assert_ne!(Secret::NoSecret.display_string(), Secret::Unparsable.display_string());
    }

    #[test]
    fn test_share_text() {
        let record = WifiRecord::new("Office", Secret::Revealed("y2".to_string()));
        let text = record.share_text();
        assert!(text.contains("Office"));
        assert!(text.contains("y2"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_matches_query() {
        let record = WifiRecord::new("Office-5G", Secret::NoSecret);
        assert!(record.matches_query("off"));
        assert!(record.matches_query("5g"));
        assert!(!record.matches_query("home"));
    }

    #[test]
    fn test_record_set_order_is_pure() {
        let mut a = WifiRecord::new("A", Secret::NoSecret);
        let b = WifiRecord::new("b", Secret::NoSecret);
        let mut c = WifiRecord::new("C", Secret::NoSecret);
        c.is_active = true;
        a.is_active = false;

        let orders = [
            vec![a.clone(), b.clone(), c.clone()],
            vec![c.clone(), b.clone(), a.clone()],
            vec![b.clone(), a.clone(), c.clone()],
        ];
        for records in orders {
            let set = RecordSet::new(records, Vec::new());
            let names: Vec<&str> = set.records.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["C", "A", "b"]);
        }
    }

    #[test]
    fn test_record_serialization() {
        let mut record = WifiRecord::new("Home", Secret::Revealed("pw".to_string()));
        record.is_active = true;

        let json = serde_json::to_string(&record)
            .unwrap_or_else(|_| panic!("{}", t("error.serialization")));
        assert!(json.contains("\"revealed\""));
        assert!(json.contains("\"is_active\":true"));

        let back: WifiRecord = serde_json::from_str(&json)
            .unwrap_or_else(|_| panic!("{}", t("error.serialization")));
        assert_eq!(back, record);

        let json = serde_json::to_string(&Secret::NoSecret).expect("serializes");
        assert_eq!(json, "{\"state\":\"no_secret\"}");
    }

    #[test]
    fn test_delete_outcome_success() {
        let outcome = DeleteOutcome {
            name: "Home".to_string(),
            status: DeleteStatus::NotFound,
            message: "not found".to_string(),
        };
        assert!(!outcome.is_success());
    }
}
