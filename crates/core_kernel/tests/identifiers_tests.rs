//! Tests for rule-table and lead identifiers

use core_kernel::identifiers::IdentifierError;
use core_kernel::{LeadId, RuleTableVersion};
use std::collections::BTreeSet;
use uuid::Uuid;

mod codes {
    use super::*;

    #[test]
    fn test_version_parses() {
        let version: RuleTableVersion = "standard-2025".parse().unwrap();
        assert_eq!(version.as_str(), "standard-2025");
    }

    #[test]
    fn test_version_rejects_whitespace() {
        assert!(matches!(
            RuleTableVersion::new("standard 2025"),
            Err(IdentifierError::Invalid { kind: "rule table version", .. })
        ));
    }

    #[test]
    fn test_versions_are_ordered() {
        let versions: BTreeSet<RuleTableVersion> = ["2025-q2", "2024-q4", "2025-q1"]
            .iter()
            .map(|v| RuleTableVersion::new(*v).unwrap())
            .collect();
        let ordered: Vec<&str> = versions.iter().map(|v| v.as_str()).collect();
        assert_eq!(ordered, vec!["2024-q4", "2025-q1", "2025-q2"]);
    }

    #[test]
    fn test_version_into_string() {
        let version = RuleTableVersion::new("standard-2025").unwrap();
        let s: String = version.into();
        assert_eq!(s, "standard-2025");
    }
}

mod lead_ids {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(LeadId::new(), LeadId::new());
        assert_ne!(LeadId::new_v7(), LeadId::new_v7());
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let uuid = Uuid::new_v4();
        let with_prefix: LeadId = format!("LEAD-{}", uuid).parse().unwrap();
        let without: LeadId = uuid.to_string().parse().unwrap();

        assert_eq!(with_prefix, without);
        assert_eq!(with_prefix.as_uuid(), &uuid);
        assert_eq!(LeadId::prefix(), "LEAD");
    }

    #[test]
    fn test_invalid_uuid_rejected() {
        assert!("LEAD-not-a-uuid".parse::<LeadId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let uuid = Uuid::new_v4();
        let id = LeadId::from_uuid(uuid);
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            format!("\"{}\"", uuid)
        );
    }
}
