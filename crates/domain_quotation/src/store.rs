//! Rule-table snapshots
//!
//! Hosting services keep every installed rule-table version in a
//! [`RuleTableStore`]. Readers take an `Arc<RuleTable>` snapshot and compute
//! against it; writers replace the whole version set atomically, so a
//! computation never observes a partially updated table.

use arc_swap::ArcSwap;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use core_kernel::RuleTableVersion;
use crate::loader::{RuleTableLoader, RulesError};
use crate::rule_table::RuleTable;

/// Errors raised by the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown rule table version: {0}")]
    UnknownVersion(RuleTableVersion),

    #[error("No active rule table installed")]
    NoActiveTable,

    #[error(transparent)]
    Load(#[from] RulesError),
}

/// Coexisting rule-table versions plus the one served by default
#[derive(Debug, Clone, Default)]
pub struct RuleTableSet {
    active: Option<RuleTableVersion>,
    tables: BTreeMap<RuleTableVersion, Arc<RuleTable>>,
}

impl RuleTableSet {
    pub fn active_version(&self) -> Option<&RuleTableVersion> {
        self.active.as_ref()
    }

    pub fn get(&self, version: &RuleTableVersion) -> Option<&Arc<RuleTable>> {
        self.tables.get(version)
    }

    /// Installed versions in ascending order
    pub fn versions(&self) -> impl Iterator<Item = &RuleTableVersion> {
        self.tables.keys()
    }

    fn with_table(&self, table: Arc<RuleTable>, activate: bool) -> Self {
        let mut next = self.clone();
        let version = table.version().clone();
        if activate || next.active.is_none() {
            next.active = Some(version.clone());
        }
        next.tables.insert(version, table);
        next
    }
}

/// Lock-free holder of the current [`RuleTableSet`]
#[derive(Debug, Default)]
pub struct RuleTableStore {
    current: ArcSwap<RuleTableSet>,
}

impl RuleTableStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store serving `table`
    pub fn with_active(table: RuleTable) -> Self {
        let store = Self::new();
        store.install(table, true);
        store
    }

    /// Returns one consistent snapshot of the requested version, or of the
    /// active version when `version` is `None`.
    pub fn snapshot(&self, version: Option<&RuleTableVersion>) -> Result<Arc<RuleTable>, StoreError> {
        let set = self.current.load();
        let wanted = match version {
            Some(v) => v,
            None => set.active_version().ok_or(StoreError::NoActiveTable)?,
        };
        set.get(wanted)
            .cloned()
            .ok_or_else(|| StoreError::UnknownVersion(wanted.clone()))
    }

    /// Installs a table, replacing any table with the same version.
    ///
    /// The first table installed becomes active regardless of `activate`.
    pub fn install(&self, table: RuleTable, activate: bool) -> RuleTableVersion {
        let version = table.version().clone();
        let table = Arc::new(table);
        self.current
            .rcu(|set| set.with_table(Arc::clone(&table), activate));

        info!(version = %version, activate, "Installed rule table");
        version
    }

    /// Makes an installed version the default
    pub fn activate(&self, version: &RuleTableVersion) -> Result<(), StoreError> {
        let mut found = false;
        self.current.rcu(|set| {
            found = set.tables.contains_key(version);
            if found {
                let mut next = RuleTableSet::clone(set);
                next.active = Some(version.clone());
                Arc::new(next)
            } else {
                Arc::clone(set)
            }
        });

        if !found {
            return Err(StoreError::UnknownVersion(version.clone()));
        }
        info!(version = %version, "Activated rule table");
        Ok(())
    }

    /// Loads a table file, installs it and makes it active
    pub fn reload_from_file(&self, path: impl AsRef<Path>) -> Result<RuleTableVersion, StoreError> {
        let table = RuleTableLoader::from_file(path)?;
        Ok(self.install(table, true))
    }

    pub fn active_version(&self) -> Option<RuleTableVersion> {
        self.current.load().active_version().cloned()
    }

    pub fn versions(&self) -> Vec<RuleTableVersion> {
        self.current.load().versions().cloned().collect()
    }

    /// True once an active table is installed
    pub fn is_ready(&self) -> bool {
        self.current.load().active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::Currency;
    use crate::rule_table::RuleTableMetadata;

    fn table(version: &str) -> RuleTable {
        RuleTable::builder(RuleTableMetadata {
            version: RuleTableVersion::new(version).unwrap(),
            currency: Currency::AED,
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            description: None,
        })
        .build()
        .unwrap()
    }

    fn v(s: &str) -> RuleTableVersion {
        RuleTableVersion::new(s).unwrap()
    }

    #[test]
    fn test_empty_store_is_not_ready() {
        let store = RuleTableStore::new();
        assert!(!store.is_ready());
        assert!(matches!(store.snapshot(None), Err(StoreError::NoActiveTable)));
    }

    #[test]
    fn test_first_install_becomes_active() {
        let store = RuleTableStore::new();
        store.install(table("a"), false);
        store.install(table("b"), false);

        assert_eq!(store.active_version(), Some(v("a")));
        assert_eq!(store.versions(), vec![v("a"), v("b")]);
        assert_eq!(store.snapshot(Some(&v("b"))).unwrap().version(), &v("b"));
    }

    #[test]
    fn test_activate() {
        let store = RuleTableStore::with_active(table("a"));
        store.install(table("b"), false);

        store.activate(&v("b")).unwrap();
        assert_eq!(store.snapshot(None).unwrap().version(), &v("b"));

        assert!(matches!(
            store.activate(&v("c")),
            Err(StoreError::UnknownVersion(_))
        ));
        assert_eq!(store.active_version(), Some(v("b")));
    }

    #[test]
    fn test_snapshot_survives_swap() {
        let store = RuleTableStore::with_active(table("a"));
        let held = store.snapshot(None).unwrap();

        store.install(table("b"), true);

        assert_eq!(held.version(), &v("a"));
        assert_eq!(store.snapshot(None).unwrap().version(), &v("b"));
    }
}
