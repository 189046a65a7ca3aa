//! Persisted grid state
//!
//! Three JSON arrays live in the key-value store:
//! - opened doors (set of entry indices)
//! - display order (list of entry indices)
//! - retired champions (set of entry indices)
//!
//! Nothing here fails loudly. Unavailable storage and malformed stored JSON are
//! logged and read back as empty collections; failed writes are dropped.

pub mod store;

pub use store::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::StorageKeys;
use crate::error::ImportError;

/// Everything the export file contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub opened: Vec<usize>,
    pub order: Vec<usize>,
    pub retired: Vec<usize>,
}

/// Import payload; absent (or null) fields leave stored values alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StateImport {
    #[serde(default)]
    pub opened: Option<Vec<usize>>,
    #[serde(default)]
    pub order: Option<Vec<usize>>,
    #[serde(default)]
    pub retired: Option<Vec<usize>>,
}

impl StateImport {
    /// Parse an import file. `null` imports nothing.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let state: Option<Self> = serde_json::from_value(value).map_err(ImportError::Shape)?;
        Ok(state.unwrap_or_default())
    }
}

impl From<StateSnapshot> for StateImport {
    fn from(snapshot: StateSnapshot) -> Self {
        Self {
            opened: Some(snapshot.opened),
            order: Some(snapshot.order),
            retired: Some(snapshot.retired),
        }
    }
}

/// Typed access to the three persisted collections
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn opened(&self) -> BTreeSet<usize> {
        self.read(&self.keys.opened).unwrap_or_default()
    }

    pub fn set_opened(&self, opened: &BTreeSet<usize>) {
        self.write(&self.keys.opened, opened);
    }

    /// Stored order, if present and no longer than `max_len`
    pub fn order(&self, max_len: usize) -> Option<Vec<usize>> {
        let order: Vec<usize> = self.read(&self.keys.order)?;
        if order.len() > max_len {
            log::warn!(
                "Stored order has {} entries but only {} champions exist, discarding",
                order.len(),
                max_len
            );
            return None;
        }
        Some(order)
    }

    pub fn set_order(&self, order: &[usize]) {
        self.write(&self.keys.order, order);
    }

    pub fn retired(&self) -> BTreeSet<usize> {
        self.read(&self.keys.retired).unwrap_or_default()
    }

    pub fn set_retired(&self, retired: &BTreeSet<usize>) {
        self.write(&self.keys.retired, retired);
    }

    /// Current stored state, with empty arrays for anything missing
    pub fn export_state(&self) -> StateSnapshot {
        StateSnapshot {
            opened: self.read(&self.keys.opened).unwrap_or_default(),
            order: self.read(&self.keys.order).unwrap_or_default(),
            retired: self.read(&self.keys.retired).unwrap_or_default(),
        }
    }

    /// Overwrite whichever collections the payload carries
    pub fn import_state(&self, state: &StateImport) {
        if let Some(opened) = &state.opened {
            self.write(&self.keys.opened, opened);
        }
        if let Some(order) = &state.order {
            self.write(&self.keys.order, order);
        }
        if let Some(retired) = &state.retired {
            self.write(&self.keys.retired, retired);
        }
        log::info!(
            "Imported state (opened: {}, order: {}, retired: {})",
            state.opened.is_some(),
            state.order.is_some(),
            state.retired.is_some()
        );
    }

    /// Parse then import; on a parse error nothing is written
    pub fn import_json(&self, json: &str) -> Result<(), ImportError> {
        let state = StateImport::from_json(json)?;
        self.import_state(&state);
        Ok(())
    }

    pub fn clear(&self) {
        for key in [&self.keys.opened, &self.keys.order, &self.keys.retired] {
            if let Err(e) = self.store.remove(key) {
                log::warn!("Could not clear {}: {}", key, e);
            }
        }
        log::info!("Stored state cleared");
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("Ignoring malformed {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read {}: {}", key, e);
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.set(key, &json) {
            log::warn!("Could not write {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persistence() -> Persistence<MemoryStore> {
        Persistence::new(MemoryStore::new(), StorageKeys::default())
    }

    #[test]
    fn test_sets_round_trip_as_sorted_arrays() {
        let p = persistence();
        p.set_opened(&BTreeSet::from([4, 1, 9]));
        assert_eq!(p.store().raw("lol-advent-open-doors").as_deref(), Some("[1,4,9]"));
        assert_eq!(p.opened(), BTreeSet::from([1, 4, 9]));
    }

    #[test]
    fn test_order_validation() {
        let p = persistence();
        assert_eq!(p.order(3), None);

        p.set_order(&[2, 0, 1]);
        assert_eq!(p.order(3), Some(vec![2, 0, 1]));
        // Longer than the catalog: treated as absent
        assert_eq!(p.order(2), None);

        p.store().set("lol-advent-order", r#"{"not":"an array"}"#).unwrap();
        assert_eq!(p.order(3), None);
    }

    #[test]
    fn test_malformed_json_reads_as_empty() {
        let p = persistence();
        p.store().set("lol-advent-open-doors", "[1,2").unwrap();
        p.store().set("lol-advent-retired", "\"x\"").unwrap();
        assert!(p.opened().is_empty());
        assert!(p.retired().is_empty());
        assert_eq!(p.export_state(), StateSnapshot::default());
    }

    #[test]
    fn test_duplicate_indices_collapse_in_sets() {
        let p = persistence();
        p.store().set("lol-advent-retired", "[3,3,1]").unwrap();
        assert_eq!(p.retired(), BTreeSet::from([1, 3]));
    }

    #[test]
    fn test_unavailable_storage_is_silent() {
        let p = Persistence::new(MemoryStore::unavailable(), StorageKeys::default());
        p.set_opened(&BTreeSet::from([1]));
        p.set_order(&[0]);
        p.clear();
        assert!(p.opened().is_empty());
        assert_eq!(p.order(10), None);
        assert_eq!(p.export_state(), StateSnapshot::default());
    }

    #[test]
    fn test_partial_import_leaves_other_keys() {
        let p = persistence();
        p.set_order(&[1, 0]);
        p.set_retired(&BTreeSet::from([2]));

        p.import_json(r#"{"opened":[0],"retired":null}"#).unwrap();

        assert_eq!(p.opened(), BTreeSet::from([0]));
        assert_eq!(p.order(3), Some(vec![1, 0]));
        assert_eq!(p.retired(), BTreeSet::from([2]));
    }

    #[test]
    fn test_empty_array_import_overwrites() {
        let p = persistence();
        p.set_retired(&BTreeSet::from([2]));
        p.import_json(r#"{"retired":[]}"#).unwrap();
        assert!(p.retired().is_empty());
    }

    #[test]
    fn test_invalid_import_writes_nothing() {
        let p = persistence();
        p.set_opened(&BTreeSet::from([5]));
        assert!(matches!(p.import_json("{nope"), Err(ImportError::Json(_))));
        assert!(matches!(
            p.import_json(r#"{"opened":"everything"}"#),
            Err(ImportError::Shape(_))
        ));
        assert!(matches!(p.import_json("42"), Err(ImportError::Shape(_))));
        assert_eq!(p.opened(), BTreeSet::from([5]));
    }

    #[test]
    fn test_null_import_is_a_no_op() {
        let p = persistence();
        p.set_order(&[1, 0]);
        p.import_json("null").unwrap();
        assert_eq!(p.order(2), Some(vec![1, 0]));
    }

    #[test]
    fn test_import_errors_pick_alert_text() {
        let syntax = StateImport::from_json("{nope").unwrap_err();
        assert_eq!(syntax.alert_message(), "Import failed: invalid JSON.");

        let shape = StateImport::from_json(r#"{"opened":0}"#).unwrap_err();
        assert_eq!(
            shape.alert_message(),
            "Import failed: file is not a saved grid state."
        );
    }

    #[test]
    fn test_clear_removes_only_grid_keys() {
        let p = persistence();
        p.store().set("unrelated", "1").unwrap();
        p.set_order(&[0]);
        p.set_opened(&BTreeSet::from([0]));
        p.clear();
        assert_eq!(p.store().raw("unrelated").as_deref(), Some("1"));
        assert_eq!(p.order(1), None);
        assert!(p.opened().is_empty());
    }
}
