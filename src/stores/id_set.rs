//! Deduplicated set of wallpaper IDs with optional file persistence.

use std::collections::HashSet;
use std::path::PathBuf;

use bevy::prelude::*;

/// A set of opaque string IDs. When a backing path is set, every real
/// mutation is written through to disk immediately; membership, not
/// order, is the invariant, so the record is a plain JSON array.
#[derive(Debug, Default)]
pub struct IdSet {
    ids: HashSet<String>,
    path: Option<PathBuf>,
}

impl IdSet {
    /// A set with no backing file; contents live for the process only.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load a persisted set, or start empty when the record is
    /// missing, unreadable, or corrupt. Never fails: a broken record
    /// is logged and treated the same as no record.
    pub fn load_or_default(path: PathBuf) -> Self {
        let ids = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(list) => {
                    info!("loaded {} ids from {:?}", list.len(), path);
                    list.into_iter().collect()
                }
                Err(e) => {
                    warn!("corrupt id record at {:?}, starting empty: {}", path, e);
                    HashSet::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                warn!("could not read {:?}, starting empty: {}", path, e);
                HashSet::new()
            }
        };

        Self {
            ids,
            path: Some(path),
        }
    }

    /// Insert `id`. No-op (and no disk write) when already present.
    pub fn add(&mut self, id: &str) {
        if self.ids.insert(id.to_string()) {
            self.persist();
        }
    }

    /// Remove `id`. No-op (and no disk write) when absent.
    pub fn remove(&mut self, id: &str) {
        if self.ids.remove(id) {
            self.persist();
        }
    }

    /// Membership check, no side effects.
    pub fn has(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Remove `id` if present, insert it otherwise.
    pub fn toggle(&mut self, id: &str) {
        if self.has(id) {
            self.remove(id);
        } else {
            self.add(id);
        }
    }

    /// Snapshot of the current members. Order is unspecified and may
    /// differ between calls.
    pub fn list(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Empty the set and delete the backing record entirely, so a
    /// cleared set and a never-written one look identical on reload.
    pub fn clear(&mut self) {
        self.ids.clear();
        if let Some(path) = &self.path
            && let Err(e) = std::fs::remove_file(path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!("failed to delete id record {:?}: {}", path, e);
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };

        let list: Vec<&String> = self.ids.iter().collect();
        match serde_json::to_string(&list) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    error!("failed to save id record {:?}: {}", path, e);
                }
            }
            Err(e) => {
                error!("failed to serialize id record: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_record(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wallgazer-idset-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_add_remove_has() {
        let mut set = IdSet::in_memory();
        assert!(!set.has("a"));

        set.add("a");
        set.add("a"); // duplicate add is a no-op
        assert!(set.has("a"));
        assert_eq!(set.len(), 1);

        set.remove("a");
        set.remove("a"); // absent remove is a no-op
        assert!(!set.has("a"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_is_idempotent_over_two_calls() {
        let mut set = IdSet::in_memory();
        set.add("keep");

        set.toggle("x");
        assert!(set.has("x"));
        set.toggle("x");
        assert!(!set.has("x"));

        // Even numbers of toggles leave membership unchanged
        for _ in 0..4 {
            set.toggle("keep");
        }
        assert!(set.has("keep"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_durability_round_trip() {
        let path = temp_record("roundtrip");
        let _ = std::fs::remove_file(&path);

        let mut set = IdSet::load_or_default(path.clone());
        set.add("abc");
        set.add("def");

        // Simulated restart
        let rehydrated = IdSet::load_or_default(path.clone());
        assert!(rehydrated.has("abc"));
        assert!(rehydrated.has("def"));
        assert_eq!(rehydrated.len(), 2);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_clear_deletes_the_record() {
        let path = temp_record("clear");
        let _ = std::fs::remove_file(&path);

        let mut set = IdSet::load_or_default(path.clone());
        set.add("abc");
        assert!(path.exists());

        set.clear();
        assert!(set.is_empty());
        assert!(!path.exists());

        // Cleared and never-written rehydrate identically
        let rehydrated = IdSet::load_or_default(path.clone());
        assert!(rehydrated.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_record_rehydrates_empty() {
        let path = temp_record("corrupt");
        std::fs::write(&path, "{ not json [").unwrap();

        let set = IdSet::load_or_default(path.clone());
        assert!(set.is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_record_rehydrates_empty() {
        let path = temp_record("missing");
        let _ = std::fs::remove_file(&path);

        let set = IdSet::load_or_default(path);
        assert!(set.is_empty());
    }

    #[test]
    fn test_list_is_an_order_free_snapshot() {
        let mut set = IdSet::in_memory();
        for id in ["c", "a", "b"] {
            set.add(id);
        }
        let mut list = set.list();
        list.sort();
        assert_eq!(list, vec!["a", "b", "c"]);
    }
}
