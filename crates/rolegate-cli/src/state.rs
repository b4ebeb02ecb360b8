//! # State File
//!
//! Loads and saves the in-memory store as a pretty-printed JSON snapshot.
//! A missing file loads as an empty store, so the first `seed` call
//! bootstraps everything.

use std::fs;
use std::path::Path;

use anyhow::Context;

use rolegate_workflow::{MemorySnapshot, MemoryStore};

/// Load the store from `path`, or an empty store when the file does not
/// exist yet.
pub fn load(path: &Path) -> anyhow::Result<MemoryStore> {
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    let snapshot: MemorySnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing state file {}", path.display()))?;
    Ok(MemoryStore::from_snapshot(snapshot))
}

/// Write the store back to `path`.
pub fn save(path: &Path, store: &MemoryStore) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&store.snapshot()).context("serializing state")?;
    fs::write(path, json).with_context(|| format!("writing state file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_core::ZoneId;

    #[test]
    fn test_missing_file_loads_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = load(&dir.path().join("nope.json")).unwrap();
        assert!(store.users().is_empty());
        assert!(store.requests().is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = MemoryStore::new();
        store.insert_zone(ZoneId::new());
        save(&path, &store).unwrap();

        let restored = load(&path).unwrap();
        assert_eq!(restored.snapshot().zones, store.snapshot().zones);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();
        assert!(load(&path).is_err());
    }
}
