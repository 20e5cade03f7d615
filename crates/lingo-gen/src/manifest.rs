//! Generation manifest for tracking produced assets
//!
//! The manifest maps set id to phrase id to the `{hash, file}` record of the
//! last successful generation. A matching hash means the asset on disk was
//! produced from the current source text and generation can be skipped.

use lingo_core::{LingoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The record of one generated asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Hex digest of the exact text the asset was generated from
    pub hash: String,
    /// File name relative to the set's output directory
    pub file: String,
}

/// Persisted map of set id -> phrase id -> entry.
///
/// Loaded once per run, mutated in memory, written back once at the end.
/// BTreeMap keeps the on-disk key order stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, BTreeMap<String, ManifestEntry>>,
}

impl Manifest {
    /// Load a manifest from file, or return an empty one if the file
    /// does not exist yet. A malformed existing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let entries = serde_json::from_str(&content).map_err(|e| {
            LingoError::ManifestError(format!(
                "Failed to parse manifest {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { entries })
    }

    /// Save the manifest as pretty-printed JSON, creating parent
    /// directories as needed. Writes to a temp file and renames over the
    /// target so a crash mid-write cannot truncate an existing manifest.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            LingoError::ManifestError(format!("Failed to serialize manifest: {}", e))
        })?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// True when no entry exists for `(set_id, phrase_id)` or the stored
    /// hash differs from `current_hash`.
    pub fn should_regenerate(&self, set_id: &str, phrase_id: &str, current_hash: &str) -> bool {
        match self.entries.get(set_id).and_then(|set| set.get(phrase_id)) {
            Some(entry) => entry.hash != current_hash,
            None => true,
        }
    }

    /// Upsert the entry for `(set_id, phrase_id)`.
    pub fn record(&mut self, set_id: &str, phrase_id: &str, hash: String, file: String) {
        self.entries
            .entry(set_id.to_string())
            .or_default()
            .insert(phrase_id.to_string(), ManifestEntry { hash, file });
    }

    /// Look up the entry for `(set_id, phrase_id)`.
    pub fn get(&self, set_id: &str, phrase_id: &str) -> Option<&ManifestEntry> {
        self.entries.get(set_id).and_then(|set| set.get(phrase_id))
    }

    /// Total number of recorded assets across all sets.
    pub fn len(&self) -> usize {
        self.entries.values().map(|set| set.len()).sum()
    }

    /// True when no assets are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("lingo_manifest_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = temp_dir();
        let manifest = Manifest::load(&dir.join("manifest.json")).unwrap();
        assert!(manifest.is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_roundtrip_preserves_non_ascii() {
        let dir = temp_dir();
        let path = dir.join("audio").join("manifest.json");

        let mut manifest = Manifest::default();
        manifest.record("animals_de", "1", "abc123".into(), "1.mp3".into());
        manifest.record("animals_de", "2", "def456".into(), "2.mp3".into());
        manifest.record("食べ物", "7", "0099ff".into(), "7.mp3".into());

        manifest.save(&path).unwrap();
        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);

        // Non-ASCII keys are written literally, not \u-escaped
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("食べ物"));

        // save(load()) with no mutation is a no-op
        loaded.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), raw);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = temp_dir();
        let path = dir.join("manifest.json");
        let mut manifest = Manifest::default();
        manifest.record("set", "1", "hash".into(), "1.webp".into());
        manifest.save(&path).unwrap();

        assert!(path.exists());
        assert!(!dir.join("manifest.json.tmp").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = temp_dir();
        let path = dir.join("manifest.json");
        std::fs::write(&path, "{truncated").unwrap();
        assert!(Manifest::load(&path).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_should_regenerate() {
        let mut manifest = Manifest::default();
        assert!(manifest.should_regenerate("set", "1", "aa"));

        manifest.record("set", "1", "aa".into(), "1.mp3".into());
        assert!(!manifest.should_regenerate("set", "1", "aa"));
        assert!(manifest.should_regenerate("set", "1", "bb"));
        assert!(manifest.should_regenerate("set", "2", "aa"));
        assert!(manifest.should_regenerate("other", "1", "aa"));
    }

    #[test]
    fn test_record_upserts() {
        let mut manifest = Manifest::default();
        manifest.record("set", "1", "aa".into(), "1.mp3".into());
        manifest.record("set", "1", "bb".into(), "1.mp3".into());

        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.get("set", "1").unwrap().hash, "bb");
    }
}
