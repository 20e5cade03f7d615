//! Phrase set files
//!
//! The JSON schema is fixed by the app frontend (camelCase keys):
//! `{"metadata": {"id", "speechLang", "imageStyle"?},
//!   "phrases": [{"id", "answer", "imageDescription"?}, ...]}`

use lingo_core::{LingoError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Metadata identifying a phrase set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetMetadata {
    /// Set identifier, also the output subdirectory name
    pub id: String,
    /// Speech locale code (e.g. "de-DE"), selects the synthesis voice
    #[serde(rename = "speechLang")]
    pub speech_lang: String,
    /// Image style prompt; sets without one get no illustrations
    #[serde(rename = "imageStyle", default, skip_serializing_if = "Option::is_none")]
    pub image_style: Option<String>,
}

/// A single phrase within a set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phrase {
    /// Identifier, unique within the set
    pub id: u32,
    /// Target-language answer text
    pub answer: String,
    /// Scene description for image generation
    #[serde(
        rename = "imageDescription",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_description: Option<String>,
}

/// One corpus file: a set of phrases sharing metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseSet {
    pub metadata: SetMetadata,
    pub phrases: Vec<Phrase>,
}

impl PhraseSet {
    /// Load a phrase set from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            LingoError::CorpusError(format!(
                "Failed to parse phrase set {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Find all phrase set files in a corpus directory, sorted by file name.
pub fn discover_sets(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        LingoError::CorpusError(format!("Failed to read corpus directory {}: {}", dir.display(), e))
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lingo_corpus_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_full_set() {
        let dir = temp_dir();
        let path = write_file(
            &dir,
            "animals_de.json",
            r#"{
                "metadata": {
                    "id": "animals_de",
                    "speechLang": "de-DE",
                    "imageStyle": "Flat vector illustration, pastel colors"
                },
                "phrases": [
                    {"id": 1, "answer": "Der Hund schläft.", "imageDescription": "A sleeping dog"},
                    {"id": 2, "answer": "Die Katze trinkt Milch."}
                ]
            }"#,
        );

        let set = PhraseSet::load(&path).unwrap();
        assert_eq!(set.metadata.id, "animals_de");
        assert_eq!(set.metadata.speech_lang, "de-DE");
        assert!(set.metadata.image_style.is_some());
        assert_eq!(set.phrases.len(), 2);
        assert_eq!(set.phrases[0].answer, "Der Hund schläft.");
        assert_eq!(
            set.phrases[0].image_description.as_deref(),
            Some("A sleeping dog")
        );
        assert!(set.phrases[1].image_description.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_set_without_style() {
        let dir = temp_dir();
        let path = write_file(
            &dir,
            "basics.json",
            r#"{"metadata": {"id": "basics", "speechLang": "fr-FR"}, "phrases": []}"#,
        );

        let set = PhraseSet::load(&path).unwrap();
        assert!(set.metadata.image_style.is_none());
        assert!(set.phrases.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_malformed_set() {
        let dir = temp_dir();
        let path = write_file(&dir, "broken.json", "{not json");
        let err = PhraseSet::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_discover_sets_sorted_json_only() {
        let dir = temp_dir();
        write_file(&dir, "b_set.json", "{}");
        write_file(&dir, "a_set.json", "{}");
        write_file(&dir, "notes.txt", "ignore me");

        let paths = discover_sets(&dir).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("a_set.json"));
        assert!(paths[1].ends_with("b_set.json"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_discover_sets_missing_dir() {
        let dir = std::env::temp_dir().join("lingo_corpus_does_not_exist");
        assert!(discover_sets(&dir).is_err());
    }
}
