//! The generation pipeline
//!
//! One run: load the manifest, walk every phrase set in the corpus
//! directory, generate what the manifest does not already cover, write the
//! manifest back once, report totals. A single phrase's failure is logged
//! and skipped; its manifest entry is left untouched so the next run
//! retries it.

use crate::manifest::Manifest;
use crate::producer::AssetProducer;
use lingo_core::{ContentHash, LingoError, Result};
use lingo_corpus::{discover_sets, Phrase, PhraseSet};
use std::path::Path;

/// Counters for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub generated: usize,
    pub skipped: usize,
}

/// Process every phrase set under `corpus_dir`, writing assets beneath
/// `out_dir` and the manifest to `manifest_path`.
pub fn produce_assets(
    producer: &dyn AssetProducer,
    corpus_dir: &Path,
    out_dir: &Path,
    manifest_path: &Path,
) -> Result<RunSummary> {
    let set_paths = discover_sets(corpus_dir)?;
    if set_paths.is_empty() {
        return Err(LingoError::CorpusError(format!(
            "No phrase set files found in {}",
            corpus_dir.display()
        )));
    }

    let mut manifest = Manifest::load(manifest_path)?;
    let mut summary = RunSummary::default();

    println!("Found {} phrase set(s)", set_paths.len());

    for path in &set_paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("Processing {}: {}", producer.kind(), name);

        let set = PhraseSet::load(path)?;
        let (generated, skipped) = produce_set(producer, &set, out_dir, &mut manifest)?;
        println!("  Generated: {}, Skipped: {}", generated, skipped);
        summary.generated += generated;
        summary.skipped += skipped;
    }

    manifest.save(manifest_path)?;
    Ok(summary)
}

/// Process a single phrase set. Returns (generated, skipped) counts.
pub fn produce_set(
    producer: &dyn AssetProducer,
    set: &PhraseSet,
    out_dir: &Path,
    manifest: &mut Manifest,
) -> Result<(usize, usize)> {
    let meta = &set.metadata;

    if !producer.supports_set(meta) {
        if let Some(reason) = producer.unsupported_reason(meta) {
            println!("  Warning: {}, skipping set {}", reason, meta.id);
        }
        return Ok((0, 0));
    }

    let mut generated = 0;
    let mut skipped = 0;

    for phrase in &set.phrases {
        let Some(source) = producer.source_text(meta, phrase) else {
            continue;
        };
        let phrase_id = phrase.id.to_string();
        let hash = ContentHash::from_text(&source).to_hex();

        if !manifest.should_regenerate(&meta.id, &phrase_id, &hash) {
            skipped += 1;
            continue;
        }

        let file_name = format!("{}.{}", phrase_id, producer.extension());
        println!(
            "  Generating: {}/{} - '{}'",
            meta.id,
            file_name,
            preview(&source)
        );

        match generate_item(producer, set, phrase, out_dir, &file_name) {
            Ok(()) => {
                manifest.record(&meta.id, &phrase_id, hash, file_name);
                generated += 1;
            }
            Err(e) => {
                // Leave the manifest alone so the next run retries
                eprintln!("    Error: {}", e);
            }
        }
    }

    Ok((generated, skipped))
}

/// Truncate the source text for progress output. Cuts on a character
/// boundary since answers are routinely non-ASCII.
fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 30;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    }
}

fn generate_item(
    producer: &dyn AssetProducer,
    set: &PhraseSet,
    phrase: &Phrase,
    out_dir: &Path,
    file_name: &str,
) -> Result<()> {
    let bytes = producer.generate(&set.metadata, phrase)?;
    let out_path = out_dir.join(&set.metadata.id).join(file_name);
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out_path, &bytes)?;
    Ok(())
}
