//! Asset producers
//!
//! The audio and image generators share one pipeline shape (enumerate the
//! corpus, hash the source text, consult the manifest, call the external
//! service, persist the bytes). `AssetProducer` captures what varies per
//! asset kind: eligibility, the exact text that keys the manifest, the
//! extension, and the external call itself.

use crate::provider::{AssetKind, ImageRenderer, SpeechSynthesizer};
use crate::voice::voice_for_locale;
use lingo_core::{LingoError, Result};
use lingo_corpus::{Phrase, SetMetadata};

/// One asset kind's slice of the generation pipeline
pub trait AssetProducer {
    /// The asset kind this producer creates
    fn kind(&self) -> AssetKind;

    /// Output file extension (no dot)
    fn extension(&self) -> &'static str;

    /// Whether this set can be processed at all. A refused set is skipped
    /// whole and contributes to neither counter.
    fn supports_set(&self, meta: &SetMetadata) -> bool;

    /// The exact text whose digest keys the manifest for this phrase, or
    /// `None` when the phrase is not eligible under this producer.
    fn source_text(&self, meta: &SetMetadata, phrase: &Phrase) -> Option<String>;

    /// Generate the asset bytes. Exactly one external call.
    fn generate(&self, meta: &SetMetadata, phrase: &Phrase) -> Result<Vec<u8>>;

    /// Reason a set is not supported, for the operator-facing warning.
    /// `None` skips the set silently (image sets without a style are
    /// simply out of scope, not a misconfiguration).
    fn unsupported_reason(&self, _meta: &SetMetadata) -> Option<String> {
        None
    }
}

/// Produces MP3 audio for every phrase answer in a set.
///
/// Eligibility is per set: the set's speech locale must have a voice
/// mapping. Every phrase in a supported set is eligible.
pub struct AudioProducer {
    synthesizer: Box<dyn SpeechSynthesizer>,
}

impl AudioProducer {
    pub fn new(synthesizer: Box<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }
}

impl AssetProducer for AudioProducer {
    fn kind(&self) -> AssetKind {
        AssetKind::Audio
    }

    fn extension(&self) -> &'static str {
        "mp3"
    }

    fn supports_set(&self, meta: &SetMetadata) -> bool {
        voice_for_locale(&meta.speech_lang).is_some()
    }

    fn source_text(&self, _meta: &SetMetadata, phrase: &Phrase) -> Option<String> {
        Some(phrase.answer.clone())
    }

    fn generate(&self, meta: &SetMetadata, phrase: &Phrase) -> Result<Vec<u8>> {
        let voice = voice_for_locale(&meta.speech_lang).ok_or_else(|| {
            LingoError::GenerationError(format!("No voice mapping for {}", meta.speech_lang))
        })?;
        self.synthesizer.synthesize(&phrase.answer, voice)
    }

    fn unsupported_reason(&self, meta: &SetMetadata) -> Option<String> {
        if voice_for_locale(&meta.speech_lang).is_none() {
            Some(format!("no voice mapping for {}", meta.speech_lang))
        } else {
            None
        }
    }
}

/// Produces WebP illustrations for phrases that carry an image description,
/// in sets that declare an image style.
///
/// The manifest hash covers style and description joined by `|`: editing
/// either regenerates the image.
pub struct ImageProducer {
    renderer: Box<dyn ImageRenderer>,
}

impl ImageProducer {
    pub fn new(renderer: Box<dyn ImageRenderer>) -> Self {
        Self { renderer }
    }

    fn prompt_for(style: &str, description: &str) -> String {
        format!("{}\n\nScene: {}", style, description)
    }
}

impl AssetProducer for ImageProducer {
    fn kind(&self) -> AssetKind {
        AssetKind::Image
    }

    fn extension(&self) -> &'static str {
        "webp"
    }

    fn supports_set(&self, meta: &SetMetadata) -> bool {
        meta.image_style.is_some()
    }

    fn source_text(&self, meta: &SetMetadata, phrase: &Phrase) -> Option<String> {
        let style = meta.image_style.as_deref()?;
        let description = phrase.image_description.as_deref()?;
        Some(format!("{}|{}", style, description))
    }

    fn generate(&self, meta: &SetMetadata, phrase: &Phrase) -> Result<Vec<u8>> {
        let style = meta.image_style.as_deref().ok_or_else(|| {
            LingoError::GenerationError(format!("Set {} declares no image style", meta.id))
        })?;
        let description = phrase.image_description.as_deref().ok_or_else(|| {
            LingoError::GenerationError(format!(
                "Phrase {} has no image description",
                phrase.id
            ))
        })?;
        self.renderer.render(&Self::prompt_for(style, description))
    }
}
