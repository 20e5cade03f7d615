//! External service seams for asset generation

use lingo_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of asset to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Audio,
    Image,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Audio => write!(f, "audio"),
            AssetKind::Image => write!(f, "image"),
        }
    }
}

/// Trait implemented by text-to-speech backends (ElevenLabs, Mock)
pub trait SpeechSynthesizer: Send {
    /// Provider name (e.g. "elevenlabs", "mock")
    fn name(&self) -> &str;

    /// Synthesize `text` in the given voice, returning MP3 bytes.
    /// One network call per invocation; failures surface as errors.
    fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>>;
}

/// Trait implemented by image generation backends (OpenAI, Mock)
pub trait ImageRenderer: Send {
    /// Provider name (e.g. "openai", "mock")
    fn name(&self) -> &str;

    /// Render an image for `prompt`, returning WebP bytes.
    fn render(&self, prompt: &str) -> Result<Vec<u8>>;
}
