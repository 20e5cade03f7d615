//! Lingo Gen - Manifest-tracked asset generation
//!
//! Pre-generates audio and images for phrase sets via external AI services,
//! using a content-hash manifest to skip phrases whose source text has not
//! changed since the last run.

pub mod config;
pub mod manifest;
pub mod pipeline;
pub mod producer;
pub mod provider;
pub mod providers;
pub mod voice;

pub use config::GenConfig;
pub use manifest::{Manifest, ManifestEntry};
pub use pipeline::{produce_assets, RunSummary};
pub use producer::{AssetProducer, AudioProducer, ImageProducer};
pub use provider::{AssetKind, ImageRenderer, SpeechSynthesizer};
pub use voice::voice_for_locale;
