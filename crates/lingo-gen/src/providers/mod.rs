//! Provider registry
//!
//! Maps provider names to concrete implementations.

pub mod elevenlabs;
pub mod mock;
pub mod openai;

use crate::config::GenConfig;
use crate::provider::{ImageRenderer, SpeechSynthesizer};
use lingo_core::{LingoError, Result};

fn ensure_enabled(name: &str, config: &GenConfig) -> Result<()> {
    if config.is_enabled(name) {
        Ok(())
    } else {
        Err(LingoError::ConfigError(format!(
            "Provider '{}' is disabled in config",
            name
        )))
    }
}

/// Create a speech synthesizer by name with configuration
pub fn create_synthesizer(name: &str, config: &GenConfig) -> Result<Box<dyn SpeechSynthesizer>> {
    ensure_enabled(name, config)?;
    match name {
        "mock" => Ok(Box::new(mock::MockSynthesizer::new())),
        "elevenlabs" => Ok(Box::new(elevenlabs::ElevenLabsSynthesizer::from_config(
            config,
        )?)),
        _ => Err(LingoError::ConfigError(format!(
            "Unknown audio provider '{}'. Available: mock, elevenlabs",
            name
        ))),
    }
}

/// Create an image renderer by name with configuration
pub fn create_renderer(name: &str, config: &GenConfig) -> Result<Box<dyn ImageRenderer>> {
    ensure_enabled(name, config)?;
    match name {
        "mock" => Ok(Box::new(mock::MockRenderer::new())),
        "openai" => Ok(Box::new(openai::OpenAiImageRenderer::from_config(config)?)),
        _ => Err(LingoError::ConfigError(format!(
            "Unknown image provider '{}'. Available: mock, openai",
            name
        ))),
    }
}
