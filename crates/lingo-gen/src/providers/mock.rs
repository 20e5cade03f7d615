//! Mock providers for testing
//!
//! Produce deterministic placeholder bytes without any network calls and
//! count invocations so tests can assert exactly when the pipeline reaches
//! the external service.

use crate::provider::{ImageRenderer, SpeechSynthesizer};
use lingo_core::{LingoError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A mock synthesizer that fabricates audio bytes locally
#[derive(Clone, Default)]
pub struct MockSynthesizer {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A synthesizer whose every call fails
    pub fn failing() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            fail: true,
        }
    }

    /// Number of synthesize calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    fn name(&self) -> &str {
        "mock"
    }

    fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LingoError::GenerationError(
                "mock synthesizer failure".to_string(),
            ));
        }
        Ok(format!("MP3|{}|{}", voice, text).into_bytes())
    }
}

/// A mock renderer that fabricates image bytes locally
#[derive(Clone, Default)]
pub struct MockRenderer {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer whose every call fails
    pub fn failing() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            fail: true,
        }
    }

    /// Number of render calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageRenderer for MockRenderer {
    fn name(&self) -> &str {
        "mock"
    }

    fn render(&self, prompt: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LingoError::GenerationError(
                "mock renderer failure".to_string(),
            ));
        }
        Ok(format!("WEBP|{}", prompt).into_bytes())
    }
}
