//! ElevenLabs text-to-speech provider
//!
//! Synthesis is fast (~1-5s per phrase), so `synthesize()` blocks
//! synchronously. One request per phrase; a failed request surfaces as an
//! error and the pipeline moves on to the next phrase.

use crate::config::GenConfig;
use crate::provider::SpeechSynthesizer;
use lingo_core::{LingoError, Result};
use std::time::Duration;

const DEFAULT_ELEVENLABS_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";
const MODEL_ID: &str = "eleven_multilingual_v2";
const OUTPUT_FORMAT: &str = "mp3_44100_64";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// ElevenLabs provider for phrase audio
#[derive(Debug)]
pub struct ElevenLabsSynthesizer {
    api_key: String,
    api_url: String,
}

impl ElevenLabsSynthesizer {
    /// Create a new ElevenLabsSynthesizer from config
    pub fn from_config(config: &GenConfig) -> Result<Self> {
        let api_key = config
            .api_key("elevenlabs")
            .ok_or_else(|| {
                LingoError::ConfigError(
                    "ElevenLabs API key not configured. Set LINGO_ELEVENLABS_API_KEY or add to .lingo/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("elevenlabs")
            .unwrap_or(DEFAULT_ELEVENLABS_URL)
            .to_string();

        Ok(Self { api_key, api_url })
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

impl SpeechSynthesizer for ElevenLabsSynthesizer {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let payload = serde_json::json!({
            "text": text,
            "model_id": MODEL_ID,
        });

        let url = format!(
            "{}/{}?output_format={}",
            self.api_url, voice, OUTPUT_FORMAT
        );

        let agent = build_agent();
        let response = agent
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| {
                LingoError::GenerationError(format!("ElevenLabs API request failed: {}", e))
            })?;

        let mut reader = response.into_body().into_reader();
        let mut bytes = Vec::new();
        std::io::Read::read_to_end(&mut reader, &mut bytes).map_err(|e| {
            LingoError::GenerationError(format!("Failed to read audio data: {}", e))
        })?;
        Ok(bytes)
    }
}

/// Parse an ElevenLabs error response body into its message
pub fn parse_elevenlabs_error(json: &str) -> Result<String> {
    let response: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| LingoError::GenerationError(format!("Invalid JSON: {}", e)))?;

    let message = response
        .get("detail")
        .and_then(|d| d.get("message"))
        .and_then(|m| m.as_str())
        .or_else(|| response.get("detail").and_then(|d| d.as_str()))
        .unwrap_or("Unknown error")
        .to_string();

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use std::collections::HashMap;

    #[test]
    fn test_parse_elevenlabs_error_detail() {
        let json = r#"{"detail":{"status":"error","message":"Invalid API key"}}"#;
        let msg = parse_elevenlabs_error(json).unwrap();
        assert_eq!(msg, "Invalid API key");
    }

    #[test]
    fn test_parse_elevenlabs_error_string() {
        let json = r#"{"detail":"Unauthorized"}"#;
        let msg = parse_elevenlabs_error(json).unwrap();
        assert_eq!(msg, "Unauthorized");
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let config = GenConfig {
            providers: HashMap::new(),
            generation: GenerationConfig::default(),
        };
        let err = ElevenLabsSynthesizer::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("LINGO_ELEVENLABS_API_KEY"));
    }
}
