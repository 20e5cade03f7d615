//! OpenAI image generation provider
//!
//! Two round-trips per image: a generation request that answers with a
//! result URL, then a download of the PNG from that URL. The PNG is
//! transcoded to WebP locally before it is handed back to the pipeline.

use crate::config::GenConfig;
use crate::provider::ImageRenderer;
use lingo_core::{LingoError, Result};
use std::time::Duration;

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/images/generations";
const MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1024x1024";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// OpenAI provider for phrase illustrations
#[derive(Debug)]
pub struct OpenAiImageRenderer {
    api_key: String,
    api_url: String,
}

impl OpenAiImageRenderer {
    /// Create a new OpenAiImageRenderer from config
    pub fn from_config(config: &GenConfig) -> Result<Self> {
        let api_key = config
            .api_key("openai")
            .ok_or_else(|| {
                LingoError::ConfigError(
                    "OpenAI API key not configured. Set LINGO_OPENAI_API_KEY or add to .lingo/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("openai")
            .unwrap_or(DEFAULT_OPENAI_URL)
            .to_string();

        Ok(Self { api_key, api_url })
    }

    fn download_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let agent = build_agent();
        let response = agent.get(url).call().map_err(|e| {
            LingoError::GenerationError(format!("Failed to download image: {}", e))
        })?;

        let mut reader = response.into_body().into_reader();
        let mut bytes = Vec::new();
        std::io::Read::read_to_end(&mut reader, &mut bytes).map_err(|e| {
            LingoError::GenerationError(format!("Failed to read image data: {}", e))
        })?;
        Ok(bytes)
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

impl ImageRenderer for OpenAiImageRenderer {
    fn name(&self) -> &str {
        "openai"
    }

    fn render(&self, prompt: &str) -> Result<Vec<u8>> {
        let payload = serde_json::json!({
            "model": MODEL,
            "prompt": prompt,
            "size": IMAGE_SIZE,
            "quality": "standard",
            "n": 1,
        });

        let agent = build_agent();
        let mut response = agent
            .post(&self.api_url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| {
                LingoError::GenerationError(format!("OpenAI API request failed: {}", e))
            })?;

        let body: serde_json::Value = response.body_mut().read_json().map_err(|e| {
            LingoError::GenerationError(format!("Failed to parse OpenAI response: {}", e))
        })?;

        let url = extract_image_url(&body)?;
        let png = self.download_bytes(url)?;
        transcode_webp(&png)
    }
}

/// Pull the result URL out of an images/generations response
fn extract_image_url(body: &serde_json::Value) -> Result<&str> {
    body.get("data")
        .and_then(|d| d.get(0))
        .and_then(|item| item.get("url"))
        .and_then(|u| u.as_str())
        .ok_or_else(|| {
            LingoError::GenerationError("OpenAI response missing data[0].url".to_string())
        })
}

/// Re-encode downloaded image bytes as WebP
fn transcode_webp(bytes: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| LingoError::GenerationError(format!("Failed to decode image: {}", e)))?;

    let mut out = std::io::Cursor::new(Vec::new());
    let encoder = image::codecs::webp::WebPEncoder::new_lossless(&mut out);
    img.write_with_encoder(encoder)
        .map_err(|e| LingoError::GenerationError(format!("Failed to encode WebP: {}", e)))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use std::collections::HashMap;

    #[test]
    fn test_extract_image_url() {
        let body = serde_json::json!({
            "created": 1700000000,
            "data": [{"url": "https://images.example.com/result.png"}]
        });
        assert_eq!(
            extract_image_url(&body).unwrap(),
            "https://images.example.com/result.png"
        );
    }

    #[test]
    fn test_extract_image_url_missing() {
        let body = serde_json::json!({"data": []});
        let err = extract_image_url(&body).unwrap_err();
        assert!(err.to_string().contains("data[0].url"));
    }

    #[test]
    fn test_transcode_webp() {
        // Encode a tiny PNG, transcode, and check the RIFF/WEBP container
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 120, 40, 255]));
        let mut png = std::io::Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png).unwrap();

        let webp = transcode_webp(png.get_ref()).unwrap();
        assert_eq!(&webp[..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn test_transcode_rejects_garbage() {
        assert!(transcode_webp(b"not an image").is_err());
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let config = GenConfig {
            providers: HashMap::new(),
            generation: GenerationConfig::default(),
        };
        let err = OpenAiImageRenderer::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("LINGO_OPENAI_API_KEY"));
    }
}
