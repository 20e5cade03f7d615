//! Chat model seam
//!
//! The handler only needs "prompt in, reply text out"; `ChatModel` keeps it
//! independent of which hosted model answers.

use lingo_core::{LingoError, Result};
use std::time::Duration;

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f64 = 0.1;
const TOP_P: f64 = 0.9;

/// Trait implemented by hosted text-generation backends
pub trait ChatModel {
    /// Send a prompt and return the model's reply text.
    /// One call per invocation; no retries.
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// OpenAI chat-completions backend, tuned for deterministic-leaning,
/// bounded-length output.
pub struct OpenAiChatModel {
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiChatModel {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_OPENAI_URL.to_string(),
            model,
        }
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

impl ChatModel for OpenAiChatModel {
    fn complete(&self, prompt: &str) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": TEMPERATURE,
            "top_p": TOP_P,
            "max_tokens": MAX_TOKENS,
        });

        let agent = build_agent();
        let mut response = agent
            .post(&self.api_url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| {
                LingoError::ValidationError(format!("Chat API request failed: {}", e))
            })?;

        let body: serde_json::Value = response.body_mut().read_json().map_err(|e| {
            LingoError::ValidationError(format!("Failed to parse chat response: {}", e))
        })?;

        extract_reply(&body).map(str::to_string)
    }
}

/// Pull the reply text out of a chat-completions response
fn extract_reply(body: &serde_json::Value) -> Result<&str> {
    body.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            LingoError::ValidationError(
                "Chat response missing choices[0].message.content".to_string(),
            )
        })
}
