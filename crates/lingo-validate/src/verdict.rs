//! The model's verdict on a learner answer

use lingo_core::{LingoError, Result};
use serde::{Deserialize, Serialize};

/// Parsed validation verdict, as instructed in the evaluation prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// The answer demonstrates correct knowledge
    pub correct: bool,
    /// Grammar is correct or acceptably close
    pub grammar_ok: bool,
    /// Meaning matches the expected answer
    pub meaning_preserved: bool,
    #[serde(default)]
    pub key_vocabulary_present: Vec<String>,
    #[serde(default)]
    pub key_vocabulary_missing: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub minor_issues: Vec<String>,
    /// Model confidence in [0, 1]
    pub confidence: f64,
}

/// Strip a fenced code block wrapper from a model reply, if present.
///
/// Models sometimes answer with ```json ... ``` despite being told not to;
/// the content between the fence lines is what gets parsed.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let mut lines: Vec<&str> = trimmed.lines().collect();
    lines.remove(0); // opening fence, with or without a language tag
    if lines.last().map(|l| l.trim() == "```").unwrap_or(false) {
        lines.pop();
    }
    lines.join("\n")
}

/// Parse a model reply into a `Verdict`, unwrapping any code fence first.
pub fn parse_verdict(reply: &str) -> Result<Verdict> {
    let text = strip_code_fence(reply);
    serde_json::from_str(&text)
        .map_err(|e| LingoError::ValidationError(format!("invalid JSON in model reply: {}", e)))
}
