//! Answer validation command
//!
//! Stands in for the hosted runtime: reads the invocation event from a file
//! or stdin, runs the handler, prints the response envelope.

use anyhow::{anyhow, Result};
use lingo_gen::GenConfig;
use lingo_validate::{handle, OpenAiChatModel};
use std::io::Read;

pub fn run(request: Option<&str>, model_override: Option<String>) -> Result<()> {
    let raw = match request {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let event: serde_json::Value = serde_json::from_str(&raw)?;

    let config = GenConfig::load()?;
    let api_key = config.api_key("openai").ok_or_else(|| {
        anyhow!("OpenAI API key not configured. Set LINGO_OPENAI_API_KEY or add to .lingo/config.toml")
    })?;
    let model_name = model_override.unwrap_or_else(|| config.validation_model().to_string());

    let model = OpenAiChatModel::new(api_key.to_string(), model_name);
    let response = handle(&event, &model);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
