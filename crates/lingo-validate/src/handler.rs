//! The validation request handler
//!
//! Lambda-shaped: takes the invocation event as JSON (either the request
//! itself or gateway-style with the request serialized into a `body`
//! string), answers with a `{statusCode, headers, body}` envelope. Fully
//! stateless; every response carries permissive CORS headers so the app
//! frontend can call it cross-origin.

use crate::model::ChatModel;
use crate::prompt::build_validation_prompt;
use crate::verdict::parse_verdict;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_language() -> String {
    "de".to_string()
}

/// A vocabulary item the learner was expected to use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabItem {
    pub word: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

/// The validation request fields.
///
/// Missing string fields default to empty and are rejected below rather
/// than at deserialization, matching the permissive gateway contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub expected: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub vocabulary: Vec<VocabItem>,
}

/// Gateway-style response envelope
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded response payload
    pub body: String,
}

fn cors_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    headers.insert(
        "Access-Control-Allow-Headers".to_string(),
        "Content-Type".to_string(),
    );
    headers.insert(
        "Access-Control-Allow-Methods".to_string(),
        "POST, OPTIONS".to_string(),
    );
    headers
}

fn respond(status_code: u16, body: serde_json::Value) -> HandlerResponse {
    HandlerResponse {
        status_code,
        headers: cors_headers(),
        body: body.to_string(),
    }
}

fn error_response(status_code: u16, message: String) -> HandlerResponse {
    respond(status_code, serde_json::json!({ "error": message }))
}

/// Handle one validation event.
pub fn handle(event: &serde_json::Value, model: &dyn ChatModel) -> HandlerResponse {
    // Accept both direct invocation and an API-gateway event whose `body`
    // is the request serialized as a string.
    let payload = match event.get("body") {
        Some(serde_json::Value::String(s)) => match serde_json::from_str(s) {
            Ok(value) => value,
            Err(e) => return error_response(400, format!("Invalid request body: {}", e)),
        },
        Some(value) if !value.is_null() => value.clone(),
        _ => event.clone(),
    };

    // The two required fields are read straight off the payload; the warmup
    // and missing-field checks must not depend on the rest of the request
    // parsing cleanly.
    let user_answer = payload
        .get("user_answer")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let expected = payload.get("expected").and_then(|v| v.as_str()).unwrap_or("");

    // Keep-alive ping from the frontend: acknowledge without touching the model
    if user_answer == "warmup" && expected == "warmup" {
        return respond(200, serde_json::json!({ "warmup": true }));
    }

    if user_answer.is_empty() || expected.is_empty() {
        return error_response(
            400,
            "Missing required fields: user_answer, expected".to_string(),
        );
    }

    let request: ValidateRequest = match serde_json::from_value(payload) {
        Ok(request) => request,
        Err(e) => return error_response(400, format!("Invalid request: {}", e)),
    };

    let prompt = build_validation_prompt(&request);

    match model.complete(&prompt) {
        Ok(reply) => match parse_verdict(&reply) {
            Ok(verdict) => match serde_json::to_value(&verdict) {
                Ok(value) => respond(200, value),
                Err(e) => error_response(500, e.to_string()),
            },
            Err(e) => error_response(500, format!("Failed to parse model reply: {}", e)),
        },
        Err(e) => error_response(500, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::{LingoError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted model for tests: fixed reply, counts calls
    struct ScriptedModel {
        reply: std::result::Result<String, String>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ChatModel for ScriptedModel {
        fn complete(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(s) => Ok(s.clone()),
                Err(message) => Err(LingoError::ValidationError(message.clone())),
            }
        }
    }

    const VERDICT_JSON: &str = r#"{
        "correct": true,
        "grammar_ok": true,
        "meaning_preserved": true,
        "key_vocabulary_present": [],
        "key_vocabulary_missing": [],
        "errors": [],
        "minor_issues": [],
        "confidence": 0.95
    }"#;

    fn event(user_answer: &str, expected: &str) -> serde_json::Value {
        serde_json::json!({
            "user_answer": user_answer,
            "expected": expected,
            "prompt": "The dog is sleeping.",
            "language": "de"
        })
    }

    fn body_json(response: &HandlerResponse) -> serde_json::Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[test]
    fn test_warmup_short_circuits() {
        let model = ScriptedModel::replying(VERDICT_JSON);
        let response = handle(&event("warmup", "warmup"), &model);

        assert_eq!(response.status_code, 200);
        assert_eq!(body_json(&response), serde_json::json!({"warmup": true}));
        assert_eq!(model.call_count(), 0);
    }

    #[test]
    fn test_warmup_ignores_malformed_optional_fields() {
        let model = ScriptedModel::replying(VERDICT_JSON);
        let event = serde_json::json!({
            "user_answer": "warmup",
            "expected": "warmup",
            "vocabulary": "not-a-list"
        });

        let response = handle(&event, &model);
        assert_eq!(response.status_code, 200);
        assert_eq!(body_json(&response), serde_json::json!({"warmup": true}));
        assert_eq!(model.call_count(), 0);
    }

    #[test]
    fn test_missing_fields_are_a_client_error() {
        let model = ScriptedModel::replying(VERDICT_JSON);

        for event in [
            serde_json::json!({"expected": "Der Hund schläft."}),
            serde_json::json!({"user_answer": "der hund schläft"}),
            serde_json::json!({"user_answer": "", "expected": ""}),
            serde_json::json!({"expected": "Der Hund schläft.", "vocabulary": 3}),
        ] {
            let response = handle(&event, &model);
            assert_eq!(response.status_code, 400);
            let body = body_json(&response);
            let message = body["error"].as_str().unwrap();
            assert!(message.contains("user_answer"));
            assert!(message.contains("expected"));
        }
        assert_eq!(model.call_count(), 0);
    }

    #[test]
    fn test_successful_validation() {
        let model = ScriptedModel::replying(VERDICT_JSON);
        let response = handle(&event("der hund schläft", "Der Hund schläft."), &model);

        assert_eq!(response.status_code, 200);
        assert_eq!(model.call_count(), 1);
        let body = body_json(&response);
        assert_eq!(body["correct"], true);
        assert_eq!(body["confidence"], 0.95);
    }

    #[test]
    fn test_fenced_reply_is_unwrapped() {
        let fenced = format!("```json\n{}\n```", VERDICT_JSON);
        let model = ScriptedModel::replying(&fenced);
        let response = handle(&event("der hund schläft", "Der Hund schläft."), &model);

        assert_eq!(response.status_code, 200);
        assert_eq!(body_json(&response)["correct"], true);
    }

    #[test]
    fn test_unparseable_reply_is_a_server_error() {
        let model = ScriptedModel::replying("The answer looks correct to me!");
        let response = handle(&event("der hund schläft", "Der Hund schläft."), &model);

        assert_eq!(response.status_code, 500);
        let body = body_json(&response);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Failed to parse model reply"));
    }

    #[test]
    fn test_model_failure_is_a_server_error() {
        let model = ScriptedModel::failing("upstream unavailable");
        let response = handle(&event("der hund schläft", "Der Hund schläft."), &model);

        assert_eq!(response.status_code, 500);
        assert!(body_json(&response)["error"]
            .as_str()
            .unwrap()
            .contains("upstream unavailable"));
    }

    #[test]
    fn test_gateway_body_string_is_unwrapped() {
        let inner = serde_json::to_string(&event("warmup", "warmup")).unwrap();
        let gateway_event = serde_json::json!({ "body": inner });

        let model = ScriptedModel::replying(VERDICT_JSON);
        let response = handle(&gateway_event, &model);
        assert_eq!(response.status_code, 200);
        assert_eq!(body_json(&response), serde_json::json!({"warmup": true}));
    }

    #[test]
    fn test_every_response_carries_cors_headers() {
        let model = ScriptedModel::replying("garbage");
        for event in [
            event("warmup", "warmup"),
            serde_json::json!({}),
            event("der hund schläft", "Der Hund schläft."),
        ] {
            let response = handle(&event, &model);
            assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
            assert_eq!(
                response.headers["Access-Control-Allow-Methods"],
                "POST, OPTIONS"
            );
            assert_eq!(
                response.headers["Access-Control-Allow-Headers"],
                "Content-Type"
            );
        }
    }

    #[test]
    fn test_language_defaults_to_de() {
        let request: ValidateRequest =
            serde_json::from_value(serde_json::json!({"user_answer": "a", "expected": "b"}))
                .unwrap();
        assert_eq!(request.language, "de");
        assert!(request.vocabulary.is_empty());
    }
}
