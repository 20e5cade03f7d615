//! Lingo Validate - LLM-backed answer validation
//!
//! A single-shot, stateless handler: build an evaluation prompt from the
//! request fields, ask a hosted chat model, parse its JSON verdict, and
//! answer in an API-gateway response envelope with permissive CORS headers.
//! No retries, no caching, no state between invocations.

pub mod handler;
pub mod language;
pub mod model;
pub mod prompt;
pub mod verdict;

pub use handler::{handle, HandlerResponse, ValidateRequest, VocabItem};
pub use language::language_name;
pub use model::{ChatModel, OpenAiChatModel};
pub use prompt::build_validation_prompt;
pub use verdict::{parse_verdict, strip_code_fence, Verdict};
