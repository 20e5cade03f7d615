//! Evaluation prompt construction

use crate::handler::ValidateRequest;
use crate::language::language_name;

/// Build the instruction the chat model evaluates the learner answer with.
///
/// The learner's answer arrives from speech recognition, so the prompt asks
/// the model to be lenient with transcription artifacts but strict with
/// actual language errors.
pub fn build_validation_prompt(req: &ValidateRequest) -> String {
    let lang_name = language_name(&req.language);

    let vocab_str = if req.vocabulary.is_empty() {
        String::new()
    } else {
        let items: Vec<String> = req
            .vocabulary
            .iter()
            .map(|v| format!("{} ({})", v.word, v.kind.as_deref().unwrap_or("word")))
            .collect();
        format!("\nKey vocabulary to check: {}", items.join(", "))
    };

    format!(
        r#"You are evaluating a language learner's spoken answer in {lang_name}.

The learner was asked to translate:
"{prompt}"

Expected answer: "{expected}"
Learner's answer (from speech recognition): "{user_answer}"
{vocab_str}

IMPORTANT: The learner's answer comes from speech recognition which may contain:
- Minor transcription errors (homophones, unclear endings)
- Missing punctuation or capitalization
- Slightly different word boundaries

Your task: Determine if the learner demonstrated knowledge of the correct answer.

Respond with ONLY a valid JSON object (no markdown, no explanation):
{{
  "correct": <true if the answer demonstrates correct knowledge, false otherwise>,
  "grammar_ok": <true if grammar is correct or acceptably close, false if clear grammar error>,
  "meaning_preserved": <true if the meaning matches the expected answer>,
  "key_vocabulary_present": [<list of key vocabulary words that were correctly used>],
  "key_vocabulary_missing": [<list of key vocabulary words that were missing or wrong>],
  "errors": [<list of significant errors if any, empty array if none>],
  "minor_issues": [<list of minor issues that don't affect correctness>],
  "confidence": <0.0 to 1.0 confidence score>
}}

Be lenient with speech recognition artifacts but strict with actual language errors (wrong articles, wrong verb forms, wrong word order)."#,
        lang_name = lang_name,
        prompt = req.prompt,
        expected = req.expected,
        user_answer = req.user_answer,
        vocab_str = vocab_str,
    )
}
