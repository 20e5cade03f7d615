//! Speech locale to synthesis voice mapping
//!
//! A set whose `speechLang` has no entry here is skipped whole: generating
//! audio in the wrong voice is worse than generating nothing.

/// Voice per speech locale (female voices throughout for consistency)
const VOICES: &[(&str, &str)] = &[
    ("de-DE", "Charlotte"),
    ("en-US", "Rachel"),
    ("en-GB", "Alice"),
    ("es-ES", "Matilda"),
    ("es-MX", "Domi"),
    ("fr-FR", "Lily"),
    ("it-IT", "Elli"),
    ("pl-PL", "Nicole"),
    ("pt-BR", "Grace"),
    ("nl-NL", "Emily"),
    ("ja-JP", "Dorothy"),
    ("ko-KR", "Sarah"),
    ("zh-CN", "Serena"),
];

/// Look up the synthesis voice for a speech locale code.
pub fn voice_for_locale(locale: &str) -> Option<&'static str> {
    VOICES
        .iter()
        .find(|(code, _)| *code == locale)
        .map(|(_, voice)| *voice)
}
