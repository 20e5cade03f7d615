//! Lingo Corpus - Phrase set data model and discovery
//!
//! Phrase sets are the app's authored content: one JSON file per set under
//! a corpus directory, each holding set metadata and a list of phrases.

mod set;

pub use set::{discover_sets, Phrase, PhraseSet, SetMetadata};
