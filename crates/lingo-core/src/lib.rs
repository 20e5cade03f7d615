//! Lingo Core - Foundational types for the Lingo content tools
//!
//! This crate provides the types the other Lingo crates depend on:
//! - `ContentHash` - SHA-256 based content hashing for change detection
//! - Error types and Result alias

mod error;
mod hash;

pub use error::{LingoError, Result};
pub use hash::ContentHash;
