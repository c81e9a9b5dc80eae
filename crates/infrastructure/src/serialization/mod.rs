//! Deterministic JSON serialization for the settings file.
//!
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
