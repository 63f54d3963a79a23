//! json-mutate-util - Value utilities shared by the json-mutate engines.
//!
//! Everything here operates on `serde_json::Value` documents and is free of
//! side effects.

pub mod json_clone;
pub mod json_equal;
pub mod number;

// Re-exports for convenience
pub use json_clone::clone;
pub use json_equal::deep_equal;
pub use number::{add, compare, is_comparable, multiply};
