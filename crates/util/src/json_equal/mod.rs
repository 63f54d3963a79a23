//! JSON equality utilities.
//!
//! Provides deep equality comparison for JSON values.

mod deep_equal;

pub use deep_equal::deep_equal;
