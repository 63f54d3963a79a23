//! Structural cloning of JSON documents.

mod clone;

pub use clone::clone;
