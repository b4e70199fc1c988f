//! File input for peekjson.
//!
//! Documents are loaded from disk or stdin, with optional gzip compression.

pub mod loader;
