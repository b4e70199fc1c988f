//! Document model for peekjson.
//!
//! A document is a closed tree of [`value::Value`]s addressed by
//! [`path::Path`]s. Documents are produced by the [`parser`] from
//! JSON or YAML input and are never mutated after loading.

pub mod parser;
pub mod path;
pub mod value;
