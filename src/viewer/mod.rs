//! Interactive navigation.
//!
//! The [`Viewer`] coordinates the renderer, the search engine and the filter
//! evaluator. It owns the expand state and is the only thing that mutates it,
//! always between renders.
//!
//! # Modules
//!
//! - `mode`: the modal state of the prompt line
//! - `state`: the viewer itself and its status messages

pub mod mode;
pub mod state;

pub use crate::render::expand::ExpandState;
pub use mode::Mode;
pub use state::{Message, MessageLevel, Viewer};
