//! peekjson - an interactive terminal viewer for large JSON documents.
//!
//! The library holds everything but the terminal setup: the document model,
//! the renderer with its row index, pattern search, the filter language, the
//! navigation state machine and the ratatui front-end.

pub mod config;
pub mod document;
pub mod file;
pub mod input;
pub mod query;
pub mod render;
pub mod search;
pub mod theme;
pub mod ui;
pub mod viewer;
