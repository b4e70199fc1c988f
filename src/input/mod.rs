//! Keyboard and mouse input for the interactive viewer.

pub mod handler;
pub mod keys;

pub use handler::InputHandler;
pub use keys::InputEvent;
