//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Tab bar and per-tab dispatch
//! - `helpers` - Task spawning and shared actions
//! - `politicians`, `legislation`, `news` - Tab bodies
//! - `status` - Status bar widget

mod events;
mod helpers;
mod input;
mod legislation;
mod loop_runner;
pub mod news;
mod politicians;
mod render;
mod status;

pub use loop_runner::{run, Action};
