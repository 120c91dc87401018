//! Civic-information terminal client: a static roster of politicians and
//! legislation, plus a live top-headlines feed.

pub mod app;
pub mod config;
pub mod directory;
pub mod news;
pub mod theme;
pub mod ui;
pub mod util;
