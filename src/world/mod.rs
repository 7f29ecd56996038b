//! World selection
//!
//! The world list is the hub between login and the editor: it lists the
//! user's worlds, creates and deletes them, and hands the chosen one to the editor.

mod browser;

pub use browser::{WorldAction, WorldBrowser};
