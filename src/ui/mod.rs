//! Immediate-mode UI helpers
//!
//! - Rebuilt every frame, no retained widget tree
//! - Simple rectangle-based layout
//! - Macroquad integration for rendering

mod input;
mod rect;
mod text_input;
pub mod theme;
mod widgets;

pub use input::*;
pub use rect::*;
pub use text_input::*;
pub use widgets::*;
