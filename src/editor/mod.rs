//! Tile editor
//!
//! - Tile palette (name -> handle)
//! - Sparse tilemap
//! - Save/load bridge to the backend's tile records
//! - Grid view with a palette panel and toolbar

mod palette;
mod persistence;
mod state;
mod tilemap;
mod view;

pub use palette::TilePalette;
pub use state::EditorState;
pub use view::{draw_editor, EditorAction, GridView};
