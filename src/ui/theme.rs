//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Dark background color
pub const BG_COLOR: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Header/toolbar background
pub const HEADER_COLOR: Color = Color::new(0.15, 0.15, 0.18, 1.0);

/// Side panel background
pub const PANEL_COLOR: Color = Color::new(0.13, 0.13, 0.15, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.4, 0.4, 0.45, 1.0);

/// Error/feedback text
pub const TEXT_WARN: Color = Color::new(0.95, 0.6, 0.4, 1.0);

/// Accent color (cyan)
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

// =============================================================================
// Widgets
// =============================================================================

pub const INPUT_BG: Color = Color::new(0.12, 0.12, 0.14, 1.0);
pub const INPUT_BORDER: Color = Color::new(0.314, 0.314, 0.314, 1.0);

pub const BUTTON_BG: Color = Color::new(0.196, 0.196, 0.216, 1.0);
pub const BUTTON_HOVER: Color = Color::new(0.235, 0.314, 0.392, 1.0);
pub const BUTTON_PRESSED: Color = Color::new(0.235, 0.235, 0.275, 1.0);
pub const BUTTON_DISABLED: Color = Color::new(0.15, 0.15, 0.16, 1.0);

/// Editor grid lines
pub const GRID_LINE: Color = Color::new(0.2, 0.2, 0.23, 1.0);

/// Cell under the pointer
pub const HOVER_CELL: Color = Color::new(1.0, 1.0, 1.0, 0.15);

// =============================================================================
// Font Sizes
// =============================================================================

/// Header/title text size
pub const FONT_SIZE_HEADER: f32 = 28.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 18.0;

/// Text field contents
pub const FONT_SIZE_INPUT: f32 = 22.0;
