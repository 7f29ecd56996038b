//! Basic UI widgets

use super::{theme, Rect, UiContext};
use macroquad::prelude::*;

/// Draw a text button, returns true if clicked. Disabled buttons never fire.
pub fn text_button(ctx: &mut UiContext, rect: Rect, label: &str, enabled: bool) -> bool {
    ctx.add_ui_area(rect);

    let hovered = ctx.mouse.inside(&rect);
    let bg = if !enabled {
        theme::BUTTON_DISABLED
    } else if ctx.mouse.clicking(&rect) {
        theme::BUTTON_PRESSED
    } else if hovered {
        theme::BUTTON_HOVER
    } else {
        theme::BUTTON_BG
    };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, bg);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, theme::INPUT_BORDER);

    let text_color = if enabled { theme::TEXT_COLOR } else { theme::TEXT_DIM };
    draw_centered_label(rect, label, theme::FONT_SIZE_CONTENT, text_color);

    enabled && ctx.mouse.clicked(&rect)
}

/// Draw a swatch button for a palette entry, outlined when selected
pub fn swatch_button(ctx: &mut UiContext, rect: Rect, color: Color, label: &str, selected: bool) -> bool {
    ctx.add_ui_area(rect);

    if selected {
        draw_rectangle(rect.x - 2.0, rect.y - 2.0, rect.w + 4.0, rect.h + 4.0, theme::ACCENT_COLOR);
    } else if ctx.mouse.inside(&rect) {
        draw_rectangle(rect.x - 1.0, rect.y - 1.0, rect.w + 2.0, rect.h + 2.0, theme::BUTTON_HOVER);
    }
    let swatch = Rect::new(rect.x, rect.y, rect.h, rect.h);
    draw_rectangle(swatch.x, swatch.y, swatch.w, swatch.h, color);
    draw_rectangle(swatch.right(), rect.y, rect.w - swatch.w, rect.h, theme::BUTTON_BG);
    draw_text(
        label,
        swatch.right() + 6.0,
        rect.y + (rect.h + theme::FONT_SIZE_CONTENT * 0.6) * 0.5,
        theme::FONT_SIZE_CONTENT,
        theme::TEXT_COLOR,
    );

    ctx.mouse.clicked(&rect)
}

/// Draw text centered in a rect - positions rounded for crisp rendering
pub fn draw_centered_label(rect: Rect, text: &str, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let x = (rect.center_x() - dims.width * 0.5).round();
    let y = (rect.y + (rect.h + dims.height) * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

/// Draw a status/feedback line
pub fn status_line(x: f32, y: f32, message: &str) {
    if !message.is_empty() {
        draw_text(message, x, y, theme::FONT_SIZE_CONTENT, theme::TEXT_WARN);
    }
}
