//! Single-line text field with cursor and keyboard handling

use super::{theme, Rect};
use macroquad::prelude::*;

/// State for a text input field
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content
    pub text: String,
    /// Cursor position (byte index, always on a char boundary)
    pub cursor: usize,
    /// Whether the input receives keyboard events
    pub focused: bool,
    /// Draw every character as `*`
    pub masked: bool,
    blink_timer: f32,
}

impl TextInputState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            ..Self::default()
        }
    }

    /// Password-style field
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    /// Remove all text
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete character before cursor (backspace)
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    /// Delete character after cursor (delete key)
    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_boundary();
            self.text.drain(self.cursor..next);
        }
    }

    /// Text as drawn on screen
    pub fn display_text(&self) -> String {
        if self.masked {
            "*".repeat(self.text.chars().count())
        } else {
            self.text.clone()
        }
    }

    /// Handle keyboard input when focused, returns true if text changed
    pub fn handle_input(&mut self) -> bool {
        if !self.focused {
            return false;
        }
        let before = self.text.len();
        let before_cursor = self.cursor;
        self.blink_timer += get_frame_time();

        if is_key_pressed(KeyCode::Left) {
            self.move_left();
        }
        if is_key_pressed(KeyCode::Right) {
            self.move_right();
        }
        if is_key_pressed(KeyCode::Home) {
            self.cursor = 0;
        }
        if is_key_pressed(KeyCode::End) {
            self.cursor = self.text.len();
        }
        if is_key_pressed(KeyCode::Backspace) {
            self.backspace();
        }
        if is_key_pressed(KeyCode::Delete) {
            self.delete();
        }

        while let Some(ch) = get_char_pressed() {
            // Filter control characters
            if ch >= ' ' && ch != '\u{7f}' {
                self.insert_char(ch);
            }
        }

        if self.cursor != before_cursor {
            self.blink_timer = 0.0;
        }
        self.text.len() != before
    }
}

/// Draw a text input field; a click inside focuses it. Returns true if the text changed.
pub fn draw_text_input(
    rect: Rect,
    state: &mut TextInputState,
    label: &str,
    mouse_pressed_at: Option<(f32, f32)>,
) -> bool {
    if let Some((x, y)) = mouse_pressed_at {
        state.focused = rect.contains(x, y);
    }

    let border = if state.focused { theme::ACCENT_COLOR } else { theme::INPUT_BORDER };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, theme::INPUT_BG);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, border);
    draw_text(label, rect.x, rect.y - 6.0, theme::FONT_SIZE_CONTENT, theme::TEXT_DIM);

    let changed = state.handle_input();

    let padding = 8.0;
    let font_size = theme::FONT_SIZE_INPUT;
    let text_x = rect.x + padding;
    let text_y = rect.y + (rect.h + font_size * 0.7) / 2.0;
    let shown = state.display_text();
    draw_text(&shown, text_x, text_y, font_size, theme::TEXT_COLOR);

    if state.focused && (state.blink_timer % 1.0) < 0.5 {
        let before_cursor = if state.masked {
            "*".repeat(state.text[..state.cursor].chars().count())
        } else {
            state.text[..state.cursor].to_string()
        };
        let cursor_x = text_x + measure_text(&before_cursor, None, font_size as u16, 1.0).width;
        draw_line(cursor_x, rect.y + 6.0, cursor_x, rect.bottom() - 6.0, 1.5, theme::TEXT_COLOR);
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_utf8() {
        let mut input = TextInputState::new("ab");
        input.insert_char('é');
        assert_eq!(input.text, "abé");
        input.backspace();
        assert_eq!(input.text, "ab");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_cursor_movement_and_delete() {
        let mut input = TextInputState::new("héllo");
        input.cursor = 0;
        input.move_right();
        input.move_right();
        assert_eq!(input.cursor, "hé".len());
        input.delete();
        assert_eq!(input.text, "hélo");
        input.move_left();
        input.move_left();
        input.move_left();
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_masked_display() {
        let mut input = TextInputState::masked();
        for c in "pässword".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.display_text(), "********");
        input.clear();
        assert_eq!(input.display_text(), "");
        assert_eq!(input.cursor, 0);
    }
}
