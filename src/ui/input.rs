//! Input state for UI interaction

use super::Rect;
use macroquad::prelude::{
    is_mouse_button_down, is_mouse_button_pressed, mouse_position,
    mouse_wheel, MouseButton,
};

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub right_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub scroll: f32,         // Scroll wheel delta
}

impl MouseState {
    /// Read the current mouse state from macroquad
    pub fn capture() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            right_down: is_mouse_button_down(MouseButton::Right),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            scroll: mouse_wheel().1,
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is clicking inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// UI context passed through the frame
#[derive(Debug, Default)]
pub struct UiContext {
    pub mouse: MouseState,
    /// Screen areas covered by UI this frame (pointer input there is not for the world)
    ui_areas: Vec<Rect>,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.ui_areas.clear();
    }

    /// Mark a screen area as UI
    pub fn add_ui_area(&mut self, rect: Rect) {
        self.ui_areas.push(rect);
    }

    /// Whether the pointer is over any UI area registered this frame
    pub fn pointer_over_ui(&self) -> bool {
        self.ui_areas.iter().any(|r| self.mouse.inside(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse_at(x: f32, y: f32, pressed: bool) -> MouseState {
        MouseState {
            x,
            y,
            left_down: pressed,
            left_pressed: pressed,
            ..MouseState::default()
        }
    }

    #[test]
    fn test_clicked_requires_press_inside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(mouse_at(5.0, 5.0, true).clicked(&rect));
        assert!(!mouse_at(5.0, 5.0, false).clicked(&rect));
        assert!(!mouse_at(15.0, 5.0, true).clicked(&rect));
    }

    #[test]
    fn test_pointer_over_ui_resets_each_frame() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(mouse_at(5.0, 5.0, false));
        assert!(!ctx.pointer_over_ui());

        ctx.add_ui_area(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(ctx.pointer_over_ui());

        ctx.begin_frame(mouse_at(5.0, 5.0, false));
        assert!(!ctx.pointer_over_ui());
    }
}
