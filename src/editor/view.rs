//! Editor screen: toolbar, tile palette panel, and the paintable grid
//!
//! Grid cells are squares of `cell_size` pixels. Cell y grows upwards, so
//! screen y is flipped around `origin_y`.

use super::state::EditorState;
use super::tilemap::CellPos;
use crate::api::ApiClient;
use crate::ui::{draw_centered_label, status_line, swatch_button, text_button, theme, Rect, UiContext};
use macroquad::prelude::*;

const TOOLBAR_HEIGHT: f32 = 40.0;
const PALETTE_WIDTH: f32 = 180.0;
const SWATCH_HEIGHT: f32 = 28.0;
/// Keyboard pan speed in pixels per second
const PAN_SPEED: f32 = 400.0;

/// What the app should do after this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Idle,
    /// Return to the world list
    Back,
}

/// Screen-space placement of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridView {
    /// Screen position of the corner shared by cells (0,0) and (0,-1) / (-1,0)
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell_size: f32,
    /// Origin has been centred on the grid area
    placed: bool,
    panning: bool,
    last_mouse: (f32, f32),
}

impl GridView {
    pub fn new(origin_x: f32, origin_y: f32, cell_size: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_size: cell_size.max(1.0),
            placed: false,
            panning: false,
            last_mouse: (0.0, 0.0),
        }
    }

    /// View whose origin is centred on the grid area the first time it is drawn
    pub fn centered(cell_size: f32) -> Self {
        Self::new(0.0, 0.0, cell_size)
    }

    fn place_once(&mut self, rect: Rect) {
        if !self.placed {
            self.origin_x = rect.center_x().round();
            self.origin_y = (rect.y + rect.h * 0.5).round();
            self.placed = true;
        }
    }

    /// Cell under a screen point
    pub fn screen_to_cell(&self, sx: f32, sy: f32) -> CellPos {
        let cx = ((sx - self.origin_x) / self.cell_size).floor();
        let cy = ((self.origin_y - sy) / self.cell_size).floor();
        CellPos::new(cx as i32, cy as i32)
    }

    /// Top-left screen corner of a cell
    pub fn cell_top_left(&self, cell: CellPos) -> (f32, f32) {
        let sx = self.origin_x + cell.x as f32 * self.cell_size;
        let sy = self.origin_y - (cell.y + 1) as f32 * self.cell_size;
        (sx, sy)
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.origin_x += dx;
        self.origin_y += dy;
    }

    /// Range of cells (inclusive) that intersect `rect`
    fn visible_cells(&self, rect: Rect) -> (CellPos, CellPos) {
        let top_left = self.screen_to_cell(rect.x, rect.y);
        let bottom_right = self.screen_to_cell(rect.right(), rect.bottom());
        (
            CellPos::new(top_left.x, bottom_right.y),
            CellPos::new(bottom_right.x, top_left.y),
        )
    }

    /// Right-drag panning, as long as the drag started inside `rect`
    fn update_drag(&mut self, ctx: &UiContext, rect: Rect) {
        let mouse_pos = (ctx.mouse.x, ctx.mouse.y);
        if ctx.mouse.right_down && (self.panning || ctx.mouse.inside(&rect)) {
            if self.panning {
                self.pan(mouse_pos.0 - self.last_mouse.0, mouse_pos.1 - self.last_mouse.1);
            }
            self.panning = true;
        } else {
            self.panning = false;
        }
        self.last_mouse = mouse_pos;
    }

    fn update_keys(&mut self, dt: f32) {
        let step = PAN_SPEED * dt;
        if is_key_down(KeyCode::Left) || is_key_down(KeyCode::A) {
            self.pan(step, 0.0);
        }
        if is_key_down(KeyCode::Right) || is_key_down(KeyCode::D) {
            self.pan(-step, 0.0);
        }
        if is_key_down(KeyCode::Up) || is_key_down(KeyCode::W) {
            self.pan(0.0, step);
        }
        if is_key_down(KeyCode::Down) || is_key_down(KeyCode::S) {
            self.pan(0.0, -step);
        }
    }
}

fn tile_color(rgb: [u8; 3]) -> Color {
    Color::from_rgba(rgb[0], rgb[1], rgb[2], 255)
}

/// Draw the editor and handle its input for one frame
pub fn draw_editor(ctx: &mut UiContext, state: &mut EditorState, view: &mut GridView, api: &ApiClient) -> EditorAction {
    state.poll();

    let screen = Rect::screen(screen_width(), screen_height());
    clear_background(theme::BG_COLOR);

    let toolbar = screen.slice_top(TOOLBAR_HEIGHT);
    let body = screen.remaining_after_top(TOOLBAR_HEIGHT);
    let (palette_rect, grid_rect) = body.split_h_px(PALETTE_WIDTH);

    // Panels first so the pointer-over-UI test sees them before painting
    ctx.add_ui_area(toolbar);
    ctx.add_ui_area(palette_rect);

    draw_grid(ctx, state, view, grid_rect);

    // Toolbar
    draw_rectangle(toolbar.x, toolbar.y, toolbar.w, toolbar.h, theme::HEADER_COLOR);
    let mut action = EditorAction::Idle;
    let busy = state.is_busy();
    if text_button(ctx, Rect::new(toolbar.x + 6.0, toolbar.y + 5.0, 80.0, 30.0), "Back", true) {
        action = EditorAction::Back;
    }
    if text_button(ctx, Rect::new(toolbar.x + 92.0, toolbar.y + 5.0, 80.0, 30.0), "Save", !busy) {
        state.request_save(api);
    }
    draw_text(
        &state.world_name,
        toolbar.x + 190.0,
        toolbar.y + 27.0,
        theme::FONT_SIZE_CONTENT,
        theme::TEXT_COLOR,
    );
    status_line(toolbar.x + 420.0, toolbar.y + 27.0, &state.status);

    // Palette
    draw_rectangle(palette_rect.x, palette_rect.y, palette_rect.w, palette_rect.h, theme::PANEL_COLOR);
    draw_centered_label(palette_rect.slice_top(30.0), "Tiles", theme::FONT_SIZE_CONTENT, theme::TEXT_DIM);
    let mut clicked = None;
    for (i, (handle, def)) in state.palette.iter().enumerate() {
        let rect = Rect::new(
            palette_rect.x + 10.0,
            palette_rect.y + 36.0 + i as f32 * (SWATCH_HEIGHT + 8.0),
            palette_rect.w - 20.0,
            SWATCH_HEIGHT,
        );
        if swatch_button(ctx, rect, tile_color(def.rgb), &def.name, state.selected == Some(handle)) {
            clicked = Some(handle);
        }
    }
    if let Some(handle) = clicked {
        state.select_tile(handle);
    }

    action
}

fn draw_grid(ctx: &UiContext, state: &mut EditorState, view: &mut GridView, rect: Rect) {
    view.place_once(rect);
    view.update_drag(ctx, rect);
    view.update_keys(get_frame_time());

    let size = view.cell_size;
    let (min, max) = view.visible_cells(rect);

    // Tiles
    for (pos, handle) in state.tilemap.iter() {
        if pos.x < min.x || pos.x > max.x || pos.y < min.y || pos.y > max.y {
            continue;
        }
        let Some(def) = state.palette.get(handle) else {
            continue;
        };
        let (sx, sy) = view.cell_top_left(pos);
        draw_rectangle(sx, sy, size, size, tile_color(def.rgb));
    }

    // Grid lines
    if size >= 4.0 {
        for x in min.x..=max.x + 1 {
            let sx = view.origin_x + x as f32 * size;
            if sx >= rect.x && sx <= rect.right() {
                draw_line(sx, rect.y, sx, rect.bottom(), 1.0, theme::GRID_LINE);
            }
        }
        for y in min.y..=max.y + 1 {
            let sy = view.origin_y - y as f32 * size;
            if sy >= rect.y && sy <= rect.bottom() {
                draw_line(rect.x, sy, rect.right(), sy, 1.0, theme::GRID_LINE);
            }
        }
    }

    if !ctx.mouse.inside(&rect) {
        return;
    }
    let over_ui = ctx.pointer_over_ui();
    let hovered = view.screen_to_cell(ctx.mouse.x, ctx.mouse.y);
    if !over_ui {
        let (sx, sy) = view.cell_top_left(hovered);
        draw_rectangle(sx, sy, size, size, theme::HOVER_CELL);
    }
    if ctx.mouse.left_pressed {
        state.paint(hovered, over_ui);
    }
}
