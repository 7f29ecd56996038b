//! World list screen
//!
//! Lists the signed-in user's worlds and lets them create, delete, or open one.
//! A create is followed by a delayed re-list; a delete re-lists right away.

use crate::api::pending::OpResult;
use crate::api::{poll_slot, ApiClient, PendingOp, WorldSummary};
use crate::ui::{draw_centered_label, draw_text_input, status_line, text_button, theme, Rect, TextInputState, UiContext};
use crate::validation::validate_world_name;
use macroquad::prelude::*;
use tracing::{error, info};

const HEADER_HEIGHT: f32 = 48.0;
const ROW_HEIGHT: f32 = 34.0;

/// Which request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorldRequest {
    List,
    Create,
    Delete,
}

/// Completed world request
#[derive(Debug)]
enum WorldReply {
    Listed(Vec<WorldSummary>),
    Done,
}

/// What the app should do after this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldAction {
    Idle,
    Open(WorldSummary),
    LogOut,
}

pub struct WorldBrowser {
    /// Last list received from the backend
    pub worlds: Vec<WorldSummary>,
    pub name_input: TextInputState,
    pub message: String,
    pending: Option<PendingOp<WorldReply>>,
    in_flight: Option<WorldRequest>,
    /// Time at which a re-list is due
    refresh_at: Option<f64>,
    refresh_delay: f64,
    scroll: f32,
}

impl WorldBrowser {
    pub fn new(refresh_delay_secs: f64) -> Self {
        let mut name_input = TextInputState::default();
        name_input.focused = true;
        Self {
            worlds: Vec::new(),
            name_input,
            message: String::new(),
            pending: None,
            in_flight: None,
            refresh_at: None,
            refresh_delay: refresh_delay_secs.max(0.0),
            scroll: 0.0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget the previous user's list, feedback and any request in flight
    pub fn reset(&mut self) {
        self.pending = None;
        self.in_flight = None;
        self.worlds.clear();
        self.name_input.clear();
        self.message.clear();
        self.refresh_at = None;
        self.scroll = 0.0;
    }

    fn start(&mut self, request: WorldRequest, op: PendingOp<WorldReply>) {
        self.in_flight = Some(request);
        self.pending = Some(op);
    }

    pub fn request_list(&mut self, api: &ApiClient) {
        if self.is_busy() {
            return;
        }
        let api = api.clone();
        self.start(
            WorldRequest::List,
            PendingOp::spawn(move || api.list_worlds().map(WorldReply::Listed)),
        );
    }

    /// Validate the name field and send a create request
    pub fn request_create(&mut self, api: &ApiClient) {
        if self.is_busy() {
            return;
        }
        let name = match validate_world_name(&self.name_input.text) {
            Ok(name) => name.to_string(),
            Err(e) => {
                self.message = e.to_string();
                return;
            }
        };
        info!("Creating world {:?}", name);
        let api = api.clone();
        self.start(
            WorldRequest::Create,
            PendingOp::spawn(move || api.create_world(&name).map(|()| WorldReply::Done)),
        );
    }

    pub fn request_delete(&mut self, api: &ApiClient, world_id: i64) {
        if self.is_busy() {
            return;
        }
        info!("Deleting world {}", world_id);
        let api = api.clone();
        self.start(
            WorldRequest::Delete,
            PendingOp::spawn(move || api.delete_world(world_id).map(|()| WorldReply::Done)),
        );
    }

    /// Apply a finished request and start the delayed re-list once it is due
    pub fn poll(&mut self, api: &ApiClient, now: f64) {
        if let Some(result) = poll_slot(&mut self.pending) {
            if let Some(request) = self.in_flight.take() {
                self.finish(api, request, result, now);
            }
        }

        if self.refresh_at.is_some_and(|due| now >= due) && !self.is_busy() {
            self.refresh_at = None;
            self.request_list(api);
        }
    }

    fn finish(&mut self, api: &ApiClient, request: WorldRequest, result: OpResult<WorldReply>, now: f64) {
        match (request, result) {
            (_, Ok(WorldReply::Listed(worlds))) => {
                info!("Loaded {} worlds", worlds.len());
                self.worlds = worlds;
            }
            (WorldRequest::Create, Ok(WorldReply::Done)) => {
                self.message = "World created.".to_string();
                self.name_input.clear();
                self.refresh_at = Some(now + self.refresh_delay);
            }
            (_, Ok(WorldReply::Done)) => {
                self.message = "World deleted.".to_string();
                self.request_list(api);
            }
            (WorldRequest::List, Err(e)) => {
                error!("Failed to load worlds: {}", e);
                self.message = "Failed to load worlds.".to_string();
            }
            (WorldRequest::Create, Err(e)) => {
                error!("World creation failed: {}", e);
                self.message = format!("Creation failed: {}", e.display_body());
            }
            (WorldRequest::Delete, Err(e)) => {
                error!("World deletion failed: {}", e);
                self.message = format!("Deletion failed: {}", e.display_body());
            }
        }
    }

    /// Draw the list and handle its input for one frame
    pub fn draw(&mut self, ctx: &mut UiContext, api: &ApiClient, now: f64) -> WorldAction {
        self.poll(api, now);

        let screen = Rect::screen(screen_width(), screen_height());
        clear_background(theme::BG_COLOR);
        let mut action = WorldAction::Idle;

        // Header
        let header = screen.slice_top(HEADER_HEIGHT);
        draw_rectangle(header.x, header.y, header.w, header.h, theme::HEADER_COLOR);
        draw_centered_label(header, "Your Worlds", theme::FONT_SIZE_HEADER, theme::TEXT_COLOR);
        if text_button(ctx, Rect::new(header.right() - 110.0, header.y + 9.0, 100.0, 30.0), "Log out", true) {
            action = WorldAction::LogOut;
        }

        let content = screen.remaining_after_top(HEADER_HEIGHT).pad(16.0);
        let column = Rect::new(content.center_x() - 260.0, content.y, 520.0, content.h);

        // Create row
        let busy = self.is_busy();
        let pressed_at = ctx.mouse.left_pressed.then_some((ctx.mouse.x, ctx.mouse.y));
        let (name_rect, create_rect) =
            Rect::new(column.x, column.y + 20.0, column.w, 36.0).split_h_px(column.w - 110.0);
        draw_text_input(name_rect, &mut self.name_input, "New world name", pressed_at);
        let submitted = self.name_input.focused && is_key_pressed(KeyCode::Enter);
        if text_button(ctx, create_rect.pad(2.0), "Create", !busy) || submitted {
            self.request_create(api);
        }
        status_line(column.x, column.y + 80.0, &self.message);

        // List
        let list = Rect::new(column.x, column.y + 96.0, column.w, column.h - 96.0);
        draw_rectangle(list.x, list.y, list.w, list.h, theme::PANEL_COLOR);
        if ctx.mouse.inside(&list) && ctx.mouse.scroll != 0.0 {
            let max_scroll = (self.worlds.len() as f32 * ROW_HEIGHT - list.h).max(0.0);
            self.scroll = (self.scroll - ctx.mouse.scroll * 20.0).clamp(0.0, max_scroll);
        }

        if self.worlds.is_empty() {
            let text = if busy { "Loading..." } else { "No worlds yet" };
            draw_centered_label(list.slice_top(40.0), text, theme::FONT_SIZE_CONTENT, theme::TEXT_DIM);
        }

        let mut delete_id = None;
        for (i, world) in self.worlds.iter().enumerate() {
            let y = list.y + 4.0 + i as f32 * ROW_HEIGHT - self.scroll;
            if y < list.y || y + ROW_HEIGHT > list.bottom() {
                continue;
            }
            let (open_rect, delete_rect) =
                Rect::new(list.x + 4.0, y, list.w - 8.0, ROW_HEIGHT - 4.0).split_h_px(list.w - 100.0);
            if text_button(ctx, open_rect.pad(1.0), &world.world_name, true) {
                action = WorldAction::Open(world.clone());
            }
            if text_button(ctx, delete_rect.pad(1.0), "Delete", !busy) {
                delete_id = Some(world.id);
            }
        }
        if let Some(id) = delete_id {
            self.request_delete(api, id);
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::pending::test_util::wait_until_idle;
    use crate::backend::LocalBackend;

    fn settle(browser: &mut WorldBrowser, api: &ApiClient, now: f64) {
        wait_until_idle(browser, |b| {
            b.poll(api, now);
            b.is_busy()
        });
    }

    #[test]
    fn test_invalid_name_never_sends() {
        let api = ApiClient::new("http://127.0.0.1:1");
        let mut browser = WorldBrowser::new(0.3);
        browser.name_input = TextInputState::new("   ");
        browser.request_create(&api);
        assert!(!browser.is_busy());
        assert_eq!(browser.message, "World name must be between 1 and 25 characters.");

        browser.name_input = TextInputState::new("x".repeat(26));
        browser.request_create(&api);
        assert!(!browser.is_busy());
    }

    #[test]
    fn test_create_schedules_delayed_refresh() {
        let backend = LocalBackend::start().unwrap();
        let api = backend.signed_in_client("lena", "Abcdefg1!2").unwrap();
        let mut browser = WorldBrowser::new(0.5);

        browser.name_input = TextInputState::new("  Head Office ");
        browser.request_create(&api);
        settle(&mut browser, &api, 10.0);

        assert_eq!(browser.message, "World created.");
        assert!(browser.name_input.text.is_empty());
        assert_eq!(browser.refresh_at, Some(10.5));
        assert!(browser.worlds.is_empty());

        // Not yet due
        browser.poll(&api, 10.4);
        assert!(!browser.is_busy());

        browser.poll(&api, 10.5);
        assert!(browser.is_busy());
        settle(&mut browser, &api, 10.5);
        assert_eq!(browser.refresh_at, None);
        assert_eq!(browser.worlds.len(), 1);
        assert_eq!(browser.worlds[0].world_name, "Head Office");
    }

    #[test]
    fn test_delete_relists_immediately() {
        let backend = LocalBackend::start().unwrap();
        let api = backend.signed_in_client("mona", "Abcdefg1!2").unwrap();
        api.create_world("A").unwrap();
        api.create_world("B").unwrap();

        let mut browser = WorldBrowser::new(0.3);
        browser.request_list(&api);
        settle(&mut browser, &api, 0.0);
        assert_eq!(browser.worlds.len(), 2);

        let id = browser.worlds[0].id;
        browser.request_delete(&api, id);
        settle(&mut browser, &api, 0.0);
        assert_eq!(browser.message, "World deleted.");
        assert_eq!(browser.worlds.len(), 1);
        assert_eq!(browser.worlds[0].world_name, "B");
    }

    #[test]
    fn test_failure_messages() {
        let backend = LocalBackend::start().unwrap();
        let api = backend.signed_in_client("nina", "Abcdefg1!2").unwrap();

        let mut browser = WorldBrowser::new(0.3);
        browser.request_delete(&api, 999);
        settle(&mut browser, &api, 0.0);
        assert_eq!(browser.message, "Deletion failed: World not found.");

        let anonymous = ApiClient::new(backend.base_url());
        browser.request_list(&anonymous);
        settle(&mut browser, &anonymous, 0.0);
        assert_eq!(browser.message, "Failed to load worlds.");

        browser.name_input = TextInputState::new("Office");
        browser.request_create(&anonymous);
        settle(&mut browser, &anonymous, 0.0);
        assert!(browser.message.starts_with("Creation failed: "));
        assert_eq!(browser.refresh_at, None);
    }

    #[test]
    fn test_reset_clears_previous_user() {
        let mut browser = WorldBrowser::new(0.3);
        browser.worlds.push(WorldSummary {
            id: 1,
            world_name: "Old".into(),
            user_id: 1,
        });
        browser.message = "World created.".into();
        browser.reset();
        assert!(browser.worlds.is_empty());
        assert!(browser.message.is_empty());
    }
}
