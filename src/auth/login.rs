//! Login / register screen

use crate::api::{poll_slot, ApiClient, PendingOp};
use crate::ui::{self, draw_text_input, status_line, text_button, theme, Rect, TextInputState, UiContext};
use crate::validation::{validate_credentials, validate_registration};
use macroquad::prelude::*;
use tracing::{error, info};

/// Successful outcome of an auth request
#[derive(Debug, Clone, PartialEq, Eq)]
enum AuthReply {
    LoggedIn(String),
    Registered,
}

/// What the app should do after this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    Idle,
    /// Login succeeded with this token
    SignedIn(String),
}

pub struct LoginScreen {
    pub username: TextInputState,
    pub password: TextInputState,
    /// Feedback shown under the buttons
    pub message: String,
    pending: Option<PendingOp<AuthReply>>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        let mut username = TextInputState::default();
        username.focused = true;
        Self {
            username,
            password: TextInputState::masked(),
            message: String::new(),
            pending: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate the fields and send a login request
    pub fn submit_login(&mut self, api: &ApiClient) {
        if self.is_busy() {
            return;
        }
        let credentials = match validate_credentials(&self.username.text, &self.password.text) {
            Ok(credentials) => credentials,
            Err(e) => {
                self.message = e.to_string();
                return;
            }
        };

        self.message = "Logging in...".to_string();
        let api = api.clone();
        self.pending = Some(PendingOp::spawn(move || {
            api.login(&credentials).map(AuthReply::LoggedIn)
        }));
    }

    /// Validate the fields (including the password policy) and send a register request
    pub fn submit_register(&mut self, api: &ApiClient) {
        if self.is_busy() {
            return;
        }
        let credentials = match validate_registration(&self.username.text, &self.password.text) {
            Ok(credentials) => credentials,
            Err(e) => {
                self.message = e.to_string();
                return;
            }
        };

        self.message = "Registering...".to_string();
        let api = api.clone();
        self.pending = Some(PendingOp::spawn(move || {
            api.register(&credentials).map(|()| AuthReply::Registered)
        }));
    }

    /// Check the in-flight request. Returns the token once a login succeeds.
    pub fn poll(&mut self) -> Option<String> {
        match poll_slot(&mut self.pending)? {
            Ok(AuthReply::LoggedIn(token)) => {
                info!("Logged in as {}", self.username.text.trim());
                self.message.clear();
                self.password.clear();
                Some(token)
            }
            Ok(AuthReply::Registered) => {
                info!("Registered {}", self.username.text.trim());
                self.message = "Registration succeeded! You can now log in.".to_string();
                None
            }
            Err(e) => {
                error!("Auth request failed: {}", e);
                self.message = e.display_body().to_string();
                None
            }
        }
    }

    /// Draw the screen and handle its input
    pub fn draw(&mut self, ctx: &mut UiContext, api: &ApiClient) -> LoginAction {
        let screen = Rect::screen(screen_width(), screen_height());
        let form = screen.centered(360.0, 320.0);
        clear_background(theme::BG_COLOR);
        ui::draw_centered_label(form.slice_top(40.0), "Office Builder", theme::FONT_SIZE_HEADER, theme::TEXT_COLOR);

        let pressed_at = ctx.mouse.left_pressed.then_some((ctx.mouse.x, ctx.mouse.y));
        let user_rect = Rect::new(form.x, form.y + 80.0, form.w, 36.0);
        let pass_rect = Rect::new(form.x, form.y + 150.0, form.w, 36.0);
        draw_text_input(user_rect, &mut self.username, "Username", pressed_at);
        draw_text_input(pass_rect, &mut self.password, "Password", pressed_at);

        if is_key_pressed(KeyCode::Tab) {
            let to_password = self.username.focused;
            self.username.focused = !to_password;
            self.password.focused = to_password;
        }

        let (login_rect, register_rect) = Rect::new(form.x, form.y + 210.0, form.w, 36.0).split_h_px(form.w * 0.5);
        let busy = self.is_busy();
        if text_button(ctx, login_rect.pad(2.0), "Login", !busy) || is_key_pressed(KeyCode::Enter) {
            self.submit_login(api);
        }
        if text_button(ctx, register_rect.pad(2.0), "Register", !busy) {
            self.submit_register(api);
        }
        status_line(form.x, form.y + 280.0, &self.message);

        match self.poll() {
            Some(token) => LoginAction::SignedIn(token),
            None => LoginAction::Idle,
        }
    }
}
