//! Application state and screen flow
//!
//! Login -> world list -> editor. Each screen keeps its own state; the app
//! switches between them based on the action a screen returns each frame.

use crate::api::{ApiClient, WorldSummary};
use crate::auth::{LoginAction, LoginScreen, TokenStore};
use crate::config::ClientConfig;
use crate::editor::{draw_editor, EditorAction, EditorState, GridView, TilePalette};
use crate::ui::UiContext;
use crate::world::{WorldAction, WorldBrowser};
use tracing::{error, info};

/// The screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Worlds,
    Editor,
}

pub struct AppState {
    pub screen: Screen,
    pub api: ApiClient,
    pub config: ClientConfig,
    tokens: TokenStore,
    pub login: LoginScreen,
    pub worlds: WorldBrowser,
    /// Present while a world is open
    pub editor: Option<EditorState>,
    grid: GridView,
}

impl AppState {
    /// Restore a stored token if there is one and start on the matching screen
    pub fn new(config: ClientConfig, api: ApiClient, tokens: TokenStore) -> Self {
        let grid = GridView::centered(config.cell_size);
        let mut app = Self {
            screen: Screen::Login,
            api,
            worlds: WorldBrowser::new(config.refresh_delay_secs),
            config,
            tokens,
            login: LoginScreen::new(),
            editor: None,
            grid,
        };

        if let Some(token) = app.tokens.load() {
            app.api.set_token(Some(token));
            app.enter_worlds();
        }
        app
    }

    fn enter_worlds(&mut self) {
        self.screen = Screen::Worlds;
        self.worlds.request_list(&self.api);
    }

    /// Persist the token and move on to the world list
    pub fn sign_in(&mut self, token: String) {
        if let Err(e) = self.tokens.save(&token) {
            error!("Failed to store auth token: {}", e);
        }
        self.api.set_token(Some(token));
        self.login = LoginScreen::new();
        self.worlds.reset();
        self.enter_worlds();
    }

    /// Forget the token and return to the login screen
    pub fn sign_out(&mut self) {
        if let Err(e) = self.tokens.clear() {
            error!("Failed to clear auth token: {}", e);
        }
        self.api.set_token(None);
        self.editor = None;
        self.worlds.reset();
        self.login = LoginScreen::new();
        self.screen = Screen::Login;
    }

    /// Open the editor on `world` and fetch its tiles
    pub fn open_world(&mut self, world: &WorldSummary) {
        let palette = TilePalette::from_config(&self.config.palette);
        let mut editor = EditorState::new(world, palette);
        editor.request_load(&self.api);
        self.editor = Some(editor);
        self.grid = GridView::centered(self.config.cell_size);
        self.screen = Screen::Editor;
    }

    /// Leave the editor and refresh the world list
    pub fn close_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            info!("Closed editor for world {}", editor.world_id);
        }
        self.enter_worlds();
    }

    /// Run one frame of the current screen
    pub fn frame(&mut self, ctx: &mut UiContext, now: f64) {
        match self.screen {
            Screen::Login => {
                if let LoginAction::SignedIn(token) = self.login.draw(ctx, &self.api) {
                    self.sign_in(token);
                }
            }
            Screen::Worlds => match self.worlds.draw(ctx, &self.api, now) {
                WorldAction::Idle => {}
                WorldAction::Open(world) => self.open_world(&world),
                WorldAction::LogOut => self.sign_out(),
            },
            Screen::Editor => {
                let action = match self.editor.as_mut() {
                    Some(editor) => draw_editor(ctx, editor, &mut self.grid, &self.api),
                    None => EditorAction::Back,
                };
                if action == EditorAction::Back {
                    self.close_editor();
                }
            }
        }
    }
}
