//! Office Builder: a 2D tile editor for server-backed office worlds
//!
//! - Log in or register against the REST backend
//! - Pick, create or delete a world
//! - Paint tiles on an unbounded grid and save/load them

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod api;
mod app;
mod auth;
mod backend;
mod config;
mod editor;
mod storage;
mod ui;
mod validation;
mod world;

use api::ApiClient;
use app::AppState;
use auth::TokenStore;
use backend::LocalBackend;
use config::ClientConfig;
use macroquad::prelude::*;
use storage::{user_storage, LocalStorage};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use ui::{MouseState, UiContext};

/// Token storage subdirectory used with the in-process backend
const LOCAL_SESSION_DIR: &str = "local-session";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Office Builder v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[macroquad::main(window_conf)]
async fn main() {
    // Crash logging first
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);
    init_tracing();

    let storage = user_storage();
    let mut config = ClientConfig::load(&storage);

    // In-process backend sessions get their own token file
    let mut token_storage = storage.clone();
    let local_backend = if config.local_backend {
        match LocalBackend::start() {
            Ok(backend) => {
                config.api_base_url = backend.base_url().to_string();
                token_storage = LocalStorage::with_base_dir(storage.base_dir().join(LOCAL_SESSION_DIR));
                Some(backend)
            }
            Err(e) => {
                error!("{}; using {}", e, config.api_base_url);
                None
            }
        }
    } else {
        None
    };

    let tokens = TokenStore::new(token_storage);
    if local_backend.is_some() {
        if let Err(e) = tokens.clear() {
            error!("Failed to clear local session: {}", e);
        }
    }

    info!("=== Office Builder v{} ===", VERSION);
    info!("Backend: {}", config.api_base_url);

    let api = ApiClient::new(config.api_base_url.clone());
    let mut app = AppState::new(config, api, tokens);
    let mut ui_ctx = UiContext::new();

    loop {
        ui_ctx.begin_frame(MouseState::capture());
        app.frame(&mut ui_ctx, get_time());
        next_frame().await;
    }
}
