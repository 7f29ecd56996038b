//! In-process backend
//!
//! A small HTTP server speaking the same REST API as the real office builder
//! backend, with everything kept in memory. Used for offline play
//! (`local_backend` in the config) and by the tests.

mod store;

pub use store::{BackendStore, StoreError};

use crate::api::{CreateWorldRequest, Credentials, LoginResponse, TileRecordList};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

/// How often the server thread checks for shutdown
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to start local backend: {0}")]
    Bind(String),
    #[error("local backend is not listening on an IP address")]
    Address,
}

/// Status code and body of a routed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub json: bool,
}

impl Reply {
    fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status: 200,
                body,
                json: true,
            },
            Err(e) => Self::text(500, e.to_string()),
        }
    }

    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            json: false,
        }
    }

    fn ok(body: &str) -> Self {
        Self::text(200, body)
    }

    fn rejected(e: StoreError) -> Self {
        Self::text(e.status(), e.to_string())
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Reply> {
    serde_json::from_str(body).map_err(|e| Reply::text(400, format!("Invalid request body: {}", e)))
}

fn parse_id(segment: &str) -> Result<i64, Reply> {
    segment.parse().map_err(|_| Reply::text(404, "Not found."))
}

fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix("Bearer ").map(str::trim)
}

/// Route one request against the store
pub fn handle(store: &mut BackendStore, method: &str, url: &str, authorization: Option<&str>, body: &str) -> Reply {
    match route(store, method, url, authorization, body) {
        Ok(reply) | Err(reply) => reply,
    }
}

fn route(store: &mut BackendStore, method: &str, url: &str, authorization: Option<&str>, body: &str) -> Result<Reply, Reply> {
    let path = url.split('?').next().unwrap_or_default();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        ("POST", ["api", "auth", "register"]) => {
            let credentials: Credentials = parse_body(body)?;
            store.register(&credentials).map_err(Reply::rejected)?;
            info!("Registered user {}", credentials.username.trim());
            Ok(Reply::ok("Registration successful."))
        }
        ("POST", ["api", "auth", "login"]) => {
            let credentials: Credentials = parse_body(body)?;
            let token = store.login(&credentials).map_err(Reply::rejected)?;
            Ok(Reply::json(&LoginResponse { token }))
        }
        (_, ["api", "worlds", rest @ ..]) => {
            let user = store
                .authenticate(bearer_token(authorization))
                .map_err(Reply::rejected)?;
            match (method, rest) {
                ("GET", ["overview"]) => Ok(Reply::json(&store.list_worlds(user))),
                ("POST", ["create"]) => {
                    let request: CreateWorldRequest = parse_body(body)?;
                    let world = store
                        .create_world(user, &request.world_name)
                        .map_err(Reply::rejected)?;
                    Ok(Reply::json(&world))
                }
                ("DELETE", [id]) => {
                    store.delete_world(user, parse_id(id)?).map_err(Reply::rejected)?;
                    Ok(Reply::ok("World deleted."))
                }
                ("GET", [id, "tiles"]) => {
                    let tiles = store.tiles(user, parse_id(id)?).map_err(Reply::rejected)?;
                    Ok(Reply::json(&tiles))
                }
                ("PUT", [id, "tiles"]) => {
                    let id = parse_id(id)?;
                    let list: TileRecordList = parse_body(body)?;
                    let count = store.replace_tiles(user, id, list.tiles).map_err(Reply::rejected)?;
                    debug!("Stored {} tiles for world {}", count, id);
                    Ok(Reply::ok("Tiles saved."))
                }
                _ => Err(Reply::text(404, "Not found.")),
            }
        }
        _ => Err(Reply::text(404, "Not found.")),
    }
}

fn respond(request: tiny_http::Request, reply: Reply) {
    let content_type: &[u8] = if reply.json {
        b"application/json"
    } else {
        b"text/plain; charset=utf-8"
    };
    let mut response = tiny_http::Response::from_string(reply.body).with_status_code(reply.status);
    if let Ok(header) = tiny_http::Header::from_bytes(&b"Content-Type"[..], content_type) {
        response = response.with_header(header);
    }
    if let Err(e) = request.respond(response) {
        error!("Failed to send response: {}", e);
    }
}

fn serve(server: tiny_http::Server, running: Arc<AtomicBool>) {
    let mut store = BackendStore::new();
    while running.load(Ordering::Relaxed) {
        let mut request = match server.recv_timeout(POLL_INTERVAL) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(e) => {
                error!("Local backend receive failed: {}", e);
                continue;
            }
        };

        let method = request.method().as_str().to_string();
        let url = request.url().to_string();
        let authorization = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Authorization"))
            .map(|h| h.value.as_str().to_string());

        let mut body = String::new();
        let reply = match request.as_reader().read_to_string(&mut body) {
            Ok(_) => handle(&mut store, &method, &url, authorization.as_deref(), &body),
            Err(e) => Reply::text(400, format!("Unreadable request body: {}", e)),
        };
        debug!("{} {} -> {}", method, url, reply.status);
        respond(request, reply);
    }
}

/// Local backend running on a background thread until dropped
pub struct LocalBackend {
    base_url: String,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl LocalBackend {
    /// Start on an ephemeral loopback port
    pub fn start() -> Result<Self, BackendError> {
        Self::bind("127.0.0.1:0")
    }

    pub fn bind(addr: &str) -> Result<Self, BackendError> {
        let server = tiny_http::Server::http(addr).map_err(|e| BackendError::Bind(e.to_string()))?;
        let socket = server.server_addr().to_ip().ok_or(BackendError::Address)?;
        let base_url = format!("http://{}", socket);

        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let thread = thread::spawn(move || serve(server, flag));

        info!("Local backend listening on {}", base_url);
        Ok(Self {
            base_url,
            running,
            thread: Some(thread),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register `username` and return a client holding its token
    #[cfg(test)]
    pub fn signed_in_client(&self, username: &str, password: &str) -> Result<crate::api::ApiClient, crate::api::ApiError> {
        let client = crate::api::ApiClient::new(self.base_url());
        let credentials = Credentials::new(username, password);
        client.register(&credentials)?;
        let token = client.login(&credentials)?;
        Ok(client.with_token(token))
    }
}

impl Drop for LocalBackend {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in(store: &mut BackendStore, name: &str) -> String {
        let body = format!(r#"{{"Username":"{}","Password":"Abcdefg1!2"}}"#, name);
        assert_eq!(handle(store, "POST", "/api/auth/register", None, &body).status, 200);
        let reply = handle(store, "POST", "/api/auth/login", None, &body);
        assert_eq!(reply.status, 200);
        let login: LoginResponse = serde_json::from_str(&reply.body).unwrap();
        format!("Bearer {}", login.token)
    }

    #[test]
    fn test_unknown_route_and_bad_json() {
        let mut store = BackendStore::new();
        assert_eq!(handle(&mut store, "GET", "/nope", None, "").status, 404);
        assert_eq!(handle(&mut store, "POST", "/api/auth/login", None, "{not json").status, 400);

        let auth = signed_in(&mut store, "gina");
        assert_eq!(handle(&mut store, "PATCH", "/api/worlds/1", Some(&auth), "").status, 404);
        assert_eq!(handle(&mut store, "DELETE", "/api/worlds/abc", Some(&auth), "").status, 404);
    }

    #[test]
    fn test_worlds_require_token() {
        let mut store = BackendStore::new();
        let reply = handle(&mut store, "GET", "/api/worlds/overview", None, "");
        assert_eq!(reply, Reply::text(401, "Unauthorized."));
        let reply = handle(&mut store, "GET", "/api/worlds/overview", Some("Bearer bogus"), "");
        assert_eq!(reply.status, 401);
    }

    #[test]
    fn test_world_and_tile_routes() {
        let mut store = BackendStore::new();
        let auth = signed_in(&mut store, "hugo");

        let reply = handle(&mut store, "POST", "/api/worlds/create", Some(&auth), r#"{"worldName":"HQ"}"#);
        assert_eq!(reply.status, 200);

        let reply = handle(&mut store, "GET", "/api/worlds/overview", Some(&auth), "");
        assert!(reply.json);
        assert_eq!(reply.body, r#"[{"id":1,"worldName":"HQ","userId":1}]"#);

        let tiles = r#"{"tiles":[{"tileType":"BasicTile1","x":0,"y":-2}]}"#;
        assert_eq!(handle(&mut store, "PUT", "/api/worlds/1/tiles", Some(&auth), tiles).status, 200);
        let reply = handle(&mut store, "GET", "/api/worlds/1/tiles?fresh=1", Some(&auth), "");
        assert_eq!(reply.body, r#"[{"tileType":"BasicTile1","x":0,"y":-2}]"#);

        assert_eq!(handle(&mut store, "DELETE", "/api/worlds/1", Some(&auth), "").status, 200);
        let reply = handle(&mut store, "GET", "/api/worlds/1/tiles", Some(&auth), "");
        assert_eq!(reply, Reply::text(404, "World not found."));
    }

    #[test]
    fn test_create_rejects_bad_names() {
        let mut store = BackendStore::new();
        let auth = signed_in(&mut store, "iris");
        let long = format!(r#"{{"worldName":"{}"}}"#, "x".repeat(26));
        let reply = handle(&mut store, "POST", "/api/worlds/create", Some(&auth), &long);
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn test_server_round_trip() {
        let backend = LocalBackend::start().unwrap();
        assert!(backend.base_url().starts_with("http://127.0.0.1:"));

        let client = backend.signed_in_client("jill", "Abcdefg1!2").unwrap();
        assert!(client.token().is_some());
        assert!(client.list_worlds().unwrap().is_empty());
    }
}
