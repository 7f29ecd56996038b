//! In-memory users, sessions, worlds and tiles

use crate::api::{Credentials, TileRecord, WorldSummary};
use crate::validation::validate_world_name;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

const TOKEN_LEN: usize = 32;

/// Request rejected by the store. The message is sent as the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Username and password are required.")]
    MissingCredentials,
    #[error("Username already exists.")]
    UsernameTaken,
    #[error("Invalid username or password.")]
    InvalidLogin,
    #[error("Unauthorized.")]
    Unauthorized,
    #[error("World not found.")]
    WorldNotFound,
    #[error("World name must be between 1 and 25 characters.")]
    WorldNameLength,
}

impl StoreError {
    /// HTTP status for this rejection
    pub fn status(&self) -> u16 {
        match self {
            StoreError::MissingCredentials | StoreError::WorldNameLength => 400,
            StoreError::InvalidLogin | StoreError::Unauthorized => 401,
            StoreError::WorldNotFound => 404,
            StoreError::UsernameTaken => 409,
        }
    }
}

struct UserRecord {
    id: i64,
    salt: [u8; 16],
    hash: [u8; 32],
}

struct WorldRecord {
    summary: WorldSummary,
    tiles: Vec<TileRecord>,
}

fn hash_password(salt: &[u8; 16], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[derive(Default)]
pub struct BackendStore {
    users: HashMap<String, UserRecord>,
    sessions: HashMap<String, i64>,
    /// Keyed by id, so iteration follows creation order
    worlds: BTreeMap<i64, WorldRecord>,
    next_user_id: i64,
    next_world_id: i64,
}

impl BackendStore {
    pub fn new() -> Self {
        Self {
            next_user_id: 1,
            next_world_id: 1,
            ..Self::default()
        }
    }

    pub fn register(&mut self, credentials: &Credentials) -> Result<(), StoreError> {
        let username = credentials.username.trim();
        if username.is_empty() || credentials.password.is_empty() {
            return Err(StoreError::MissingCredentials);
        }
        if self.users.contains_key(username) {
            return Err(StoreError::UsernameTaken);
        }

        let salt: [u8; 16] = rand::thread_rng().gen();
        let user = UserRecord {
            id: self.next_user_id,
            salt,
            hash: hash_password(&salt, &credentials.password),
        };
        self.next_user_id += 1;
        self.users.insert(username.to_string(), user);
        Ok(())
    }

    /// Check the password and open a new session
    pub fn login(&mut self, credentials: &Credentials) -> Result<String, StoreError> {
        let user = self
            .users
            .get(credentials.username.trim())
            .ok_or(StoreError::InvalidLogin)?;
        if hash_password(&user.salt, &credentials.password) != user.hash {
            return Err(StoreError::InvalidLogin);
        }

        let token = generate_token();
        self.sessions.insert(token.clone(), user.id);
        Ok(token)
    }

    /// User id owning a bearer token
    pub fn authenticate(&self, token: Option<&str>) -> Result<i64, StoreError> {
        token
            .filter(|t| !t.is_empty())
            .and_then(|t| self.sessions.get(t).copied())
            .ok_or(StoreError::Unauthorized)
    }

    pub fn list_worlds(&self, user_id: i64) -> Vec<WorldSummary> {
        self.worlds
            .values()
            .filter(|w| w.summary.user_id == user_id)
            .map(|w| w.summary.clone())
            .collect()
    }

    pub fn create_world(&mut self, user_id: i64, world_name: &str) -> Result<WorldSummary, StoreError> {
        let name = validate_world_name(world_name).map_err(|_| StoreError::WorldNameLength)?;
        let summary = WorldSummary {
            id: self.next_world_id,
            world_name: name.to_string(),
            user_id,
        };
        self.next_world_id += 1;
        self.worlds.insert(
            summary.id,
            WorldRecord {
                summary: summary.clone(),
                tiles: Vec::new(),
            },
        );
        Ok(summary)
    }

    fn owned_world(&mut self, user_id: i64, world_id: i64) -> Result<&mut WorldRecord, StoreError> {
        self.worlds
            .get_mut(&world_id)
            .filter(|w| w.summary.user_id == user_id)
            .ok_or(StoreError::WorldNotFound)
    }

    /// Delete a world and its tiles
    pub fn delete_world(&mut self, user_id: i64, world_id: i64) -> Result<(), StoreError> {
        self.owned_world(user_id, world_id)?;
        self.worlds.remove(&world_id);
        Ok(())
    }

    pub fn tiles(&mut self, user_id: i64, world_id: i64) -> Result<Vec<TileRecord>, StoreError> {
        Ok(self.owned_world(user_id, world_id)?.tiles.clone())
    }

    /// Replace a world's tiles. Records sharing a cell collapse to the last one.
    pub fn replace_tiles(&mut self, user_id: i64, world_id: i64, records: Vec<TileRecord>) -> Result<usize, StoreError> {
        let world = self.owned_world(user_id, world_id)?;

        let mut slots: HashMap<(i32, i32), usize> = HashMap::new();
        let mut tiles: Vec<TileRecord> = Vec::with_capacity(records.len());
        for record in records {
            match slots.get(&(record.x, record.y)) {
                Some(&i) => tiles[i] = record,
                None => {
                    slots.insert((record.x, record.y), tiles.len());
                    tiles.push(record);
                }
            }
        }

        world.tiles = tiles;
        Ok(world.tiles.len())
    }
}
