//! Editor state: the world being edited, its tilemap, and tile selection

use super::palette::{TileHandle, TilePalette};
use super::persistence::{apply_records, collect_records};
use super::tilemap::{CellPos, Tilemap};
use crate::api::{poll_slot, ApiClient, PendingOp, TileRecord, WorldSummary};
use tracing::{error, info};

/// Completed tile request
#[derive(Debug)]
enum TileReply {
    Loaded(Vec<TileRecord>),
    Saved(usize),
}

pub struct EditorState {
    pub world_id: i64,
    pub world_name: String,
    pub tilemap: Tilemap,
    pub palette: TilePalette,
    /// Tile painted by the primary pointer
    pub selected: Option<TileHandle>,
    /// Feedback line in the toolbar
    pub status: String,
    pending: Option<PendingOp<TileReply>>,
}

impl EditorState {
    pub fn new(world: &WorldSummary, palette: TilePalette) -> Self {
        info!("Editor opened for world {} ({})", world.id, world.world_name);
        Self {
            world_id: world.id,
            world_name: world.world_name.clone(),
            tilemap: Tilemap::new(),
            palette,
            selected: None,
            status: String::new(),
            pending: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn select_tile(&mut self, handle: TileHandle) {
        if let Some(name) = self.palette.name(handle) {
            info!("Selected tile: {}", name);
            self.selected = Some(handle);
        }
    }

    /// Select by tile-type name. Unknown names leave the selection unchanged.
    #[cfg(test)]
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match self.palette.resolve(name) {
            Some(handle) => {
                self.select_tile(handle);
                true
            }
            None => false,
        }
    }

    /// Primary-pointer press on `cell`. Overwrites unconditionally; no-op over UI
    /// or with nothing selected. Returns true if a cell was set.
    pub fn paint(&mut self, cell: CellPos, pointer_over_ui: bool) -> bool {
        if pointer_over_ui {
            return false;
        }
        match self.selected {
            Some(tile) => {
                self.tilemap.set(cell, tile);
                true
            }
            None => false,
        }
    }

    /// Fetch the world's tiles and merge them into the tilemap when they arrive
    pub fn request_load(&mut self, api: &ApiClient) {
        if self.is_busy() {
            return;
        }
        let api = api.clone();
        let world_id = self.world_id;
        self.status = "Loading tiles...".to_string();
        self.pending = Some(PendingOp::spawn(move || {
            api.fetch_tiles(world_id).map(TileReply::Loaded)
        }));
    }

    /// Snapshot the tilemap now and PUT it
    pub fn request_save(&mut self, api: &ApiClient) {
        if self.is_busy() {
            return;
        }
        let records = collect_records(&self.tilemap, &self.palette);
        let count = records.tiles.len();
        info!("Saving {} tiles for world {}", count, self.world_id);

        let api = api.clone();
        let world_id = self.world_id;
        self.status = "Saving...".to_string();
        self.pending = Some(PendingOp::spawn(move || {
            api.save_tiles(world_id, &records).map(|()| TileReply::Saved(count))
        }));
    }

    /// Apply a finished request, if any
    pub fn poll(&mut self) {
        let Some(result) = poll_slot(&mut self.pending) else {
            return;
        };
        match result {
            Ok(TileReply::Loaded(records)) => {
                let placed = apply_records(&mut self.tilemap, &self.palette, &records);
                info!("Tiles loaded: {} ({} placed)", records.len(), placed);
                self.status = format!("Tiles loaded: {}", records.len());
            }
            Ok(TileReply::Saved(count)) => {
                info!("Tiles saved successfully ({})", count);
                self.status = format!("Saved {} tiles.", count);
            }
            Err(e) => {
                error!("Tile request failed for world {}: {}", self.world_id, e);
                self.status = e.display_body().to_string();
            }
        }
    }
}
