//! Tilemap <-> TileRecord conversion
//!
//! Saving produces one record per occupied cell in bounding-rectangle order.
//! Loading is additive: records overwrite their cells, other cells are kept,
//! and records naming an unknown tile type are dropped.

use super::palette::TilePalette;
use super::tilemap::{CellPos, Tilemap};
use crate::api::{TileRecord, TileRecordList};
use tracing::debug;

/// Serialize the occupied cells
pub fn collect_records(tilemap: &Tilemap, palette: &TilePalette) -> TileRecordList {
    let tiles = tilemap
        .cells_in_bounds_order()
        .into_iter()
        .filter_map(|(pos, handle)| {
            palette
                .name(handle)
                .map(|name| TileRecord::new(name, pos.x, pos.y))
        })
        .collect();
    TileRecordList { tiles }
}

/// Write records into the tilemap. Returns how many were placed.
pub fn apply_records(tilemap: &mut Tilemap, palette: &TilePalette, records: &[TileRecord]) -> usize {
    let mut placed = 0;
    for record in records {
        match palette.resolve(&record.tile_type) {
            Some(handle) => {
                tilemap.set(CellPos::new(record.x, record.y), handle);
                placed += 1;
            }
            None => debug!("Skipping unknown tile type {:?}", record.tile_type),
        }
    }
    placed
}
