//! Tile load/save endpoints

use super::{decode, ApiClient, ApiError, Auth};
use serde::{Deserialize, Serialize};

/// One occupied cell as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRecord {
    pub tile_type: String,
    pub x: i32,
    pub y: i32,
}

impl TileRecord {
    pub fn new(tile_type: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            tile_type: tile_type.into(),
            x,
            y,
        }
    }
}

/// Body of `PUT /api/worlds/{id}/tiles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecordList {
    pub tiles: Vec<TileRecord>,
}

fn tiles_path(world_id: i64) -> String {
    format!("/api/worlds/{}/tiles", world_id)
}

impl ApiClient {
    pub fn fetch_tiles(&self, world_id: i64) -> Result<Vec<TileRecord>, ApiError> {
        let body = self.get_request(&tiles_path(world_id))?;
        decode(&body)
    }

    pub fn save_tiles(&self, world_id: i64, tiles: &TileRecordList) -> Result<(), ApiError> {
        self.json_request("PUT", &tiles_path(world_id), tiles, Auth::Bearer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;

    #[test]
    fn test_payload_shape() {
        let list = TileRecordList {
            tiles: vec![TileRecord::new("BasicTile1", 0, -2)],
        };
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            r#"{"tiles":[{"tileType":"BasicTile1","x":0,"y":-2}]}"#
        );
    }

    #[test]
    fn test_save_then_fetch() {
        let backend = LocalBackend::start().unwrap();
        let client = backend.signed_in_client("frank", "Abcdefg1!2").unwrap();
        client.create_world("Tiles").unwrap();
        let id = client.list_worlds().unwrap()[0].id;

        assert!(client.fetch_tiles(id).unwrap().is_empty());

        let list = TileRecordList {
            tiles: vec![
                TileRecord::new("BasicTile1", 0, 0),
                TileRecord::new("BasicTile3", 4, -1),
            ],
        };
        client.save_tiles(id, &list).unwrap();
        assert_eq!(client.fetch_tiles(id).unwrap(), list.tiles);
    }

    #[test]
    fn test_save_to_unknown_world_reports_body() {
        let backend = LocalBackend::start().unwrap();
        let client = backend.signed_in_client("gina", "Abcdefg1!2").unwrap();

        let err = client
            .save_tiles(999, &TileRecordList { tiles: Vec::new() })
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { code: 404, .. }));
        assert_eq!(err.display_body(), "World not found.");
    }
}
