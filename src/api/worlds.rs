//! World overview, create and delete endpoints

use super::{decode, ApiClient, ApiError, Auth};
use serde::{Deserialize, Serialize};

/// One entry of `GET /api/worlds/overview`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSummary {
    pub id: i64,
    pub world_name: String,
    pub user_id: i64,
}

/// Body of `POST /api/worlds/create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorldRequest {
    pub world_name: String,
}

impl ApiClient {
    /// Worlds owned by the authenticated user
    pub fn list_worlds(&self) -> Result<Vec<WorldSummary>, ApiError> {
        let body = self.get_request("/api/worlds/overview")?;
        decode(&body)
    }

    pub fn create_world(&self, world_name: &str) -> Result<(), ApiError> {
        let request = CreateWorldRequest {
            world_name: world_name.to_string(),
        };
        self.json_request("POST", "/api/worlds/create", &request, Auth::Bearer)?;
        Ok(())
    }

    pub fn delete_world(&self, world_id: i64) -> Result<(), ApiError> {
        self.delete_request(&format!("/api/worlds/{}", world_id))?;
        Ok(())
    }
}
