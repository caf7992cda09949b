// src/playlist_manager.rs
// Playlist resource collaborator over the judge API.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::{ApiClient, MessageResponse, PlaylistListResponse, PlaylistResponse};
use crate::errors::ApiError;
use crate::models::Playlist;

pub struct PlaylistManager {
    api: Arc<ApiClient>,
}

impl PlaylistManager {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list_playlists(&self) -> Result<Vec<Playlist>, ApiError> {
        let response: PlaylistListResponse = self.api.get("/playlists").await?;
        debug!("Fetched {} playlists", response.playlists.len());
        Ok(response.playlists)
    }

    pub async fn create_playlist(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Playlist, ApiError> {
        let body = CreatePlaylistBody { name, description };
        let response: PlaylistResponse = self.api.post("/playlists", &body).await?;
        info!("Created playlist {}", response.playlist.id);
        Ok(response.playlist)
    }

    pub async fn add_problem(&self, playlist_id: Uuid, problem_id: Uuid) -> Result<(), ApiError> {
        let body = AddProblemBody { problem_id };
        let response: MessageResponse = self
            .api
            .post(&format!("/playlists/{}/problems", playlist_id), &body)
            .await?;
        info!(
            "Added problem {} to playlist {}: {}",
            problem_id, playlist_id, response.message
        );
        Ok(())
    }
}

#[derive(Serialize, Debug)]
struct CreatePlaylistBody {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AddProblemBody {
    problem_id: Uuid,
}
