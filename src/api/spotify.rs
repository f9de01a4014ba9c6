//! Spotify Web API wrapper. Its token comes from the broker, not from an
//! OAuth flow of its own.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::broker::{BrokerClient, SpotifyToken};
use super::client::{ApiClient, ApiError, ClientEvent};

const SPOTIFY_BASE_URL: &str = "https://api.spotify.com/v1";

// -- Wire shapes (the normalized forms live in the store) --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// A track as the music API returns it, with full album and artist objects
/// embedded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
    pub id: String,
    pub name: String,
    pub duration_ms: u64,
    pub album: RawAlbum,
    pub artists: Vec<RawArtist>,
}

/// Response envelope of `GET /tracks?ids=...`.
#[derive(Debug, Deserialize)]
pub struct TracksResponse {
    pub tracks: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
pub struct RawPlaylist {
    pub id: String,
    pub name: String,
    pub tracks: PlaylistTracks,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistTracks {
    #[serde(default)]
    pub items: Vec<PlaylistEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistEntry {
    /// Null for entries that are not tracks (episodes, removed content).
    #[serde(default)]
    pub track: Option<RawTrack>,
}

/// Client for the music API.
#[derive(Clone)]
pub struct SpotifyClient {
    api: ApiClient,
}

impl SpotifyClient {
    /// Build a client and install a token obtained from the broker.
    ///
    /// Token acquisition failure is logged and leaves the client
    /// unauthenticated; later requests go out without an `Authorization`
    /// header and fail server-side.
    pub async fn connect(broker: &BrokerClient) -> Self {
        let client = Self {
            api: ApiClient::new(SPOTIFY_BASE_URL),
        };
        match broker.get_spotify_token().await {
            Ok(SpotifyToken {
                token: Some(token),
                token_type,
            }) => {
                client.api.set_token(&token, token_type.as_deref()).await;
                tracing::info!("music API token installed from broker");
            }
            Ok(_) => tracing::error!("could not get spotify token: token is null"),
            Err(e) => tracing::error!(error = %e, "could not get spotify token"),
        }
        client
    }

    pub async fn is_authenticated(&self) -> bool {
        self.api.is_authenticated().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.api.subscribe()
    }

    pub async fn get_track(&self, track_id: &str) -> Result<RawTrack, ApiError> {
        self.api
            .request_body(Method::GET, &format!("/tracks/{track_id}"), None)
            .await
    }

    pub async fn get_tracks(&self, track_ids: &[&str]) -> Result<Vec<RawTrack>, ApiError> {
        let path = format!("/tracks?ids={}", track_ids.join(","));
        let response: TracksResponse = self.api.request_body(Method::GET, &path, None).await?;
        Ok(response.tracks)
    }

    pub async fn get_album(&self, album_id: &str) -> Result<RawAlbum, ApiError> {
        self.api
            .request_body(Method::GET, &format!("/albums/{album_id}"), None)
            .await
    }

    pub async fn get_playlist(
        &self,
        playlist_id: &str,
        query: Option<&str>,
    ) -> Result<RawPlaylist, ApiError> {
        let path = match query {
            Some(query) => format!("/playlists/{playlist_id}?{query}"),
            None => format!("/playlists/{playlist_id}"),
        };
        self.api.request_body(Method::GET, &path, None).await
    }
}
