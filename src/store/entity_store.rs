//! Normalized, optionally persisted cache of music metadata.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tokio::sync::{RwLock, broadcast};

use crate::api::RawTrack;

use super::storage::Storage;
use super::types::{Album, Artist, Track, UserData};

const TRACKS_KEY: &str = "tracks";
const ARTISTS_KEY: &str = "artists";
const ALBUMS_KEY: &str = "albums";

/// Events emitted by the store on every real mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    TracksChanged,
    AlbumsChanged,
    ArtistsChanged,
    UserChanged(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Normalized cache of track/album/artist/user records.
///
/// Track, album and artist records are insert-only (first write wins);
/// user records are merged shallowly, last write wins per top-level field.
/// The three metadata maps are written through to the storage backend
/// after any call that inserted something. Users are deliberately never
/// persisted.
#[derive(Clone)]
pub struct EntityStore {
    tracks: Arc<RwLock<HashMap<String, Track>>>,
    albums: Arc<RwLock<HashMap<String, Album>>>,
    artists: Arc<RwLock<HashMap<String, Artist>>>,
    users: Arc<RwLock<HashMap<String, UserData>>>,
    now_date: Arc<RwLock<DateTime<Utc>>>,
    storage: Option<Arc<dyn Storage>>,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl EntityStore {
    pub fn new(storage: Option<Arc<dyn Storage>>) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            tracks: Arc::new(RwLock::new(HashMap::new())),
            albums: Arc::new(RwLock::new(HashMap::new())),
            artists: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            now_date: Arc::new(RwLock::new(Utc::now())),
            storage,
            event_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    /// Normalize raw tracks into the three metadata maps.
    ///
    /// For each track not already present, in input order: insert the
    /// flattened track, then each of its absent artists, then its absent
    /// album. A track that is already present is skipped entirely, along
    /// with its artists and album. If anything was inserted, the full maps
    /// are persisted after all insertions complete.
    pub async fn save_tracks(&self, raw_tracks: &[RawTrack]) -> Result<(), StoreError> {
        let mut inserted_tracks = 0usize;
        let mut inserted_artists = 0usize;
        let mut inserted_albums = 0usize;

        {
            let mut tracks = self.tracks.write().await;
            let mut artists = self.artists.write().await;
            let mut albums = self.albums.write().await;

            for raw in raw_tracks {
                if tracks.contains_key(&raw.id) {
                    continue;
                }
                tracks.insert(raw.id.clone(), Track::from(raw));
                inserted_tracks += 1;

                for raw_artist in &raw.artists {
                    if artists.contains_key(&raw_artist.id) {
                        continue;
                    }
                    artists.insert(raw_artist.id.clone(), Artist::from(raw_artist));
                    inserted_artists += 1;
                }

                if !albums.contains_key(&raw.album.id) {
                    albums.insert(raw.album.id.clone(), Album::from(&raw.album));
                    inserted_albums += 1;
                }
            }
        }

        if inserted_tracks == 0 && inserted_artists == 0 && inserted_albums == 0 {
            return Ok(());
        }

        tracing::debug!(
            tracks = inserted_tracks,
            artists = inserted_artists,
            albums = inserted_albums,
            "saved new records"
        );

        if inserted_tracks > 0 {
            let _ = self.event_tx.send(StoreEvent::TracksChanged);
        }
        if inserted_artists > 0 {
            let _ = self.event_tx.send(StoreEvent::ArtistsChanged);
        }
        if inserted_albums > 0 {
            let _ = self.event_tx.send(StoreEvent::AlbumsChanged);
        }

        self.persist().await
    }

    /// Write the three metadata maps through to storage, if configured.
    async fn persist(&self) -> Result<(), StoreError> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        let tracks = serde_json::to_string(&*self.tracks.read().await)?;
        let artists = serde_json::to_string(&*self.artists.read().await)?;
        let albums = serde_json::to_string(&*self.albums.read().await)?;
        storage.set(TRACKS_KEY, &tracks)?;
        storage.set(ARTISTS_KEY, &artists)?;
        storage.set(ALBUMS_KEY, &albums)?;
        Ok(())
    }

    /// Seed the metadata maps from persisted snapshots, skipping any keys
    /// already present. A missing snapshot is not an error.
    pub async fn load_from_storage(&self) -> Result<(), StoreError> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        seed_map(storage.as_ref(), TRACKS_KEY, &self.tracks).await?;
        seed_map(storage.as_ref(), ARTISTS_KEY, &self.artists).await?;
        seed_map(storage.as_ref(), ALBUMS_KEY, &self.albums).await?;

        tracing::debug!(
            tracks = self.tracks.read().await.len(),
            artists = self.artists.read().await.len(),
            albums = self.albums.read().await.len(),
            "seeded store from storage"
        );
        Ok(())
    }

    /// Shallow-merge `data` into the user record, creating it if absent.
    /// Nested objects are replaced wholesale.
    pub async fn update_user(&self, user_id: &str, data: UserData) {
        let mut users = self.users.write().await;
        let record = users.entry(user_id.to_string()).or_default();
        for (key, value) in data {
            record.insert(key, value);
        }
        drop(users);
        let _ = self.event_tx.send(StoreEvent::UserChanged(user_id.to_string()));
    }

    /// Refresh the reference timestamp used for time-relative display.
    pub async fn update_now(&self) {
        *self.now_date.write().await = Utc::now();
    }

    pub async fn now_date(&self) -> DateTime<Utc> {
        *self.now_date.read().await
    }

    pub async fn track(&self, id: &str) -> Option<Track> {
        self.tracks.read().await.get(id).cloned()
    }

    pub async fn album(&self, id: &str) -> Option<Album> {
        self.albums.read().await.get(id).cloned()
    }

    pub async fn artist(&self, id: &str) -> Option<Artist> {
        self.artists.read().await.get(id).cloned()
    }

    pub async fn user(&self, id: &str) -> Option<UserData> {
        self.users.read().await.get(id).cloned()
    }

    pub async fn track_count(&self) -> usize {
        self.tracks.read().await.len()
    }
}

async fn seed_map<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
    map: &RwLock<HashMap<String, T>>,
) -> Result<(), StoreError> {
    let Some(snapshot) = storage.get(key)? else {
        return Ok(());
    };
    let records: HashMap<String, T> = serde_json::from_str(&snapshot)?;
    let mut map = map.write().await;
    for (id, record) in records {
        map.entry(id).or_insert(record);
    }
    Ok(())
}
