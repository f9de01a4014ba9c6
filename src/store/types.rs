//! Normalized entity records held by the store.

use serde::{Deserialize, Serialize};

use crate::api::{Image, RawAlbum, RawArtist, RawTrack};

/// A track flattened to identifier references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub album: String,
    pub artists: Vec<String>,
    pub name: String,
    /// Milliseconds.
    pub duration: u64,
}

impl From<&RawTrack> for Track {
    fn from(raw: &RawTrack) -> Self {
        Self {
            id: raw.id.clone(),
            album: raw.album.id.clone(),
            artists: raw.artists.iter().map(|artist| artist.id.clone()).collect(),
            name: raw.name.clone(),
            duration: raw.duration_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub images: Vec<Image>,
}

impl From<&RawAlbum> for Album {
    fn from(raw: &RawAlbum) -> Self {
        Self {
            id: raw.id.clone(),
            name: raw.name.clone(),
            images: raw.images.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

impl From<&RawArtist> for Artist {
    fn from(raw: &RawArtist) -> Self {
        Self {
            id: raw.id.clone(),
            name: raw.name.clone(),
        }
    }
}

/// Arbitrary per-user key/value data, merged shallowly on update.
pub type UserData = serde_json::Map<String, serde_json::Value>;
