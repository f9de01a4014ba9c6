//! HTTP clients for the broker and the music API.
//!
//! - `client`: authenticated-request helper shared by both
//! - `broker`: first-party vap.cx API (token broker + data files)
//! - `spotify`: Spotify Web API wrapper and its wire shapes

mod broker;
mod client;
mod spotify;
#[cfg(test)]
pub(crate) mod test_support;

pub use broker::{BrokerClient, SpotifyToken};
pub use client::{ApiClient, ApiError, ClientEvent};
pub use spotify::{
    Image, PlaylistEntry, PlaylistTracks, RawAlbum, RawArtist, RawPlaylist, RawTrack,
    SpotifyClient, TracksResponse,
};
