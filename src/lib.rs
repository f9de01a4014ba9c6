//! Client library for the vap.cx music service.
//!
//! Two pieces:
//! - `api`: authenticated REST clients for the first-party token broker
//!   and the Spotify Web API
//! - `store`: a normalized, optionally persisted cache of
//!   track/album/artist/user records

pub mod api;
pub mod logging;
pub mod store;
