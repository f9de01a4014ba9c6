//! Normalized entity cache with optional write-through persistence.
//!
//! - `types`: normalized record shapes
//! - `storage`: key/value persistence trait and filesystem backend
//! - `entity_store`: the store itself

mod entity_store;
mod storage;
mod types;

pub use entity_store::{EntityStore, StoreError, StoreEvent};
pub use storage::{FsStorage, Storage};
pub use types::{Album, Artist, Track, UserData};
