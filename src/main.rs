use std::sync::Arc;

use anyhow::Result;

use vap_rs::api::{BrokerClient, SpotifyClient};
use vap_rs::logging;
use vap_rs::store::{EntityStore, FsStorage};

const CACHE_DIR: &str = ".cache";

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    tracing::info!("=== vap-rs starting ===");

    // Everything is constructed once here and handed out by reference;
    // no module-level singletons.
    let broker = BrokerClient::new();
    let spotify = SpotifyClient::connect(&broker).await;

    let storage = Arc::new(FsStorage::new(CACHE_DIR)?);
    let store = EntityStore::new(Some(storage));
    store.load_from_storage().await?;
    store.update_now().await;

    tracing::info!(
        tracks = store.track_count().await,
        authenticated = spotify.is_authenticated().await,
        "client ready"
    );

    // Fetch and cache every playlist named on the command line.
    for playlist_id in std::env::args().skip(1) {
        let playlist = spotify.get_playlist(&playlist_id, None).await?;
        let raw_tracks: Vec<_> = playlist
            .tracks
            .items
            .into_iter()
            .filter_map(|entry| entry.track)
            .collect();
        tracing::info!(
            playlist = %playlist.name,
            tracks = raw_tracks.len(),
            "fetched playlist"
        );
        store.save_tracks(&raw_tracks).await?;
    }

    tracing::info!(tracks = store.track_count().await, "vap-rs done");
    Ok(())
}
