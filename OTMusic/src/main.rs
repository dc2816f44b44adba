use otinnertube::InnertubeClient;
use otlibrary::{Database, SongSortBy, SortOrder};
use otroutes::{resolve, Route};
use otsponsorblock::SponsorBlockClient;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========== PHASE 1 : Configuration et logging ==========

    let config = otconfig::get_config();
    let min_level = config.get_log_min_level().unwrap_or_else(|_| "INFO".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(min_level.to_lowercase())),
        )
        .init();

    let (hl, gl) = config.get_locale();
    info!("🎵 Starting OTMusic (locale {}-{})", hl, gl);

    // ========== PHASE 2 : Bibliothèque et clients ==========

    info!("📚 Opening local library...");
    let library = Database::open_from_config()?;
    let songs = library.songs(SongSortBy::DateAdded, SortOrder::Descending)?;
    info!("✅ Library ready ({} songs)", songs.len());

    info!("📡 Creating catalog client...");
    let client = InnertubeClient::from_config()?;

    let sponsorblock = if config.get_sponsorblock_enabled().unwrap_or(true) {
        Some(SponsorBlockClient::from_config()?)
    } else {
        info!("SponsorBlock disabled in configuration");
        None
    };

    // ========== PHASE 3 : Résolution d'un lien partagé ==========

    if let Some(url) = std::env::args().nth(1) {
        info!("🔗 Resolving shared link: {}", url);
        match resolve(&client, &url).await {
            Ok(Route::Search { query }) => {
                info!("→ search: {}", query);
                if let Some(page) = client.search_songs(&query).await? {
                    for song in page.items.iter().take(5) {
                        info!("  - {} ({})", song.title, song.id);
                    }
                }
            }
            Ok(Route::Album { browse_id }) => {
                let page = client.album_page(&browse_id).await?;
                info!("→ album: {:?} ({})", page.title, browse_id);
            }
            Ok(Route::Playlist {
                browse_id,
                is_radio,
            }) => {
                let page = client.playlist_page(&browse_id).await?;
                info!("→ playlist: {:?} (radio: {})", page.title, is_radio);
            }
            Ok(Route::Artist { browse_id }) => {
                let page = client.artist_page(&browse_id).await?;
                info!("→ artist: {:?} ({})", page.name, browse_id);
            }
            Ok(Route::Player { song }) => {
                info!("→ play: {} ({})", song.title, song.id);
                library.upsert_song(&otlibrary::Song {
                    id: song.id.clone(),
                    title: song.title.clone(),
                    artists_text: {
                        let names = song
                            .artists
                            .iter()
                            .map(|a| a.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", ");
                        (!names.is_empty()).then_some(names)
                    },
                    duration_text: song.duration_text.clone(),
                    thumbnail_url: song.thumbnail_url.clone(),
                    like_date: None,
                    total_play_time_ms: 0,
                })?;

                if let Some(sponsorblock) = &sponsorblock {
                    match sponsorblock.segments_for_config(&song.id).await {
                        Ok(segments) if !segments.is_empty() => {
                            for segment in &segments {
                                info!(
                                    "  skip {:.1}s-{:.1}s ({:?})",
                                    segment.start(),
                                    segment.end(),
                                    segment.category
                                );
                            }
                        }
                        Ok(_) => {}
                        Err(e) => warn!("⚠️ SponsorBlock lookup failed: {}", e),
                    }
                }
            }
            Err(e) => warn!("⚠️ Could not resolve link: {}", e),
        }
    }

    info!("✅ OTMusic is ready!");
    Ok(())
}
