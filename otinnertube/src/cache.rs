//! Système de cache en mémoire pour les données du catalogue
//!
//! Ce module fournit un cache en mémoire avec TTL pour minimiser les requêtes
//! au backend de streaming.

use crate::models::{ArtistPage, BrowseResult, PlaylistPage, SongItem};
use moka::future::Cache as MokaCache;
use std::sync::Arc;
use std::time::Duration;

/// Cache principal pour les pages du catalogue
#[derive(Clone)]
pub struct InnertubeCache {
    /// Cache des pages artiste (TTL: 30 minutes)
    artist_pages: Arc<MokaCache<String, ArtistPage>>,
    /// Cache des pages playlist et album (TTL: 30 minutes)
    playlist_pages: Arc<MokaCache<String, PlaylistPage>>,
    /// Cache des pages de navigation (TTL: 30 minutes)
    browse_results: Arc<MokaCache<String, BrowseResult>>,
    /// Cache des chansons résolues via /player (TTL: 1 heure)
    songs: Arc<MokaCache<String, SongItem>>,
}

impl InnertubeCache {
    /// Crée un nouveau cache avec les paramètres par défaut
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    /// Crée un nouveau cache avec une capacité spécifique
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            artist_pages: Arc::new(
                MokaCache::builder()
                    .max_capacity(max_capacity / 2)
                    .time_to_live(Duration::from_secs(1800)) // 30 minutes
                    .build(),
            ),
            playlist_pages: Arc::new(
                MokaCache::builder()
                    .max_capacity(max_capacity / 2)
                    .time_to_live(Duration::from_secs(1800)) // 30 minutes
                    .build(),
            ),
            browse_results: Arc::new(
                MokaCache::builder()
                    .max_capacity(max_capacity / 4)
                    .time_to_live(Duration::from_secs(1800)) // 30 minutes
                    .build(),
            ),
            songs: Arc::new(
                MokaCache::builder()
                    .max_capacity(max_capacity * 2)
                    .time_to_live(Duration::from_secs(3600)) // 1 heure
                    .build(),
            ),
        }
    }

    // ============ Pages artiste ============

    /// Récupère une page artiste depuis le cache
    pub async fn get_artist_page(&self, browse_id: &str) -> Option<ArtistPage> {
        self.artist_pages.get(browse_id).await
    }

    /// Ajoute une page artiste au cache
    pub async fn put_artist_page(&self, browse_id: String, page: ArtistPage) {
        self.artist_pages.insert(browse_id, page).await;
    }

    // ============ Pages playlist / album ============

    /// Récupère une page playlist depuis le cache
    pub async fn get_playlist_page(&self, browse_id: &str) -> Option<PlaylistPage> {
        self.playlist_pages.get(browse_id).await
    }

    /// Ajoute une page playlist au cache
    pub async fn put_playlist_page(&self, browse_id: String, page: PlaylistPage) {
        self.playlist_pages.insert(browse_id, page).await;
    }

    // ============ Pages de navigation ============

    /// Récupère une page de navigation depuis le cache
    pub async fn get_browse_result(&self, key: &str) -> Option<BrowseResult> {
        self.browse_results.get(key).await
    }

    /// Ajoute une page de navigation au cache
    pub async fn put_browse_result(&self, key: String, result: BrowseResult) {
        self.browse_results.insert(key, result).await;
    }

    // ============ Chansons ============

    /// Récupère une chanson depuis le cache
    pub async fn get_song(&self, video_id: &str) -> Option<SongItem> {
        self.songs.get(video_id).await
    }

    /// Ajoute une chanson au cache
    pub async fn put_song(&self, video_id: String, song: SongItem) {
        self.songs.insert(video_id, song).await;
    }

    /// Vide entièrement le cache
    pub fn clear_all(&self) {
        self.artist_pages.invalidate_all();
        self.playlist_pages.invalidate_all();
        self.browse_results.invalidate_all();
        self.songs.invalidate_all();
    }
}

impl Default for InnertubeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_song_cache_roundtrip() {
        let cache = InnertubeCache::new();
        assert!(cache.get_song("zqNTltOGh5c").await.is_none());

        let song = SongItem {
            id: "zqNTltOGh5c".to_string(),
            title: "So What".to_string(),
            artists: vec![],
            album: None,
            duration_text: None,
            thumbnail_url: None,
        };
        cache.put_song(song.id.clone(), song).await;

        let cached = cache.get_song("zqNTltOGh5c").await;
        assert_eq!(cached.map(|s| s.title), Some("So What".to_string()));
    }

    #[tokio::test]
    async fn test_clear_all() {
        let cache = InnertubeCache::new();
        cache
            .put_browse_result("FEmusic_moods_and_genres".to_string(), BrowseResult::default())
            .await;
        cache.clear_all();
        // invalidate_all est appliqué de manière paresseuse
        cache.browse_results.run_pending_tasks().await;
        assert!(cache.get_browse_result("FEmusic_moods_and_genres").await.is_none());
    }
}
