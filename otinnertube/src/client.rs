//! Client principal pour interagir avec le backend de streaming
//!
//! Ce module fournit un client haut-niveau avec cache intégré. Les pages
//! artiste, playlist et navigation ainsi que les chansons résolues passent
//! par le cache ; les recherches et les continuations interrogent toujours
//! le backend.

use crate::api::bodies::{
    BrowseBody, ContinuationBody, Context, PlayerBody, SearchBody, SearchSuggestionsBody,
};
use crate::api::items_page::{no_list_items, no_two_row_items, ItemConverters};
use crate::api::InnertubeApi;
use crate::cache::InnertubeCache;
use crate::error::Result;
use crate::models::{
    AlbumItem, ArtistItem, ArtistPage, BrowseResult, BrowseTarget, ItemsPage, PlaylistItem,
    PlaylistPage, SearchFilter, SongItem, VideoItem,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Identifiant de navigation de la page humeurs et genres
pub const BROWSE_ID_MOODS: &str = "FEmusic_moods_and_genres";

/// Identifiant de navigation d'une catégorie humeur/genre (avec params)
pub const BROWSE_ID_MOODS_CATEGORY: &str = "FEmusic_moods_and_genres_category";

/// Identifiant de navigation des nouveautés albums
pub const BROWSE_ID_NEW_RELEASES: &str = "FEmusic_new_releases_albums";

/// Client haut-niveau avec cache
pub struct InnertubeClient {
    /// API bas-niveau
    api: InnertubeApi,
    /// Cache en mémoire
    cache: Arc<InnertubeCache>,
    /// Contexte des requêtes de navigation et de recherche
    web_context: Context,
    /// Contexte des requêtes `/player`
    player_context: Context,
}

impl InnertubeClient {
    /// Crée un nouveau client avec la locale donnée
    pub fn new(hl: impl Into<String>, gl: impl Into<String>) -> Result<Self> {
        let hl = hl.into();
        let gl = gl.into();
        info!("Creating streaming client (locale {}-{})", hl, gl);

        Ok(Self {
            api: InnertubeApi::new()?,
            cache: Arc::new(InnertubeCache::new()),
            web_context: Context::web_remix(hl.clone(), gl.clone()),
            player_context: Context::android_music(hl, gl),
        })
    }

    /// Crée un client en utilisant la configuration d'otconfig
    pub fn from_config() -> Result<Self> {
        let config = otconfig::get_config();
        let (hl, gl) = config.get_locale();
        let mut client = Self::new(hl, gl)?;
        if let Some(base_url) = config.get_innertube_base_url() {
            client.api = client.api.with_base_url(base_url);
        }
        Ok(client)
    }

    /// Remplace l'URL de base de l'API
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api = self.api.with_base_url(base_url);
        self
    }

    /// Retourne le cache partagé
    pub fn cache(&self) -> Arc<InnertubeCache> {
        Arc::clone(&self.cache)
    }

    // ============ Navigation ============

    /// Page de navigation générique (humeurs, catégorie, nouveautés)
    pub async fn browse(&self, browse_id: &str, params: Option<&str>) -> Result<BrowseResult> {
        let cache_key = match params {
            Some(params) => format!("{}|{}", browse_id, params),
            None => browse_id.to_string(),
        };
        if let Some(cached) = self.cache.get_browse_result(&cache_key).await {
            debug!("browse cache hit: {}", cache_key);
            return Ok(cached);
        }

        let mut body = BrowseBody::new(self.web_context.clone(), browse_id);
        if let Some(params) = params {
            body = body.with_params(params);
        }
        let result = self.api.browse(&body).await?;
        self.cache.put_browse_result(cache_key, result.clone()).await;
        Ok(result)
    }

    /// Page humeurs et genres
    pub async fn moods(&self) -> Result<BrowseResult> {
        self.browse(BROWSE_ID_MOODS, None).await
    }

    /// Page d'une catégorie humeur/genre
    pub async fn mood_page(&self, target: &BrowseTarget) -> Result<BrowseResult> {
        self.browse(&target.browse_id, target.params.as_deref()).await
    }

    /// Nouveautés albums
    pub async fn new_releases(&self) -> Result<BrowseResult> {
        self.browse(BROWSE_ID_NEW_RELEASES, None).await
    }

    // ============ Pages artiste / playlist / album ============

    /// Page artiste complète
    pub async fn artist_page(&self, browse_id: &str) -> Result<ArtistPage> {
        if let Some(cached) = self.cache.get_artist_page(browse_id).await {
            debug!("artist page cache hit: {}", browse_id);
            return Ok(cached);
        }

        let body = BrowseBody::new(self.web_context.clone(), browse_id);
        let page = self.api.artist_page(&body).await?;
        self.cache
            .put_artist_page(browse_id.to_string(), page.clone())
            .await;
        Ok(page)
    }

    /// Page playlist complète
    pub async fn playlist_page(&self, browse_id: &str) -> Result<PlaylistPage> {
        if let Some(cached) = self.cache.get_playlist_page(browse_id).await {
            debug!("playlist page cache hit: {}", browse_id);
            return Ok(cached);
        }

        let body = BrowseBody::new(self.web_context.clone(), browse_id);
        let page = self.api.playlist_page(&body).await?;
        self.cache
            .put_playlist_page(browse_id.to_string(), page.clone())
            .await;
        Ok(page)
    }

    /// Page album complète (même forme que les playlists)
    pub async fn album_page(&self, browse_id: &str) -> Result<PlaylistPage> {
        self.playlist_page(browse_id).await
    }

    /// Page suivante d'une liste paginée de chansons
    pub async fn songs_continuation(
        &self,
        continuation: &str,
    ) -> Result<Option<ItemsPage<SongItem>>> {
        let body = ContinuationBody::new(self.web_context.clone(), continuation);
        self.api
            .items_page_continuation(&body, &song_converters())
            .await
    }

    /// Liste paginée de chansons ou d'albums d'un artiste ("tout afficher")
    pub async fn artist_items<T>(
        &self,
        target: &BrowseTarget,
        converters: &ItemConverters<T>,
    ) -> Result<Option<ItemsPage<T>>> {
        let mut body = BrowseBody::new(self.web_context.clone(), &target.browse_id);
        if let Some(params) = &target.params {
            body = body.with_params(params);
        }
        self.api.items_page(&body, converters).await
    }

    /// Toutes les chansons d'un artiste
    pub async fn artist_songs(&self, target: &BrowseTarget) -> Result<Option<ItemsPage<SongItem>>> {
        self.artist_items(target, &song_converters()).await
    }

    /// Tous les albums d'un artiste
    pub async fn artist_albums(
        &self,
        target: &BrowseTarget,
    ) -> Result<Option<ItemsPage<AlbumItem>>> {
        self.artist_items(target, &album_converters()).await
    }

    // ============ Chansons ============

    /// Métadonnées d'une chanson via `/player`
    pub async fn song(&self, video_id: &str) -> Result<SongItem> {
        if let Some(cached) = self.cache.get_song(video_id).await {
            debug!("song cache hit: {}", video_id);
            return Ok(cached);
        }

        let body = PlayerBody::new(self.player_context.clone(), video_id);
        let song = self.api.song(&body).await?;
        self.cache.put_song(video_id.to_string(), song.clone()).await;
        Ok(song)
    }

    // ============ Recherche ============

    /// Recherche de chansons
    pub async fn search_songs(&self, query: &str) -> Result<Option<ItemsPage<SongItem>>> {
        self.search(query, SearchFilter::Song, &song_converters())
            .await
    }

    /// Recherche de vidéos
    pub async fn search_videos(&self, query: &str) -> Result<Option<ItemsPage<VideoItem>>> {
        self.search(
            query,
            SearchFilter::Video,
            &ItemConverters {
                from_list: VideoItem::from_list_renderer,
                from_two_row: no_two_row_items,
            },
        )
        .await
    }

    /// Recherche d'albums
    pub async fn search_albums(&self, query: &str) -> Result<Option<ItemsPage<AlbumItem>>> {
        self.search(
            query,
            SearchFilter::Album,
            &ItemConverters {
                from_list: AlbumItem::from_list_renderer,
                from_two_row: AlbumItem::from_two_row_renderer,
            },
        )
        .await
    }

    /// Recherche d'artistes
    pub async fn search_artists(&self, query: &str) -> Result<Option<ItemsPage<ArtistItem>>> {
        self.search(
            query,
            SearchFilter::Artist,
            &ItemConverters {
                from_list: ArtistItem::from_list_renderer,
                from_two_row: ArtistItem::from_two_row_renderer,
            },
        )
        .await
    }

    /// Recherche de playlists (communautaires ou éditoriales)
    pub async fn search_playlists(
        &self,
        query: &str,
        featured: bool,
    ) -> Result<Option<ItemsPage<PlaylistItem>>> {
        let filter = if featured {
            SearchFilter::FeaturedPlaylist
        } else {
            SearchFilter::CommunityPlaylist
        };
        self.search(
            query,
            filter,
            &ItemConverters {
                from_list: PlaylistItem::from_list_renderer,
                from_two_row: PlaylistItem::from_two_row_renderer,
            },
        )
        .await
    }

    /// Recherche filtrée générique
    pub async fn search<T>(
        &self,
        query: &str,
        filter: SearchFilter,
        converters: &ItemConverters<T>,
    ) -> Result<Option<ItemsPage<T>>> {
        let body =
            SearchBody::new(self.web_context.clone(), query).with_params(filter.params());
        self.api.search_page(&body, converters).await
    }

    /// Page suivante d'une recherche filtrée
    pub async fn search_continuation<T>(
        &self,
        continuation: &str,
        converters: &ItemConverters<T>,
    ) -> Result<Option<ItemsPage<T>>> {
        let body = ContinuationBody::new(self.web_context.clone(), continuation);
        self.api.search_page_continuation(&body, converters).await
    }

    /// Suggestions de complétion pour une saisie partielle
    pub async fn search_suggestions(&self, input: &str) -> Result<Vec<String>> {
        let body = SearchSuggestionsBody::new(self.web_context.clone(), input);
        self.api.search_suggestions(&body).await
    }
}

/// Convertisseurs d'items chanson
pub fn song_converters() -> ItemConverters<SongItem> {
    ItemConverters {
        from_list: SongItem::from_list_renderer,
        from_two_row: SongItem::from_two_row_renderer,
    }
}

/// Convertisseurs d'items album
pub fn album_converters() -> ItemConverters<AlbumItem> {
    ItemConverters {
        from_list: no_list_items,
        from_two_row: AlbumItem::from_two_row_renderer,
    }
}
