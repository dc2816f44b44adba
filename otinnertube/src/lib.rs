//! # otinnertube - Client du catalogue de streaming pour OTMusic
//!
//! Cette crate fournit un client Rust pour l'API InnerTube du service de
//! streaming musical, avec un système de cache en mémoire et une intégration
//! avec les autres modules OTMusic.
//!
//! ## Vue d'ensemble
//!
//! `otinnertube` permet d'accéder aux fonctionnalités du catalogue :
//! - Navigation (humeurs et genres, nouveautés, catégories)
//! - Pages artiste, album et playlist avec pagination uniforme
//! - Recherche filtrée (chansons, vidéos, albums, artistes, playlists)
//! - Suggestions de complétion de recherche
//! - Résolution des métadonnées d'une chanson via `/player`
//! - Cache en mémoire pour minimiser les requêtes API
//!
//! ## Architecture
//!
//! - `InnertubeClient` : Client principal avec cache
//! - `models` : Structures de données (SongItem, AlbumItem, ItemsPage, etc.)
//! - `api` : Couche d'accès bas-niveau (corps de requêtes, renderers, pages)
//! - `cache` : Système de cache en mémoire avec TTL
//!
//! ## Structure des modules
//!
//! ```text
//! otinnertube/
//! ├── src/
//! │   ├── lib.rs              # Module principal (ce fichier)
//! │   ├── client.rs           # Client principal
//! │   ├── models.rs           # Structures de données
//! │   ├── api/
//! │   │   ├── mod.rs          # API client bas-niveau
//! │   │   ├── bodies.rs       # Corps des requêtes POST
//! │   │   ├── response.rs     # Renderers des réponses JSON
//! │   │   ├── items_page.rs   # Uniformisation des listes paginées
//! │   │   ├── search.rs       # Recherche et suggestions
//! │   │   └── pages.rs        # Pages artiste/playlist/navigation
//! │   ├── cache.rs            # Cache en mémoire
//! │   └── error.rs            # Gestion des erreurs
//! ```
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use otinnertube::InnertubeClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Utilise automatiquement la config depuis otconfig
//!     let client = InnertubeClient::from_config()?;
//!
//!     // Rechercher des chansons
//!     if let Some(page) = client.search_songs("Miles Davis").await? {
//!         for song in &page.items {
//!             println!("{} ({})", song.title, song.id);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Cache
//!
//! Le client utilise un cache en mémoire avec TTL pour minimiser les requêtes :
//! - Pages artiste : 30 minutes
//! - Pages playlist et album : 30 minutes
//! - Pages de navigation : 30 minutes
//! - Chansons résolues : 1 heure

pub mod api;
pub mod cache;
pub mod client;
pub mod error;
pub mod models;

pub use cache::InnertubeCache;
pub use client::{
    InnertubeClient, BROWSE_ID_MOODS, BROWSE_ID_MOODS_CATEGORY, BROWSE_ID_NEW_RELEASES,
};
pub use error::{InnertubeError, Result};
pub use models::{
    AlbumItem, ArtistItem, ArtistPage, BrowseItem, BrowseResult, BrowseSection, BrowseTarget,
    ItemsPage, LinkedItem, Mood, PlaylistItem, PlaylistPage, SearchFilter, SongItem, VideoItem,
};
