//! # otlibrary - Bibliothèque locale pour OTMusic
//!
//! Cette crate gère la persistance SQLite de la bibliothèque de l'utilisateur :
//! chansons, artistes, albums, playlists, paroles et historique de lecture.
//!
//! ## Vue d'ensemble
//!
//! - Chansons avec like et temps de lecture cumulé, préservés lors des mises
//!   à jour de métadonnées venant du catalogue
//! - Artistes et albums en favori
//! - Playlists locales avec positions denses et réordonnancement transactionnel
//! - Historique de lecture et chansons les plus jouées
//! - Paroles (texte brut et synchronisées)
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use otlibrary::{Database, SongSortBy, SortOrder};
//!
//! fn main() -> anyhow::Result<()> {
//!     // Utilise le chemin défini dans otconfig
//!     let db = Database::open_from_config()?;
//!
//!     for song in db.songs(SongSortBy::Title, SortOrder::Ascending)? {
//!         println!("{} ({:?})", song.title, song.duration_text);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod events;
pub mod models;
pub mod playlists;
pub mod songs;

pub use db::Database;
pub use error::{LibraryError, Result};
pub use models::{
    Album, Artist, BookmarkSortBy, Event, Lyrics, Playlist, PlaylistPreview, PlaylistSortBy, Song,
    SongSortBy, SortOrder,
};
