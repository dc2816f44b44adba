//! Structures de données de la bibliothèque locale

use serde::{Deserialize, Serialize};

/// Chanson de la bibliothèque
///
/// Les colonnes `like_date` et `total_play_time_ms` sont locales : elles
/// survivent aux mises à jour de métadonnées venant du catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Identifiant de la vidéo associée
    pub id: String,
    /// Titre de la chanson
    pub title: String,
    /// Artistes affichables (texte libre)
    pub artists_text: Option<String>,
    /// Durée affichable (ex. "3:25")
    pub duration_text: Option<String>,
    /// URL de la vignette
    pub thumbnail_url: Option<String>,
    /// Date du like en millisecondes Unix, `None` si non likée
    pub like_date: Option<i64>,
    /// Temps de lecture cumulé en millisecondes
    pub total_play_time_ms: i64,
}

impl Song {
    /// Teste si la chanson est likée
    pub fn is_liked(&self) -> bool {
        self.like_date.is_some()
    }
}

/// Artiste suivi dans la bibliothèque
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    /// Identifiant de navigation de l'artiste
    pub id: String,
    /// Nom de l'artiste
    pub name: String,
    /// URL de la vignette
    pub thumbnail_url: Option<String>,
    /// Description de l'artiste
    pub info: Option<String>,
    /// Date de mise en favori en millisecondes Unix
    pub bookmarked_at: Option<i64>,
}

/// Album enregistré dans la bibliothèque
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Identifiant de navigation de l'album
    pub id: String,
    /// Titre de l'album
    pub title: Option<String>,
    /// Auteurs affichables (texte libre)
    pub authors_text: Option<String>,
    /// Année de sortie affichable
    pub year: Option<String>,
    /// URL de la vignette
    pub thumbnail_url: Option<String>,
    /// Date de mise en favori en millisecondes Unix
    pub bookmarked_at: Option<i64>,
}

/// Playlist locale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Identifiant local (clé auto-incrémentée)
    pub id: i64,
    /// Nom de la playlist
    pub name: String,
    /// Identifiant de navigation distant si la playlist est importée
    pub browse_id: Option<String>,
}

/// Playlist avec son nombre de chansons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistPreview {
    pub playlist: Playlist,
    pub song_count: i64,
}

/// Paroles d'une chanson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lyrics {
    /// Identifiant de la chanson
    pub song_id: String,
    /// Paroles texte brut
    pub fixed: Option<String>,
    /// Paroles synchronisées (format LRC)
    pub synced: Option<String>,
}

/// Événement de lecture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Identifiant local de l'événement
    pub id: i64,
    /// Chanson jouée
    pub song_id: String,
    /// Horodatage de la lecture en millisecondes Unix
    pub timestamp: i64,
    /// Durée effectivement jouée en millisecondes
    pub play_time_ms: i64,
}

/// Critère de tri des chansons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SongSortBy {
    Title,
    PlayTime,
    #[default]
    DateAdded,
}

/// Critère de tri des playlists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaylistSortBy {
    #[default]
    Name,
    DateAdded,
    SongCount,
}

/// Critère de tri des artistes et albums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookmarkSortBy {
    #[default]
    Name,
    DateBookmarked,
}

/// Ordre de tri
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Mot-clé SQL correspondant
    pub(crate) fn sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}
