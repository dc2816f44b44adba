//! Routage des intents de recherche vocale
//!
//! Une commande vocale "joue X" arrive avec un type de focus indiquant si X
//! est une chanson, un album, un artiste ou une playlist. Sans focus
//! reconnu, la requête part en recherche libre.

/// Types de focus des intents de lecture vocale
const FOCUS_ARTIST: &str = "vnd.android.cursor.item/artist";
const FOCUS_ALBUM: &str = "vnd.android.cursor.item/album";
const FOCUS_SONG: &str = "vnd.android.cursor.item/audio";
const FOCUS_PLAYLIST: &str = "vnd.android.cursor.item/playlist";

/// Requête de recherche typée issue d'un intent vocal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    /// Jouer une chanson précise
    Song { query: String },
    /// Jouer un album
    Album { query: String },
    /// Jouer un artiste
    Artist { query: String },
    /// Jouer une playlist
    Playlist { query: String },
    /// Recherche libre
    Unstructured { query: String },
}

impl SearchIntent {
    /// Construit la requête typée depuis le focus et le texte de l'intent
    ///
    /// Retourne `None` quand le texte est vide : l'appelant reprend alors la
    /// lecture courante au lieu de chercher.
    pub fn from_media_focus(focus: Option<&str>, query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let query = query.to_string();

        Some(match focus {
            Some(FOCUS_SONG) => Self::Song { query },
            Some(FOCUS_ALBUM) => Self::Album { query },
            Some(FOCUS_ARTIST) => Self::Artist { query },
            Some(FOCUS_PLAYLIST) => Self::Playlist { query },
            _ => Self::Unstructured { query },
        })
    }

    /// Texte de la requête
    pub fn query(&self) -> &str {
        match self {
            Self::Song { query }
            | Self::Album { query }
            | Self::Artist { query }
            | Self::Playlist { query }
            | Self::Unstructured { query } => query,
        }
    }
}
