//! Gestion des erreurs pour la bibliothèque locale

use thiserror::Error;

/// Type Result personnalisé pour otlibrary
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Erreurs possibles lors de l'utilisation de la bibliothèque locale
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Erreur SQLite
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Erreur d'entrées/sorties (création du fichier de base)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Erreur de configuration (anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Entité absente de la bibliothèque
    #[error("Not found in library: {0}")]
    NotFound(String),

    /// Position invalide dans une playlist
    #[error("Invalid playlist position {position} (playlist has {len} songs)")]
    InvalidPosition { position: usize, len: usize },
}
