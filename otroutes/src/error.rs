//! Gestion des erreurs pour le routage

use thiserror::Error;

/// Type Result personnalisé pour otroutes
pub type Result<T> = std::result::Result<T, RoutesError>;

/// Erreurs possibles lors du routage d'une URL ou d'un intent
#[derive(Error, Debug)]
pub enum RoutesError {
    /// URL syntaxiquement invalide
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// URL valide mais sans cible reconnue
    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    /// Erreur du client catalogue pendant la résolution
    #[error("Catalog error: {0}")]
    Catalog(#[from] otinnertube::InnertubeError),
}
