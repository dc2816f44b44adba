//! Gestion des erreurs pour le client InnerTube

use thiserror::Error;

/// Type Result personnalisé pour otinnertube
pub type Result<T> = std::result::Result<T, InnertubeError>;

/// Erreurs possibles lors de l'utilisation du client InnerTube
#[derive(Error, Debug)]
pub enum InnertubeError {
    /// Ressource non trouvée (chanson, artiste, playlist, etc.)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Contenu non lisible (statut de lecture refusé par le backend)
    #[error("Content not playable: {0}")]
    NotPlayable(String),

    /// Erreur HTTP
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Erreur de parsing JSON
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Erreur de configuration (anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Erreur de l'API backend
    #[error("Backend API error (code {code}): {message}")]
    ApiError { code: u16, message: String },

    /// Quota dépassé (rate limiting)
    #[error("Rate limit exceeded, please try again later")]
    RateLimitExceeded,

    /// Réponse inattendue (section ou champ obligatoire absent)
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Erreur générique
    #[error("InnerTube error: {0}")]
    Other(String),
}

impl InnertubeError {
    /// Crée une erreur API depuis un code de statut HTTP et un message
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            404 => Self::NotFound(message.into()),
            429 => Self::RateLimitExceeded,
            _ => Self::ApiError {
                code,
                message: message.into(),
            },
        }
    }

    /// Vérifie si l'erreur est une erreur de rate limiting
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, InnertubeError::RateLimitExceeded)
    }

    /// Vérifie si l'erreur correspond à une ressource absente
    pub fn is_not_found(&self) -> bool {
        matches!(self, InnertubeError::NotFound(_))
    }
}
