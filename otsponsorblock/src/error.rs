//! Gestion des erreurs pour le client SponsorBlock

use thiserror::Error;

/// Type Result personnalisé pour otsponsorblock
pub type Result<T> = std::result::Result<T, SponsorBlockError>;

/// Erreurs possibles lors de l'utilisation du client SponsorBlock
#[derive(Error, Debug)]
pub enum SponsorBlockError {
    /// Erreur HTTP
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Erreur de parsing JSON
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Erreur de l'API SponsorBlock
    #[error("SponsorBlock API error (code {code}): {message}")]
    ApiError { code: u16, message: String },

    /// Quota dépassé (rate limiting)
    #[error("Rate limit exceeded, please try again later")]
    RateLimitExceeded,
}

impl SponsorBlockError {
    /// Crée une erreur API depuis un code de statut HTTP et un message
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            429 => Self::RateLimitExceeded,
            _ => Self::ApiError {
                code,
                message: message.into(),
            },
        }
    }
}
