//! Couche d'accès bas-niveau au backend de streaming
//!
//! Toutes les requêtes sont des POST JSON : le corps embarque un [`bodies::Context`]
//! décrivant le client émulé, et un masque de champs optionnel limite la taille
//! des réponses.

pub mod bodies;
pub mod items_page;
pub mod pages;
pub mod response;
pub mod search;

use crate::error::{InnertubeError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// URL de base de l'API du backend
const API_BASE_URL: &str = "https://music.youtube.com/youtubei/v1";

/// Client API bas-niveau
pub struct InnertubeApi {
    /// Client HTTP
    client: Client,
    /// URL de base (remplaçable pour les tests)
    base_url: String,
}

impl InnertubeApi {
    /// Crée une nouvelle instance de l'API
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/115.0")
            .build()?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Remplace l'URL de base de l'API
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Retourne l'URL de base courante
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Effectue une requête POST JSON à l'API
    ///
    /// `mask` est transmis dans l'en-tête `X-Goog-FieldMask` quand il est fourni.
    pub(crate) async fn post<B, T>(&self, endpoint: &str, body: &B, mask: Option<&str>) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("POST {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(mask) = mask {
            request = request.header("X-Goog-FieldMask", mask);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Traite la réponse HTTP
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let status_code = status.as_u16();

        debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("API error ({}): {}", status_code, error_text);
            return Err(InnertubeError::from_status_code(status_code, error_text));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse API response: {}", e);
            InnertubeError::JsonParse(e)
        })
    }
}
