//! Client pour l'API SponsorBlock
//!
//! Interroge `/api/skipSegments` pour récupérer les segments à sauter d'une
//! vidéo. Une vidéo sans aucun signalement est un cas normal : l'API répond
//! 404 et le client retourne une liste vide.

use crate::error::{Result, SponsorBlockError};
use crate::models::{Action, Category, Segment};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// URL de base de l'API SponsorBlock publique
const API_BASE_URL: &str = "https://sponsor.ajay.app";

/// Service cible des requêtes (les identifiants vidéo sont ceux de YouTube)
const SERVICE: &str = "YouTube";

/// Client SponsorBlock
pub struct SponsorBlockClient {
    /// Client HTTP
    client: Client,
    /// URL de base (remplaçable pour les tests)
    base_url: String,
}

impl SponsorBlockClient {
    /// Crée un nouveau client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Crée un client en utilisant la configuration d'otconfig
    pub fn from_config() -> Result<Self> {
        let config = otconfig::get_config();
        let base_url = config
            .get_sponsorblock_base_url()
            .unwrap_or_else(|_| API_BASE_URL.to_string());
        Ok(Self::new()?.with_base_url(base_url))
    }

    /// Remplace l'URL de base de l'API
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Récupère les segments à sauter d'une vidéo
    ///
    /// # Arguments
    ///
    /// * `video_id` - Identifiant de la vidéo
    /// * `categories` - Catégories de segments demandées
    /// * `actions` - Actions acceptées (skip, mute, ...)
    /// * `required_segments` - UUIDs de segments à inclure même sous le seuil de votes
    pub async fn segments(
        &self,
        video_id: &str,
        categories: &[Category],
        actions: &[Action],
        required_segments: &[String],
    ) -> Result<Vec<Segment>> {
        let url = format!("{}/api/skipSegments", self.base_url);

        let mut params: Vec<(&str, &str)> = vec![("videoID", video_id), ("service", SERVICE)];
        for category in categories {
            params.push(("category", category.as_str()));
        }
        for action in actions {
            params.push(("action", action.as_str()));
        }
        for uuid in required_segments {
            params.push(("requiredSegment", uuid));
        }

        debug!("GET {} for video {}", url, video_id);

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();

        // 404 signifie qu'aucun segment n'est signalé pour cette vidéo
        if status == StatusCode::NOT_FOUND {
            debug!("No segments reported for video {}", video_id);
            return Ok(Vec::new());
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("SponsorBlock API error ({}): {}", status.as_u16(), error_text);
            return Err(SponsorBlockError::from_status_code(
                status.as_u16(),
                error_text,
            ));
        }

        let segments: Vec<Segment> = response.json().await?;
        debug!("{} segments for video {}", segments.len(), video_id);
        Ok(segments)
    }

    /// Récupère les segments avec les catégories par défaut de la configuration
    pub async fn segments_for_config(&self, video_id: &str) -> Result<Vec<Segment>> {
        let config = otconfig::get_config();
        if !config.get_sponsorblock_enabled().unwrap_or(true) {
            return Ok(Vec::new());
        }

        let categories: Vec<Category> = config
            .get_sponsorblock_categories()
            .iter()
            .filter_map(|name| match name.as_str() {
                "sponsor" => Some(Category::Sponsor),
                "selfpromo" => Some(Category::Selfpromo),
                "interaction" => Some(Category::Interaction),
                "intro" => Some(Category::Intro),
                "outro" => Some(Category::Outro),
                "preview" => Some(Category::Preview),
                "music_offtopic" => Some(Category::MusicOfftopic),
                "poi_highlight" => Some(Category::PoiHighlight),
                "filler" => Some(Category::Filler),
                _ => None,
            })
            .collect();

        self.segments(video_id, &categories, &[Action::Skip, Action::Poi], &[])
            .await
    }
}
