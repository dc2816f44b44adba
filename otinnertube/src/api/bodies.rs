//! Corps des requêtes envoyées au backend
//!
//! Chaque endpoint InnerTube attend un corps JSON portant un `context`
//! (identité du client) plus les paramètres propres à l'endpoint.

use serde::Serialize;

/// Identité client par défaut (web)
const WEB_REMIX_CLIENT_NAME: &str = "WEB_REMIX";
const WEB_REMIX_CLIENT_VERSION: &str = "1.20220918";

/// Identité client Android (utilisée pour l'endpoint player)
const ANDROID_MUSIC_CLIENT_NAME: &str = "ANDROID_MUSIC";
const ANDROID_MUSIC_CLIENT_VERSION: &str = "5.28.1";

/// Contexte client envoyé avec chaque requête
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub client: ClientInfo,
}

/// Description du client (nom, version, locale)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_name: String,
    pub client_version: String,
    /// Langue de l'interface (ex. "en")
    pub hl: String,
    /// Région (ex. "US")
    pub gl: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitor_data: Option<String>,
}

impl Context {
    /// Contexte web par défaut
    pub fn web_remix(hl: impl Into<String>, gl: impl Into<String>) -> Self {
        Self {
            client: ClientInfo {
                client_name: WEB_REMIX_CLIENT_NAME.to_string(),
                client_version: WEB_REMIX_CLIENT_VERSION.to_string(),
                hl: hl.into(),
                gl: gl.into(),
                visitor_data: None,
            },
        }
    }

    /// Contexte Android, requis par l'endpoint `/player`
    pub fn android_music(hl: impl Into<String>, gl: impl Into<String>) -> Self {
        Self {
            client: ClientInfo {
                client_name: ANDROID_MUSIC_CLIENT_NAME.to_string(),
                client_version: ANDROID_MUSIC_CLIENT_VERSION.to_string(),
                hl: hl.into(),
                gl: gl.into(),
                visitor_data: None,
            },
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::web_remix("en", "US")
    }
}

/// Corps de l'endpoint `/browse` (page initiale)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseBody {
    pub context: Context,
    pub browse_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

impl BrowseBody {
    pub fn new(context: Context, browse_id: impl Into<String>) -> Self {
        Self {
            context,
            browse_id: browse_id.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }
}

/// Corps de l'endpoint `/browse` (page suivante, jeton de continuation)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationBody {
    pub context: Context,
    pub continuation: String,
}

impl ContinuationBody {
    pub fn new(context: Context, continuation: impl Into<String>) -> Self {
        Self {
            context,
            continuation: continuation.into(),
        }
    }
}

/// Corps de l'endpoint `/search`
///
/// `params` transporte le filtre de recherche opaque du backend
/// (voir [`crate::models::SearchFilter`]).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub context: Context,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

impl SearchBody {
    pub fn new(context: Context, query: impl Into<String>) -> Self {
        Self {
            context,
            query: query.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }
}

/// Corps de l'endpoint `/music/get_search_suggestions`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSuggestionsBody {
    pub context: Context,
    pub input: String,
}

impl SearchSuggestionsBody {
    pub fn new(context: Context, input: impl Into<String>) -> Self {
        Self {
            context,
            input: input.into(),
        }
    }
}

/// Corps de l'endpoint `/player`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBody {
    pub context: Context,
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
}

impl PlayerBody {
    pub fn new(context: Context, video_id: impl Into<String>) -> Self {
        Self {
            context,
            video_id: video_id.into(),
            playlist_id: None,
        }
    }
}
