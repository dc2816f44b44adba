//! # otroutes - Routage des liens partagés pour OTMusic
//!
//! Cette crate transforme les URLs partagées et les intents de recherche
//! vocale en destinations de l'application.
//!
//! Le routage se fait en deux temps :
//! 1. [`parse_url`] est une fonction pure qui reconnaît la forme de l'URL
//!    sans aucune requête réseau ;
//! 2. [`resolve`] interroge le catalogue quand la destination finale dépend
//!    du contenu (un lien d'album partagé arrive sous forme de playlist et
//!    doit être remonté vers sa page album).
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use otinnertube::InnertubeClient;
//! use otroutes::{parse_url, resolve, Route};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = InnertubeClient::from_config()?;
//!     let route = resolve(&client, "https://music.youtube.com/watch?v=zqNTltOGh5c").await?;
//!
//!     if let Route::Player { song } = route {
//!         println!("now playing: {}", song.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod intent;

pub use error::{Result, RoutesError};
pub use intent::SearchIntent;

use otinnertube::{InnertubeClient, SongItem};
use tracing::debug;
use url::Url;

/// Préfixe des identifiants de playlists générées pour des albums
const ALBUM_PLAYLIST_PREFIX: &str = "OLAK5uy_";

/// Préfixe des identifiants de playlists radio éditoriales
const RADIO_PLAYLIST_PREFIX: &str = "RDCLAK5uy_";

/// Préfixe transformant un identifiant de playlist en identifiant de navigation
const PLAYLIST_BROWSE_PREFIX: &str = "VL";

/// Cible syntaxique d'une URL partagée, avant résolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlTarget {
    /// Recherche textuelle
    Search { query: String },
    /// Playlist (y compris les playlists d'albums et les radios)
    Playlist { playlist_id: String },
    /// Chaîne d'artiste
    Channel { channel_id: String },
    /// Lecture d'une vidéo
    Watch { video_id: String },
}

/// Destination finale dans l'application
#[derive(Debug, Clone)]
pub enum Route {
    /// Écran de recherche prérempli
    Search { query: String },
    /// Page album
    Album { browse_id: String },
    /// Page playlist
    Playlist { browse_id: String, is_radio: bool },
    /// Page artiste
    Artist { browse_id: String },
    /// Lecture immédiate d'une chanson
    Player { song: SongItem },
}

/// Reconnaît la forme d'une URL partagée
///
/// Fonction pure : aucune requête réseau. Les formes reconnues sont
/// `/search?q=`, `/playlist?list=`, `/channel/<id>`, `/c/<name>`,
/// `/watch?v=` et les liens courts `youtu.be/<id>`.
pub fn parse_url(input: &str) -> Result<UrlTarget> {
    let url = Url::parse(input)?;

    let query_param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    // Liens courts : le chemin est l'identifiant de la vidéo
    if url.host_str() == Some("youtu.be") {
        let video_id = url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);
        return match video_id {
            Some(video_id) => Ok(UrlTarget::Watch { video_id }),
            None => Err(RoutesError::UnsupportedUrl(input.to_string())),
        };
    }

    let mut segments = url.path_segments().into_iter().flatten();
    let first = segments.next().unwrap_or("");

    match first {
        "search" => match query_param("q") {
            Some(query) if !query.is_empty() => Ok(UrlTarget::Search { query }),
            _ => Err(RoutesError::UnsupportedUrl(input.to_string())),
        },
        "playlist" => match query_param("list") {
            Some(playlist_id) if !playlist_id.is_empty() => {
                Ok(UrlTarget::Playlist { playlist_id })
            }
            _ => Err(RoutesError::UnsupportedUrl(input.to_string())),
        },
        "channel" | "c" => match segments.next() {
            Some(channel_id) if !channel_id.is_empty() => Ok(UrlTarget::Channel {
                channel_id: channel_id.to_string(),
            }),
            _ => Err(RoutesError::UnsupportedUrl(input.to_string())),
        },
        "watch" => match query_param("v") {
            Some(video_id) if !video_id.is_empty() => Ok(UrlTarget::Watch { video_id }),
            _ => Err(RoutesError::UnsupportedUrl(input.to_string())),
        },
        _ => Err(RoutesError::UnsupportedUrl(input.to_string())),
    }
}

/// Résout une URL partagée en destination de l'application
///
/// Les liens d'albums partagés arrivent sous forme de playlists `OLAK5uy_` :
/// la page playlist est consultée et l'album de sa première chanson donne la
/// destination. Si cette remontée échoue, la playlist elle-même est ouverte.
pub async fn resolve(client: &InnertubeClient, input: &str) -> Result<Route> {
    let target = parse_url(input)?;
    debug!("resolving {:?}", target);

    match target {
        UrlTarget::Search { query } => Ok(Route::Search { query }),
        UrlTarget::Channel { channel_id } => Ok(Route::Artist {
            browse_id: channel_id,
        }),
        UrlTarget::Watch { video_id } => {
            let song = client.song(&video_id).await?;
            Ok(Route::Player { song })
        }
        UrlTarget::Playlist { playlist_id } => resolve_playlist(client, &playlist_id).await,
    }
}

async fn resolve_playlist(client: &InnertubeClient, playlist_id: &str) -> Result<Route> {
    let browse_id = if playlist_id.starts_with(PLAYLIST_BROWSE_PREFIX) {
        playlist_id.to_string()
    } else {
        format!("{}{}", PLAYLIST_BROWSE_PREFIX, playlist_id)
    };

    if playlist_id.starts_with(ALBUM_PLAYLIST_PREFIX) {
        let page = client.playlist_page(&browse_id).await?;
        let album_browse_id = page
            .songs_page
            .as_ref()
            .and_then(|songs| songs.items.first())
            .and_then(|song| song.album.as_ref())
            .and_then(|album| album.browse_id.clone());

        if let Some(album_browse_id) = album_browse_id {
            debug!("playlist {} resolved to album {}", playlist_id, album_browse_id);
            return Ok(Route::Album {
                browse_id: album_browse_id,
            });
        }
    }

    Ok(Route::Playlist {
        browse_id,
        is_radio: playlist_id.starts_with(RADIO_PLAYLIST_PREFIX),
    })
}
