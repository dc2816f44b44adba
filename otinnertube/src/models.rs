//! Structures de données pour représenter les objets du catalogue
//!
//! Les renderers du backend (voir [`crate::api::response`]) sont convertis en
//! items typés : chaque constructeur `from_*` retourne `None` quand le
//! renderer ne décrit pas ce type d'item, et les items invalides sont
//! simplement ignorés par les pages.

use crate::api::response::{
    MusicNavigationButtonRenderer, MusicResponsiveListItemRenderer, MusicTwoRowItemRenderer, Run,
};
use serde::{Deserialize, Serialize};

/// Préfixe des browseId d'albums
const ALBUM_BROWSE_PREFIX: &str = "MPRE";

/// Référence nommée vers un autre objet du catalogue (artiste, album, chaîne)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedItem {
    pub name: String,
    #[serde(default)]
    pub browse_id: Option<String>,
}

impl LinkedItem {
    pub fn new(name: impl Into<String>, browse_id: Option<String>) -> Self {
        Self {
            name: name.into(),
            browse_id,
        }
    }

    fn from_run(run: &Run) -> Option<Self> {
        Some(Self {
            name: run.text.clone()?,
            browse_id: run.browse_id().map(str::to_string),
        })
    }
}

/// Cible de navigation vers une page du backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseTarget {
    pub browse_id: String,
    #[serde(default)]
    pub params: Option<String>,
}

/// Représente une chanson du catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongItem {
    /// Identifiant de la vidéo associée
    pub id: String,
    /// Titre de la chanson
    pub title: String,
    /// Artistes interprètes
    #[serde(default)]
    pub artists: Vec<LinkedItem>,
    /// Album contenant la chanson
    #[serde(default)]
    pub album: Option<LinkedItem>,
    /// Durée affichable (ex. "3:25")
    #[serde(default)]
    pub duration_text: Option<String>,
    /// URL de la vignette
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl SongItem {
    /// Convertit un item liste en chanson
    pub fn from_list_renderer(renderer: &MusicResponsiveListItemRenderer) -> Option<Self> {
        let title_run = renderer.column_runs(0).first()?;
        let id = title_run
            .video_id()
            .or_else(|| {
                renderer
                    .navigation_endpoint
                    .as_ref()?
                    .watch_endpoint
                    .as_ref()?
                    .video_id
                    .as_deref()
            })?
            .to_string();
        let title = title_run.text.clone()?;

        let mut artists = Vec::new();
        let mut album = None;
        for run in renderer
            .column_runs(1)
            .iter()
            .chain(renderer.column_runs(2))
        {
            let Some(linked) = LinkedItem::from_run(run) else {
                continue;
            };
            match &linked.browse_id {
                Some(id) if id.starts_with(ALBUM_BROWSE_PREFIX) => album = Some(linked),
                Some(_) => artists.push(linked),
                None => {}
            }
        }

        Some(Self {
            id,
            title,
            artists,
            album,
            duration_text: renderer.fixed_column_text(0),
            thumbnail_url: renderer.thumbnail_url().map(str::to_string),
        })
    }

    /// Convertit un item deux-lignes (carrousels de chansons) en chanson
    pub fn from_two_row_renderer(renderer: &MusicTwoRowItemRenderer) -> Option<Self> {
        let id = renderer.video_id()?.to_string();
        let title = renderer.title.as_ref()?.text()?;
        let artists = renderer
            .subtitle
            .as_ref()
            .map(|subtitle| {
                subtitle
                    .runs
                    .iter()
                    .filter(|run| run.browse_id().is_some())
                    .filter_map(LinkedItem::from_run)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            id,
            title,
            artists,
            album: None,
            duration_text: None,
            thumbnail_url: renderer.thumbnail_url().map(str::to_string),
        })
    }

    /// Clé stable de l'item
    pub fn key(&self) -> &str {
        &self.id
    }
}

/// Représente un album du catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumItem {
    /// Identifiant de navigation de l'album
    pub browse_id: String,
    /// Titre de l'album
    #[serde(default)]
    pub title: Option<String>,
    /// Auteurs de l'album
    #[serde(default)]
    pub authors: Vec<LinkedItem>,
    /// Année de sortie affichable
    #[serde(default)]
    pub year: Option<String>,
    /// URL de la vignette
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl AlbumItem {
    pub fn from_two_row_renderer(renderer: &MusicTwoRowItemRenderer) -> Option<Self> {
        let browse_id = renderer.browse_id()?.to_string();
        let title = renderer.title.as_ref().and_then(|t| t.text());

        let mut authors = Vec::new();
        let mut year = None;
        if let Some(subtitle) = &renderer.subtitle {
            for run in &subtitle.runs {
                if run.browse_id().is_some() {
                    if let Some(linked) = LinkedItem::from_run(run) {
                        authors.push(linked);
                    }
                } else if let Some(text) = &run.text {
                    // La dernière valeur numérique du sous-titre est l'année
                    if text.chars().all(|c| c.is_ascii_digit()) && !text.is_empty() {
                        year = Some(text.clone());
                    }
                }
            }
        }

        Some(Self {
            browse_id,
            title,
            authors,
            year,
            thumbnail_url: renderer.thumbnail_url().map(str::to_string),
        })
    }

    pub fn from_list_renderer(renderer: &MusicResponsiveListItemRenderer) -> Option<Self> {
        let browse_id = renderer.browse_id()?.to_string();
        let title = renderer
            .column_runs(0)
            .first()
            .and_then(|run| run.text.clone());

        let mut authors = Vec::new();
        let mut year = None;
        for run in renderer.column_runs(1) {
            if run.browse_id().is_some() {
                if let Some(linked) = LinkedItem::from_run(run) {
                    authors.push(linked);
                }
            } else if let Some(text) = &run.text {
                if text.chars().all(|c| c.is_ascii_digit()) && !text.is_empty() {
                    year = Some(text.clone());
                }
            }
        }

        Some(Self {
            browse_id,
            title,
            authors,
            year,
            thumbnail_url: renderer.thumbnail_url().map(str::to_string),
        })
    }

    pub fn key(&self) -> &str {
        &self.browse_id
    }
}

/// Représente un artiste du catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistItem {
    /// Identifiant de navigation de l'artiste
    pub browse_id: String,
    /// Nom de l'artiste
    pub name: String,
    /// Nombre d'abonnés affichable
    #[serde(default)]
    pub subscribers_text: Option<String>,
    /// URL de la vignette
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl ArtistItem {
    pub fn from_two_row_renderer(renderer: &MusicTwoRowItemRenderer) -> Option<Self> {
        Some(Self {
            browse_id: renderer.browse_id()?.to_string(),
            name: renderer.title.as_ref()?.text()?,
            subscribers_text: renderer.subtitle.as_ref().and_then(|s| s.text()),
            thumbnail_url: renderer.thumbnail_url().map(str::to_string),
        })
    }

    pub fn from_list_renderer(renderer: &MusicResponsiveListItemRenderer) -> Option<Self> {
        let browse_id = renderer.browse_id()?.to_string();
        let name = renderer.column_runs(0).first()?.text.clone()?;

        Some(Self {
            browse_id,
            name,
            subscribers_text: renderer
                .column_runs(1)
                .last()
                .and_then(|run| run.text.clone()),
            thumbnail_url: renderer.thumbnail_url().map(str::to_string),
        })
    }

    pub fn key(&self) -> &str {
        &self.browse_id
    }
}

/// Représente une playlist du catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Identifiant de navigation de la playlist
    pub browse_id: String,
    /// Titre de la playlist
    #[serde(default)]
    pub title: Option<String>,
    /// Chaîne ou curateur de la playlist
    #[serde(default)]
    pub channel: Option<LinkedItem>,
    /// Nombre de chansons affichable (ex. "54 songs")
    #[serde(default)]
    pub song_count_text: Option<String>,
    /// URL de la vignette
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl PlaylistItem {
    pub fn from_two_row_renderer(renderer: &MusicTwoRowItemRenderer) -> Option<Self> {
        let browse_id = renderer.browse_id()?.to_string();
        let title = renderer.title.as_ref().and_then(|t| t.text());

        let mut channel = None;
        let mut song_count_text = None;
        if let Some(subtitle) = &renderer.subtitle {
            for run in &subtitle.runs {
                if run.browse_id().is_some() {
                    channel = LinkedItem::from_run(run);
                } else if let Some(text) = &run.text {
                    if text.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                        song_count_text = Some(text.clone());
                    }
                }
            }
        }

        Some(Self {
            browse_id,
            title,
            channel,
            song_count_text,
            thumbnail_url: renderer.thumbnail_url().map(str::to_string),
        })
    }

    pub fn from_list_renderer(renderer: &MusicResponsiveListItemRenderer) -> Option<Self> {
        let browse_id = renderer.browse_id()?.to_string();
        let title = renderer
            .column_runs(0)
            .first()
            .and_then(|run| run.text.clone());

        let mut channel = None;
        let mut song_count_text = None;
        for run in renderer.column_runs(1) {
            if run.browse_id().is_some() {
                channel = LinkedItem::from_run(run);
            } else if let Some(text) = &run.text {
                if text.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                    song_count_text = Some(text.clone());
                }
            }
        }

        Some(Self {
            browse_id,
            title,
            channel,
            song_count_text,
            thumbnail_url: renderer.thumbnail_url().map(str::to_string),
        })
    }

    pub fn key(&self) -> &str {
        &self.browse_id
    }
}

/// Représente une vidéo (résultats de recherche vidéo)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoItem {
    /// Identifiant de la vidéo
    pub id: String,
    /// Titre de la vidéo
    pub title: String,
    /// Auteurs de la vidéo
    #[serde(default)]
    pub authors: Vec<LinkedItem>,
    /// Nombre de vues affichable
    #[serde(default)]
    pub view_count_text: Option<String>,
    /// Durée affichable
    #[serde(default)]
    pub duration_text: Option<String>,
    /// URL de la vignette
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl VideoItem {
    pub fn from_list_renderer(renderer: &MusicResponsiveListItemRenderer) -> Option<Self> {
        let title_run = renderer.column_runs(0).first()?;
        let id = title_run.video_id()?.to_string();
        let title = title_run.text.clone()?;

        let authors = renderer
            .column_runs(1)
            .iter()
            .filter(|run| run.browse_id().is_some())
            .filter_map(LinkedItem::from_run)
            .collect();

        Some(Self {
            id,
            title,
            authors,
            view_count_text: renderer
                .column_runs(2)
                .first()
                .and_then(|run| run.text.clone()),
            duration_text: renderer.fixed_column_text(0),
            thumbnail_url: renderer.thumbnail_url().map(str::to_string),
        })
    }

    pub fn key(&self) -> &str {
        &self.id
    }
}

/// Tuile humeur/genre proposée par le backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    pub name: String,
    #[serde(default)]
    pub browse_id: Option<String>,
    #[serde(default)]
    pub params: Option<String>,
}

impl Mood {
    pub fn from_navigation_button(renderer: &MusicNavigationButtonRenderer) -> Option<Self> {
        let name = renderer.button_text.as_ref()?.text()?;
        let endpoint = renderer
            .click_command
            .as_ref()
            .and_then(|c| c.browse_endpoint.as_ref());

        Some(Self {
            name,
            browse_id: endpoint.and_then(|e| e.browse_id.clone()),
            params: endpoint.and_then(|e| e.params.clone()),
        })
    }
}

/// Page d'items uniformisée : liste ordonnée + jeton de continuation opaque
///
/// C'est la sortie du normaliseur de pagination : quelle que soit la forme
/// retournée par le backend (étagère ou grille), l'appelant manipule la même
/// structure. `continuation == None` signifie que la page est la dernière.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsPage<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub continuation: Option<String>,
}

impl<T> ItemsPage<T> {
    pub fn new(items: Vec<T>, continuation: Option<String>) -> Self {
        Self {
            items,
            continuation,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.continuation.is_none()
    }
}

/// Filtres de recherche du backend (paramètres opaques)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    Song,
    Video,
    Album,
    Artist,
    CommunityPlaylist,
    FeaturedPlaylist,
}

impl SearchFilter {
    /// Retourne le paramètre opaque attendu par l'endpoint `/search`
    pub fn params(&self) -> &'static str {
        match self {
            Self::Song => "EgWKAQIIAWoKEAkQBRAKEAMQBA%3D%3D",
            Self::Video => "EgWKAQIQAWoKEAkQChAFEAMQBA%3D%3D",
            Self::Album => "EgWKAQIYAWoKEAkQChAFEAMQBA%3D%3D",
            Self::Artist => "EgWKAQIgAWoKEAkQChAFEAMQBA%3D%3D",
            Self::CommunityPlaylist => "EgeKAQQoAEABagoQAxAEEAoQCRAF",
            Self::FeaturedPlaylist => "EgeKAQQoADgBagwQDhAKEAMQBRAJEAQ%3D",
        }
    }
}

/// Page artiste complète
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistPage {
    pub name: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Premières chansons de l'artiste
    #[serde(default)]
    pub songs: Vec<SongItem>,
    /// Cible "toutes les chansons"
    #[serde(default)]
    pub songs_endpoint: Option<BrowseTarget>,
    /// Premiers albums de l'artiste
    #[serde(default)]
    pub albums: Vec<AlbumItem>,
    #[serde(default)]
    pub albums_endpoint: Option<BrowseTarget>,
    /// Premiers singles de l'artiste
    #[serde(default)]
    pub singles: Vec<AlbumItem>,
    #[serde(default)]
    pub singles_endpoint: Option<BrowseTarget>,
    /// Lecture aléatoire de l'artiste
    #[serde(default)]
    pub shuffle_video_id: Option<String>,
    #[serde(default)]
    pub shuffle_playlist_id: Option<String>,
    /// Radio de l'artiste
    #[serde(default)]
    pub radio_playlist_id: Option<String>,
}

/// Page playlist ou album complète
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistPage {
    pub title: Option<String>,
    /// Sous-titre (auteur, année)
    pub subtitle: Option<String>,
    /// Second sous-titre (nombre de chansons, durée totale)
    pub song_count_text: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Chansons de la playlist, paginées
    #[serde(default)]
    pub songs_page: Option<ItemsPage<SongItem>>,
}

/// Item hétérogène d'une section de navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BrowseItem {
    Song(SongItem),
    Album(AlbumItem),
    Artist(ArtistItem),
    Playlist(PlaylistItem),
    Mood(Mood),
}

impl BrowseItem {
    /// Clé stable de l'item, quelle que soit sa variante
    pub fn key(&self) -> &str {
        match self {
            Self::Song(song) => song.key(),
            Self::Album(album) => album.key(),
            Self::Artist(artist) => artist.key(),
            Self::Playlist(playlist) => playlist.key(),
            Self::Mood(mood) => mood.browse_id.as_deref().unwrap_or(&mood.name),
        }
    }
}

/// Section titrée d'une page de navigation (humeur, accueil, nouveautés)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseSection {
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<BrowseItem>,
    /// Cible "voir plus" de la section
    #[serde(default)]
    pub more_endpoint: Option<BrowseTarget>,
}

/// Résultat complet d'une requête `/browse` de navigation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseResult {
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<BrowseSection>,
}
