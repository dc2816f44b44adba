//! Structures miroir des réponses JSON du backend
//!
//! Le backend décrit toutes ses pages avec quelques "renderers" imbriqués :
//! étagères plates (`musicShelfRenderer`), grilles (`gridRenderer`),
//! carrousels (`musicCarouselShelfRenderer`) et deux formes d'items
//! (`musicResponsiveListItemRenderer` et `musicTwoRowItemRenderer`).
//! Tout champ que le backend peut omettre est un `Option` : un champ
//! manquant n'est jamais une erreur de parsing.

use serde::Deserialize;

// ============ Texte et navigation ============

/// Suite de fragments de texte, chacun pouvant porter un lien de navigation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Runs {
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Runs {
    /// Concatène tous les fragments en une seule chaîne
    pub fn text(&self) -> Option<String> {
        if self.runs.is_empty() {
            return None;
        }
        Some(
            self.runs
                .iter()
                .filter_map(|run| run.text.as_deref())
                .collect::<Vec<_>>()
                .concat(),
        )
    }

    pub fn first_text(&self) -> Option<&str> {
        self.runs.first().and_then(|run| run.text.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub text: Option<String>,
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

impl Run {
    /// Identifiant de navigation (browseId) porté par ce fragment, le cas échéant
    pub fn browse_id(&self) -> Option<&str> {
        self.navigation_endpoint
            .as_ref()?
            .browse_endpoint
            .as_ref()?
            .browse_id
            .as_deref()
    }

    /// Identifiant de vidéo (watchEndpoint) porté par ce fragment, le cas échéant
    pub fn video_id(&self) -> Option<&str> {
        self.navigation_endpoint
            .as_ref()?
            .watch_endpoint
            .as_ref()?
            .video_id
            .as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEndpoint {
    pub watch_endpoint: Option<WatchEndpoint>,
    pub browse_endpoint: Option<BrowseEndpoint>,
    pub search_endpoint: Option<SearchEndpoint>,
    pub watch_playlist_endpoint: Option<WatchPlaylistEndpoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchEndpoint {
    pub video_id: Option<String>,
    pub playlist_id: Option<String>,
    pub params: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchPlaylistEndpoint {
    pub playlist_id: Option<String>,
    pub params: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseEndpoint {
    pub browse_id: Option<String>,
    pub params: Option<String>,
    pub browse_endpoint_context_supported_configs: Option<BrowseEndpointContextSupportedConfigs>,
}

impl BrowseEndpoint {
    /// Type de page cible (ex. `MUSIC_PAGE_TYPE_ALBUM`)
    pub fn page_type(&self) -> Option<&str> {
        self.browse_endpoint_context_supported_configs
            .as_ref()?
            .browse_endpoint_context_music_config
            .as_ref()?
            .page_type
            .as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseEndpointContextSupportedConfigs {
    pub browse_endpoint_context_music_config: Option<BrowseEndpointContextMusicConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseEndpointContextMusicConfig {
    pub page_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEndpoint {
    pub query: Option<String>,
    pub params: Option<String>,
}

// ============ Vignettes ============

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRenderer {
    pub music_thumbnail_renderer: Option<MusicThumbnailRenderer>,
}

impl ThumbnailRenderer {
    /// URL de la vignette la plus grande disponible
    pub fn url(&self) -> Option<&str> {
        self.music_thumbnail_renderer
            .as_ref()?
            .thumbnail
            .as_ref()?
            .best_url()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicThumbnailRenderer {
    pub thumbnail: Option<Thumbnails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnails {
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
}

impl Thumbnails {
    pub fn best_url(&self) -> Option<&str> {
        self.thumbnails
            .iter()
            .max_by_key(|t| t.width.unwrap_or(0))
            .map(|t| t.url.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

// ============ Items ============

/// Item "liste" : ligne avec colonnes de texte (chansons, résultats de recherche)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicResponsiveListItemRenderer {
    #[serde(default)]
    pub flex_columns: Vec<FlexColumn>,
    #[serde(default)]
    pub fixed_columns: Vec<FlexColumn>,
    pub thumbnail: Option<ThumbnailRenderer>,
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

impl MusicResponsiveListItemRenderer {
    /// Fragments de texte de la colonne `index` (vide si absente)
    pub fn column_runs(&self, index: usize) -> &[Run] {
        self.flex_columns
            .get(index)
            .and_then(|c| c.music_responsive_list_item_flex_column_renderer.as_ref())
            .and_then(|c| c.text.as_ref())
            .map(|runs| runs.runs.as_slice())
            .unwrap_or(&[])
    }

    /// Texte de la colonne fixe `index` (durée des chansons)
    pub fn fixed_column_text(&self, index: usize) -> Option<String> {
        self.fixed_columns
            .get(index)
            .and_then(|c| c.music_responsive_list_item_flex_column_renderer.as_ref())
            .and_then(|c| c.text.as_ref())
            .and_then(Runs::text)
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail.as_ref().and_then(ThumbnailRenderer::url)
    }

    /// Cible de navigation de la ligne entière (browseId)
    pub fn browse_id(&self) -> Option<&str> {
        self.navigation_endpoint
            .as_ref()?
            .browse_endpoint
            .as_ref()?
            .browse_id
            .as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexColumn {
    // Les colonnes fixes emploient le même renderer sous un autre nom
    #[serde(
        alias = "musicResponsiveListItemFixedColumnRenderer",
        rename = "musicResponsiveListItemFlexColumnRenderer"
    )]
    pub music_responsive_list_item_flex_column_renderer: Option<FlexColumnRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexColumnRenderer {
    pub text: Option<Runs>,
}

/// Item "deux lignes" : vignette + titre + sous-titre (albums, artistes, playlists)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicTwoRowItemRenderer {
    pub title: Option<Runs>,
    pub subtitle: Option<Runs>,
    pub thumbnail_renderer: Option<ThumbnailRenderer>,
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

impl MusicTwoRowItemRenderer {
    pub fn browse_id(&self) -> Option<&str> {
        self.navigation_endpoint
            .as_ref()?
            .browse_endpoint
            .as_ref()?
            .browse_id
            .as_deref()
    }

    pub fn video_id(&self) -> Option<&str> {
        self.navigation_endpoint
            .as_ref()?
            .watch_endpoint
            .as_ref()?
            .video_id
            .as_deref()
    }

    pub fn page_type(&self) -> Option<&str> {
        self.navigation_endpoint
            .as_ref()?
            .browse_endpoint
            .as_ref()?
            .page_type()
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_renderer
            .as_ref()
            .and_then(ThumbnailRenderer::url)
    }
}

/// Tuile de navigation (catégories humeurs/genres)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicNavigationButtonRenderer {
    pub button_text: Option<Runs>,
    pub click_command: Option<ClickCommand>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickCommand {
    pub browse_endpoint: Option<BrowseEndpoint>,
}

/// Enveloppe d'item : une grille ou un carrousel mélange plusieurs formes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererItem {
    pub music_responsive_list_item_renderer: Option<MusicResponsiveListItemRenderer>,
    pub music_two_row_item_renderer: Option<MusicTwoRowItemRenderer>,
    pub music_navigation_button_renderer: Option<MusicNavigationButtonRenderer>,
}

// ============ Étagères, grilles, carrousels ============

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicShelfRenderer {
    pub title: Option<Runs>,
    #[serde(default)]
    pub contents: Vec<MusicShelfContent>,
    #[serde(default)]
    pub continuations: Vec<Continuation>,
    pub bottom_endpoint: Option<NavigationEndpoint>,
}

impl MusicShelfRenderer {
    /// Premier jeton de continuation de l'étagère
    pub fn continuation(&self) -> Option<&str> {
        self.continuations
            .iter()
            .find_map(|c| c.next_continuation_data.as_ref())
            .and_then(|data| data.continuation.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicShelfContent {
    pub music_responsive_list_item_renderer: Option<MusicResponsiveListItemRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Continuation {
    pub next_continuation_data: Option<NextContinuationData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextContinuationData {
    pub continuation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRenderer {
    pub header: Option<GridHeader>,
    #[serde(default)]
    pub items: Vec<RendererItem>,
}

impl GridRenderer {
    pub fn title(&self) -> Option<String> {
        self.header
            .as_ref()?
            .grid_header_renderer
            .as_ref()?
            .title
            .as_ref()?
            .text()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridHeader {
    pub grid_header_renderer: Option<GridHeaderRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridHeaderRenderer {
    pub title: Option<Runs>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicCarouselShelfRenderer {
    pub header: Option<CarouselHeader>,
    #[serde(default)]
    pub contents: Vec<RendererItem>,
}

impl MusicCarouselShelfRenderer {
    pub fn title(&self) -> Option<String> {
        self.basic_header()?.title.as_ref()?.text()
    }

    /// Cible "voir plus" du carrousel, si le backend en propose une
    pub fn more_endpoint(&self) -> Option<&BrowseEndpoint> {
        self.basic_header()?
            .more_content_button
            .as_ref()?
            .button_renderer
            .as_ref()?
            .navigation_endpoint
            .as_ref()?
            .browse_endpoint
            .as_ref()
    }

    fn basic_header(&self) -> Option<&CarouselBasicHeaderRenderer> {
        self.header
            .as_ref()?
            .music_carousel_shelf_basic_header_renderer
            .as_ref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselHeader {
    pub music_carousel_shelf_basic_header_renderer: Option<CarouselBasicHeaderRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselBasicHeaderRenderer {
    pub title: Option<Runs>,
    pub more_content_button: Option<Button>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub button_renderer: Option<ButtonRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonRenderer {
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

// ============ Sections et onglets ============

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionListRenderer {
    #[serde(default)]
    pub contents: Vec<SectionContent>,
    #[serde(default)]
    pub continuations: Vec<Continuation>,
}

/// Contenu d'une section : une seule des variantes est renseignée
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionContent {
    pub music_shelf_renderer: Option<MusicShelfRenderer>,
    pub grid_renderer: Option<GridRenderer>,
    pub music_carousel_shelf_renderer: Option<MusicCarouselShelfRenderer>,
    pub music_description_shelf_renderer: Option<MusicDescriptionShelfRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicDescriptionShelfRenderer {
    pub description: Option<Runs>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub tab_renderer: Option<TabRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRenderer {
    pub title: Option<String>,
    pub content: Option<TabContent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabContent {
    pub section_list_renderer: Option<SectionListRenderer>,
}

// ============ Réponses complètes ============

/// Réponse de l'endpoint `/browse`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    pub contents: Option<BrowseContents>,
    pub header: Option<BrowseHeader>,
}

impl BrowseResponse {
    /// Sections du premier onglet (vide si la structure attendue est absente)
    pub fn section_contents(&self) -> &[SectionContent] {
        self.contents
            .as_ref()
            .and_then(|c| c.single_column_browse_results_renderer.as_ref())
            .and_then(|r| r.tabs.first())
            .and_then(|tab| tab.tab_renderer.as_ref())
            .and_then(|tab| tab.content.as_ref())
            .and_then(|content| content.section_list_renderer.as_ref())
            .map(|list| list.contents.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_section_content(&self) -> Option<&SectionContent> {
        self.section_contents().first()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseContents {
    pub single_column_browse_results_renderer: Option<SingleColumnBrowseResultsRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleColumnBrowseResultsRenderer {
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

/// En-tête de page : une seule des variantes est renseignée
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseHeader {
    pub music_immersive_header_renderer: Option<MusicImmersiveHeaderRenderer>,
    pub music_detail_header_renderer: Option<MusicDetailHeaderRenderer>,
    pub music_visual_header_renderer: Option<MusicVisualHeaderRenderer>,
}

/// En-tête de page artiste
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicImmersiveHeaderRenderer {
    pub title: Option<Runs>,
    pub description: Option<Runs>,
    pub thumbnail: Option<ThumbnailRenderer>,
    pub play_button: Option<Button>,
    pub start_radio_button: Option<Button>,
}

/// En-tête de page album / playlist
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicDetailHeaderRenderer {
    pub title: Option<Runs>,
    pub subtitle: Option<Runs>,
    pub second_subtitle: Option<Runs>,
    pub thumbnail: Option<ThumbnailRenderer>,
}

/// En-tête de page humeur
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicVisualHeaderRenderer {
    pub title: Option<Runs>,
}

/// Réponse de `/browse` pour un jeton de continuation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationResponse {
    pub continuation_contents: Option<ContinuationContents>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationContents {
    pub music_shelf_continuation: Option<MusicShelfRenderer>,
    pub section_list_continuation: Option<SectionListRenderer>,
}

/// Réponse de l'endpoint `/search`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub contents: Option<SearchContents>,
}

impl SearchResponse {
    /// Dernière étagère du premier onglet de résultats
    pub fn last_shelf(&self) -> Option<&MusicShelfRenderer> {
        self.contents
            .as_ref()?
            .tabbed_search_results_renderer
            .as_ref()?
            .tabs
            .first()?
            .tab_renderer
            .as_ref()?
            .content
            .as_ref()?
            .section_list_renderer
            .as_ref()?
            .contents
            .iter()
            .rev()
            .find_map(|content| content.music_shelf_renderer.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchContents {
    pub tabbed_search_results_renderer: Option<TabbedSearchResultsRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabbedSearchResultsRenderer {
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

/// Réponse de `/music/get_search_suggestions`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSuggestionsResponse {
    #[serde(default)]
    pub contents: Vec<SearchSuggestionsSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSuggestionsSection {
    pub search_suggestions_section_renderer: Option<SearchSuggestionsSectionRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSuggestionsSectionRenderer {
    #[serde(default)]
    pub contents: Vec<SearchSuggestionContent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSuggestionContent {
    pub search_suggestion_renderer: Option<SearchSuggestionRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSuggestionRenderer {
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

/// Réponse de l'endpoint `/player`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub video_details: Option<VideoDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub channel_id: Option<String>,
    pub length_seconds: Option<String>,
    pub thumbnail: Option<Thumbnails>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_runs_text_concatenation() {
        let runs: Runs = serde_json::from_value(json!({
            "runs": [
                { "text": "Kind of Blue" },
                { "text": " • " },
                { "text": "1959" }
            ]
        }))
        .unwrap();

        assert_eq!(runs.text().as_deref(), Some("Kind of Blue • 1959"));
        assert_eq!(runs.first_text(), Some("Kind of Blue"));
    }

    #[test]
    fn test_empty_runs_is_none() {
        let runs = Runs::default();
        assert!(runs.text().is_none());
    }

    #[test]
    fn test_thumbnails_best_url_prefers_largest() {
        let thumbnails: Thumbnails = serde_json::from_value(json!({
            "thumbnails": [
                { "url": "small.jpg", "width": 60, "height": 60 },
                { "url": "large.jpg", "width": 544, "height": 544 },
                { "url": "medium.jpg", "width": 226, "height": 226 }
            ]
        }))
        .unwrap();

        assert_eq!(thumbnails.best_url(), Some("large.jpg"));
    }

    #[test]
    fn test_shelf_continuation_token() {
        let shelf: MusicShelfRenderer = serde_json::from_value(json!({
            "contents": [],
            "continuations": [
                { "nextContinuationData": { "continuation": "4qmFsgK..." } }
            ]
        }))
        .unwrap();

        assert_eq!(shelf.continuation(), Some("4qmFsgK..."));
    }

    #[test]
    fn test_fixed_column_alias() {
        // Les colonnes fixes arrivent sous un nom de renderer différent
        let renderer: MusicResponsiveListItemRenderer = serde_json::from_value(json!({
            "fixedColumns": [
                {
                    "musicResponsiveListItemFixedColumnRenderer": {
                        "text": { "runs": [{ "text": "5:37" }] }
                    }
                }
            ]
        }))
        .unwrap();

        assert_eq!(renderer.fixed_column_text(0).as_deref(), Some("5:37"));
    }

    #[test]
    fn test_browse_response_missing_sections() {
        let response: BrowseResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.section_contents().is_empty());
        assert!(response.first_section_content().is_none());
    }
}
