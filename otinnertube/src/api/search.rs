//! Recherche dans le catalogue
//!
//! La recherche filtrée retourne des pages uniformes : la dernière étagère
//! de résultats est celle du filtre demandé, les étagères précédentes étant
//! des suggestions transverses que l'on ignore.

use crate::api::items_page::ItemConverters;
use crate::api::response::{
    ContinuationResponse, MusicShelfRenderer, SearchResponse, SearchSuggestionsResponse,
};
use crate::api::{bodies, InnertubeApi};
use crate::error::Result;
use crate::models::ItemsPage;
use tracing::debug;

/// Masque de champs des requêtes de recherche
const SEARCH_MASK: &str = "contents,continuationContents";

/// Masque de champs des suggestions de recherche
const SUGGESTIONS_MASK: &str =
    "contents.searchSuggestionsSectionRenderer.contents.searchSuggestionRenderer.navigationEndpoint.searchEndpoint.query";

fn shelf_to_page<T>(
    shelf: Option<&MusicShelfRenderer>,
    converters: &ItemConverters<T>,
) -> Option<ItemsPage<T>> {
    let shelf = shelf?;
    let items = shelf
        .contents
        .iter()
        .filter_map(|c| c.music_responsive_list_item_renderer.as_ref())
        .filter_map(|r| (converters.from_list)(r))
        .collect();
    Some(ItemsPage::new(
        items,
        shelf.continuation().map(str::to_string),
    ))
}

impl InnertubeApi {
    /// Recherche filtrée, première page de résultats
    pub async fn search_page<T>(
        &self,
        body: &bodies::SearchBody,
        converters: &ItemConverters<T>,
    ) -> Result<Option<ItemsPage<T>>> {
        let response: SearchResponse = self.post("/search", body, Some(SEARCH_MASK)).await?;

        let page = shelf_to_page(response.last_shelf(), converters);
        debug!(
            "search page: {} items",
            page.as_ref().map(|p| p.items.len()).unwrap_or(0)
        );
        Ok(page)
    }

    /// Page suivante d'une recherche filtrée
    pub async fn search_page_continuation<T>(
        &self,
        body: &bodies::ContinuationBody,
        converters: &ItemConverters<T>,
    ) -> Result<Option<ItemsPage<T>>> {
        let response: ContinuationResponse =
            self.post("/search", body, Some(SEARCH_MASK)).await?;

        let shelf = response
            .continuation_contents
            .as_ref()
            .and_then(|c| c.music_shelf_continuation.as_ref());
        Ok(shelf_to_page(shelf, converters))
    }

    /// Suggestions de complétion pour une saisie partielle
    pub async fn search_suggestions(
        &self,
        body: &bodies::SearchSuggestionsBody,
    ) -> Result<Vec<String>> {
        let response: SearchSuggestionsResponse = self
            .post("/music/get_search_suggestions", body, Some(SUGGESTIONS_MASK))
            .await?;

        let suggestions = response
            .contents
            .iter()
            .filter_map(|s| s.search_suggestions_section_renderer.as_ref())
            .flat_map(|s| &s.contents)
            .filter_map(|c| c.search_suggestion_renderer.as_ref())
            .filter_map(|r| r.navigation_endpoint.as_ref())
            .filter_map(|e| e.search_endpoint.as_ref())
            .filter_map(|e| e.query.clone())
            .collect();

        Ok(suggestions)
    }
}
