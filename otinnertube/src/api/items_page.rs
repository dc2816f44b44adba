//! Uniformisation des listes paginées du backend
//!
//! Une page "toutes les chansons" ou "tous les albums" d'un artiste arrive
//! soit sous forme d'étagère plate, soit sous forme de grille. Ce module
//! replie les deux formes sur [`ItemsPage`] :
//!
//! - étagère présente : ses items, plus son premier jeton de continuation ;
//! - grille seule : ses items, sans continuation (les grilles sont complètes) ;
//! - ni l'une ni l'autre : pas de page.
//!
//! L'étagère a toujours priorité sur la grille quand les deux coexistent.

use crate::api::response::{
    ContinuationResponse, MusicResponsiveListItemRenderer, MusicTwoRowItemRenderer, SectionContent,
};
use crate::api::{bodies, InnertubeApi};
use crate::error::Result;
use crate::models::ItemsPage;
use tracing::debug;

/// Masque de champs des requêtes de listes paginées
const ITEMS_PAGE_MASK: &str = "contents,continuationContents";

/// Convertisseurs d'items pour les deux formes de renderer
///
/// Un convertisseur qui retourne `None` fait ignorer l'item ; `no_list_items`
/// et `no_two_row_items` servent de convertisseurs neutres quand une forme
/// n'est pas attendue.
pub struct ItemConverters<T> {
    pub from_list: fn(&MusicResponsiveListItemRenderer) -> Option<T>,
    pub from_two_row: fn(&MusicTwoRowItemRenderer) -> Option<T>,
}

/// Convertisseur neutre pour les items liste
pub fn no_list_items<T>(_: &MusicResponsiveListItemRenderer) -> Option<T> {
    None
}

/// Convertisseur neutre pour les items deux-lignes
pub fn no_two_row_items<T>(_: &MusicTwoRowItemRenderer) -> Option<T> {
    None
}

/// Replie une section sur une page d'items uniforme
pub fn items_page_from_section<T>(
    section: Option<&SectionContent>,
    converters: &ItemConverters<T>,
) -> Option<ItemsPage<T>> {
    let section = section?;

    if let Some(shelf) = &section.music_shelf_renderer {
        let items = shelf
            .contents
            .iter()
            .filter_map(|c| c.music_responsive_list_item_renderer.as_ref())
            .filter_map(|r| (converters.from_list)(r))
            .collect();
        return Some(ItemsPage::new(
            items,
            shelf.continuation().map(str::to_string),
        ));
    }

    if let Some(grid) = &section.grid_renderer {
        let items = grid
            .items
            .iter()
            .filter_map(|item| {
                item.music_two_row_item_renderer
                    .as_ref()
                    .and_then(|r| (converters.from_two_row)(r))
                    .or_else(|| {
                        item.music_responsive_list_item_renderer
                            .as_ref()
                            .and_then(|r| (converters.from_list)(r))
                    })
            })
            .collect();
        return Some(ItemsPage::new(items, None));
    }

    None
}

impl InnertubeApi {
    /// Récupère une page d'items paginée via `/browse`
    pub async fn items_page<T>(
        &self,
        body: &bodies::BrowseBody,
        converters: &ItemConverters<T>,
    ) -> Result<Option<ItemsPage<T>>> {
        let response: crate::api::response::BrowseResponse =
            self.post("/browse", body, Some(ITEMS_PAGE_MASK)).await?;

        let page = items_page_from_section(response.first_section_content(), converters);
        debug!(
            "items page: {} items, continuation: {}",
            page.as_ref().map(|p| p.items.len()).unwrap_or(0),
            page.as_ref().is_some_and(|p| p.continuation.is_some())
        );
        Ok(page)
    }

    /// Récupère la page suivante d'une liste à partir de son jeton
    pub async fn items_page_continuation<T>(
        &self,
        body: &bodies::ContinuationBody,
        converters: &ItemConverters<T>,
    ) -> Result<Option<ItemsPage<T>>> {
        let response: ContinuationResponse =
            self.post("/browse", body, Some(ITEMS_PAGE_MASK)).await?;

        let Some(shelf) = response
            .continuation_contents
            .as_ref()
            .and_then(|c| c.music_shelf_continuation.as_ref())
        else {
            return Ok(None);
        };

        let items = shelf
            .contents
            .iter()
            .filter_map(|c| c.music_responsive_list_item_renderer.as_ref())
            .filter_map(|r| (converters.from_list)(r))
            .collect();

        Ok(Some(ItemsPage::new(
            items,
            shelf.continuation().map(str::to_string),
        )))
    }
}
