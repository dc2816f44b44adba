//! Pages complètes du catalogue : navigation, artiste, playlist, album, chanson
//!
//! Chaque fonction interroge `/browse` (ou `/player` pour les chansons) et
//! replie la réponse sur les structures de [`crate::models`]. Les sections
//! dont la forme n'est pas reconnue sont ignorées sans erreur.

use crate::api::items_page::{items_page_from_section, ItemConverters};
use crate::api::response::{
    BrowseResponse, MusicCarouselShelfRenderer, PlayerResponse, RendererItem, SectionContent,
};
use crate::api::{bodies, InnertubeApi};
use crate::error::{InnertubeError, Result};
use crate::models::{
    AlbumItem, ArtistItem, ArtistPage, BrowseItem, BrowseResult, BrowseSection, BrowseTarget,
    LinkedItem, Mood, PlaylistItem, PlaylistPage, SongItem,
};
use tracing::debug;

const PAGE_TYPE_ALBUM: &str = "MUSIC_PAGE_TYPE_ALBUM";
const PAGE_TYPE_ARTIST: &str = "MUSIC_PAGE_TYPE_ARTIST";
const PAGE_TYPE_PLAYLIST: &str = "MUSIC_PAGE_TYPE_PLAYLIST";

/// Convertit un item hétérogène de grille ou de carrousel
fn browse_item(item: &RendererItem) -> Option<BrowseItem> {
    if let Some(button) = &item.music_navigation_button_renderer {
        return Mood::from_navigation_button(button).map(BrowseItem::Mood);
    }

    if let Some(renderer) = &item.music_two_row_item_renderer {
        if renderer.video_id().is_some() {
            return SongItem::from_two_row_renderer(renderer).map(BrowseItem::Song);
        }
        return match renderer.page_type() {
            Some(PAGE_TYPE_ARTIST) => {
                ArtistItem::from_two_row_renderer(renderer).map(BrowseItem::Artist)
            }
            Some(PAGE_TYPE_PLAYLIST) => {
                PlaylistItem::from_two_row_renderer(renderer).map(BrowseItem::Playlist)
            }
            // Beaucoup d'albums arrivent sans type de page explicite
            _ => AlbumItem::from_two_row_renderer(renderer).map(BrowseItem::Album),
        };
    }

    if let Some(renderer) = &item.music_responsive_list_item_renderer {
        return SongItem::from_list_renderer(renderer).map(BrowseItem::Song);
    }

    None
}

fn browse_target(endpoint: &crate::api::response::BrowseEndpoint) -> Option<BrowseTarget> {
    Some(BrowseTarget {
        browse_id: endpoint.browse_id.clone()?,
        params: endpoint.params.clone(),
    })
}

fn carousel_section(carousel: &MusicCarouselShelfRenderer) -> BrowseSection {
    BrowseSection {
        title: carousel.title(),
        items: carousel.contents.iter().filter_map(browse_item).collect(),
        more_endpoint: carousel.more_endpoint().and_then(browse_target),
    }
}

fn section(content: &SectionContent) -> Option<BrowseSection> {
    if let Some(carousel) = &content.music_carousel_shelf_renderer {
        return Some(carousel_section(carousel));
    }

    if let Some(grid) = &content.grid_renderer {
        return Some(BrowseSection {
            title: grid.title(),
            items: grid.items.iter().filter_map(browse_item).collect(),
            more_endpoint: None,
        });
    }

    if let Some(shelf) = &content.music_shelf_renderer {
        return Some(BrowseSection {
            title: shelf.title.as_ref().and_then(|t| t.text()),
            items: shelf
                .contents
                .iter()
                .filter_map(|c| c.music_responsive_list_item_renderer.as_ref())
                .filter_map(|r| SongItem::from_list_renderer(r).map(BrowseItem::Song))
                .collect(),
            more_endpoint: None,
        });
    }

    None
}

fn page_title(response: &BrowseResponse) -> Option<String> {
    let header = response.header.as_ref()?;
    header
        .music_visual_header_renderer
        .as_ref()
        .and_then(|h| h.title.as_ref())
        .or_else(|| {
            header
                .music_detail_header_renderer
                .as_ref()
                .and_then(|h| h.title.as_ref())
        })
        .or_else(|| {
            header
                .music_immersive_header_renderer
                .as_ref()
                .and_then(|h| h.title.as_ref())
        })
        .and_then(|t| t.text())
}

/// Replie une réponse `/browse` en résultat de navigation
pub fn browse_result_from_response(response: &BrowseResponse) -> BrowseResult {
    BrowseResult {
        title: page_title(response),
        sections: response.section_contents().iter().filter_map(section).collect(),
    }
}

/// Replie une réponse `/browse` en page artiste
pub fn artist_page_from_response(response: &BrowseResponse) -> ArtistPage {
    let mut page = ArtistPage::default();

    if let Some(header) = response
        .header
        .as_ref()
        .and_then(|h| h.music_immersive_header_renderer.as_ref())
    {
        page.name = header.title.as_ref().and_then(|t| t.text());
        page.description = header.description.as_ref().and_then(|t| t.text());
        page.thumbnail_url = header
            .thumbnail
            .as_ref()
            .and_then(|t| t.url())
            .map(str::to_string);

        if let Some(watch) = header
            .play_button
            .as_ref()
            .and_then(|b| b.button_renderer.as_ref())
            .and_then(|b| b.navigation_endpoint.as_ref())
            .and_then(|e| e.watch_endpoint.as_ref())
        {
            page.shuffle_video_id = watch.video_id.clone();
            page.shuffle_playlist_id = watch.playlist_id.clone();
        }

        if let Some(endpoint) = header
            .start_radio_button
            .as_ref()
            .and_then(|b| b.button_renderer.as_ref())
            .and_then(|b| b.navigation_endpoint.as_ref())
        {
            page.radio_playlist_id = endpoint
                .watch_playlist_endpoint
                .as_ref()
                .and_then(|e| e.playlist_id.clone())
                .or_else(|| {
                    endpoint
                        .watch_endpoint
                        .as_ref()
                        .and_then(|e| e.playlist_id.clone())
                });
        }
    }

    for content in response.section_contents() {
        if let Some(shelf) = &content.music_shelf_renderer {
            if page.songs.is_empty() {
                page.songs = shelf
                    .contents
                    .iter()
                    .filter_map(|c| c.music_responsive_list_item_renderer.as_ref())
                    .filter_map(SongItem::from_list_renderer)
                    .collect();
                page.songs_endpoint = shelf
                    .bottom_endpoint
                    .as_ref()
                    .and_then(|e| e.browse_endpoint.as_ref())
                    .and_then(browse_target);
            }
            continue;
        }

        let Some(carousel) = &content.music_carousel_shelf_renderer else {
            continue;
        };
        let albums: Vec<AlbumItem> = carousel
            .contents
            .iter()
            .filter_map(|item| item.music_two_row_item_renderer.as_ref())
            .filter(|r| r.video_id().is_none())
            .filter_map(AlbumItem::from_two_row_renderer)
            .collect();
        if albums.is_empty() {
            continue;
        }
        let more = carousel.more_endpoint().and_then(browse_target);
        // Premier carrousel d'albums : les albums ; le suivant : les singles
        if page.albums.is_empty() && page.albums_endpoint.is_none() {
            page.albums = albums;
            page.albums_endpoint = more;
        } else if page.singles.is_empty() && page.singles_endpoint.is_none() {
            page.singles = albums;
            page.singles_endpoint = more;
        }
    }

    page
}

/// Replie une réponse `/browse` en page playlist ou album
pub fn playlist_page_from_response(response: &BrowseResponse) -> PlaylistPage {
    let mut page = PlaylistPage::default();

    if let Some(header) = response
        .header
        .as_ref()
        .and_then(|h| h.music_detail_header_renderer.as_ref())
    {
        page.title = header.title.as_ref().and_then(|t| t.text());
        page.subtitle = header.subtitle.as_ref().and_then(|t| t.text());
        page.song_count_text = header.second_subtitle.as_ref().and_then(|t| t.text());
        page.thumbnail_url = header
            .thumbnail
            .as_ref()
            .and_then(|t| t.url())
            .map(str::to_string);
    }

    let converters = ItemConverters {
        from_list: SongItem::from_list_renderer,
        from_two_row: SongItem::from_two_row_renderer,
    };
    page.songs_page = response
        .section_contents()
        .iter()
        .find(|c| c.music_shelf_renderer.is_some())
        .and_then(|c| items_page_from_section(Some(c), &converters));

    page
}

/// Formate une durée en secondes sous la forme mm:ss (ou h:mm:ss)
fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

impl InnertubeApi {
    /// Page de navigation générique (accueil, humeurs, nouveautés)
    pub async fn browse(&self, body: &bodies::BrowseBody) -> Result<BrowseResult> {
        let response: BrowseResponse = self.post("/browse", body, None).await?;
        let result = browse_result_from_response(&response);
        debug!("browse: {} sections", result.sections.len());
        Ok(result)
    }

    /// Page artiste complète
    pub async fn artist_page(&self, body: &bodies::BrowseBody) -> Result<ArtistPage> {
        let response: BrowseResponse = self.post("/browse", body, None).await?;
        Ok(artist_page_from_response(&response))
    }

    /// Page playlist complète
    pub async fn playlist_page(&self, body: &bodies::BrowseBody) -> Result<PlaylistPage> {
        let response: BrowseResponse = self.post("/browse", body, None).await?;
        Ok(playlist_page_from_response(&response))
    }

    /// Page album complète (même forme que les playlists)
    pub async fn album_page(&self, body: &bodies::BrowseBody) -> Result<PlaylistPage> {
        self.playlist_page(body).await
    }

    /// Métadonnées d'une chanson via `/player`
    ///
    /// Retourne [`InnertubeError::NotPlayable`] quand le backend refuse la
    /// lecture (contenu indisponible ou géo-restreint).
    pub async fn song(&self, body: &bodies::PlayerBody) -> Result<SongItem> {
        let response: PlayerResponse = self.post("/player", body, None).await?;

        let status = response
            .playability_status
            .as_ref()
            .and_then(|s| s.status.as_deref());
        if status != Some("OK") {
            let reason = response
                .playability_status
                .as_ref()
                .and_then(|s| s.reason.clone())
                .unwrap_or_else(|| "playback refused".to_string());
            debug!("song not playable: {}", reason);
            return Err(InnertubeError::NotPlayable(reason));
        }

        let details = response
            .video_details
            .as_ref()
            .ok_or_else(|| InnertubeError::MalformedResponse("missing videoDetails".to_string()))?;
        let id = details
            .video_id
            .clone()
            .ok_or_else(|| InnertubeError::MalformedResponse("missing videoId".to_string()))?;
        let title = details
            .title
            .clone()
            .ok_or_else(|| InnertubeError::MalformedResponse("missing title".to_string()))?;

        let artists = details
            .author
            .as_ref()
            .map(|author| vec![LinkedItem::new(author.clone(), details.channel_id.clone())])
            .unwrap_or_default();

        Ok(SongItem {
            id,
            title,
            artists,
            album: None,
            duration_text: details
                .length_seconds
                .as_deref()
                .and_then(|s| s.parse::<u64>().ok())
                .map(format_duration),
            thumbnail_url: details
                .thumbnail
                .as_ref()
                .and_then(|t| t.best_url())
                .map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(562), "9:22");
        assert_eq!(format_duration(3725), "1:02:05");
    }

    #[test]
    fn test_browse_result_moods_grid() {
        let response: BrowseResponse = serde_json::from_value(json!({
            "contents": {
                "singleColumnBrowseResultsRenderer": {
                    "tabs": [{
                        "tabRenderer": {
                            "content": {
                                "sectionListRenderer": {
                                    "contents": [{
                                        "gridRenderer": {
                                            "header": {
                                                "gridHeaderRenderer": {
                                                    "title": { "runs": [{ "text": "Moods & moments" }] }
                                                }
                                            },
                                            "items": [{
                                                "musicNavigationButtonRenderer": {
                                                    "buttonText": { "runs": [{ "text": "Chill" }] },
                                                    "clickCommand": {
                                                        "browseEndpoint": {
                                                            "browseId": "FEmusic_moods_and_genres_category",
                                                            "params": "ggMPOg1uX1JOQWZFeDByc2Jm"
                                                        }
                                                    }
                                                }
                                            }]
                                        }
                                    }]
                                }
                            }
                        }
                    }]
                }
            }
        }))
        .unwrap();

        let result = browse_result_from_response(&response);
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].title.as_deref(), Some("Moods & moments"));
        match &result.sections[0].items[0] {
            BrowseItem::Mood(mood) => {
                assert_eq!(mood.name, "Chill");
                assert_eq!(
                    mood.browse_id.as_deref(),
                    Some(crate::client::BROWSE_ID_MOODS_CATEGORY)
                );
            }
            other => panic!("expected mood, got {:?}", other),
        }
    }

    #[test]
    fn test_artist_page_carousels() {
        let album_carousel = |title: &str, browse_id: &str| {
            json!({
                "musicCarouselShelfRenderer": {
                    "header": {
                        "musicCarouselShelfBasicHeaderRenderer": {
                            "title": { "runs": [{ "text": title }] }
                        }
                    },
                    "contents": [{
                        "musicTwoRowItemRenderer": {
                            "title": { "runs": [{ "text": "Some record" }] },
                            "navigationEndpoint": {
                                "browseEndpoint": { "browseId": browse_id }
                            }
                        }
                    }]
                }
            })
        };

        let response: BrowseResponse = serde_json::from_value(json!({
            "header": {
                "musicImmersiveHeaderRenderer": {
                    "title": { "runs": [{ "text": "Miles Davis" }] },
                    "playButton": {
                        "buttonRenderer": {
                            "navigationEndpoint": {
                                "watchEndpoint": {
                                    "videoId": "zqNTltOGh5c",
                                    "playlistId": "RDAO_shuffle"
                                }
                            }
                        }
                    },
                    "startRadioButton": {
                        "buttonRenderer": {
                            "navigationEndpoint": {
                                "watchPlaylistEndpoint": { "playlistId": "RDEM_radio" }
                            }
                        }
                    }
                }
            },
            "contents": {
                "singleColumnBrowseResultsRenderer": {
                    "tabs": [{
                        "tabRenderer": {
                            "content": {
                                "sectionListRenderer": {
                                    "contents": [
                                        {
                                            "musicShelfRenderer": {
                                                "contents": [],
                                                "bottomEndpoint": {
                                                    "browseEndpoint": {
                                                        "browseId": "VLPLAB_songs",
                                                        "params": "wAEB"
                                                    }
                                                }
                                            }
                                        },
                                        album_carousel("Albums", "MPREb_albums"),
                                        album_carousel("Singles", "MPREb_singles")
                                    ]
                                }
                            }
                        }
                    }]
                }
            }
        }))
        .unwrap();

        let page = artist_page_from_response(&response);
        assert_eq!(page.name.as_deref(), Some("Miles Davis"));
        assert_eq!(page.shuffle_video_id.as_deref(), Some("zqNTltOGh5c"));
        assert_eq!(page.radio_playlist_id.as_deref(), Some("RDEM_radio"));
        assert_eq!(
            page.songs_endpoint.as_ref().map(|e| e.browse_id.as_str()),
            Some("VLPLAB_songs")
        );
        assert_eq!(page.albums[0].browse_id, "MPREb_albums");
        assert_eq!(page.singles[0].browse_id, "MPREb_singles");
    }
}
