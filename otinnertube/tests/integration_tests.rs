//! Integration tests for otinnertube

use otinnertube::InnertubeClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> InnertubeClient {
    InnertubeClient::new("en", "US")
        .unwrap()
        .with_base_url(server.uri())
}

/// Create a mock shelf of songs for a /browse response
fn mock_song_shelf_json(continuation: Option<&str>) -> serde_json::Value {
    let continuations = match continuation {
        Some(token) => json!([{ "nextContinuationData": { "continuation": token } }]),
        None => json!([]),
    };
    json!({
        "contents": {
            "singleColumnBrowseResultsRenderer": {
                "tabs": [{
                    "tabRenderer": {
                        "content": {
                            "sectionListRenderer": {
                                "contents": [{
                                    "musicShelfRenderer": {
                                        "contents": [
                                            {
                                                "musicResponsiveListItemRenderer": {
                                                    "flexColumns": [
                                                        {
                                                            "musicResponsiveListItemFlexColumnRenderer": {
                                                                "text": {
                                                                    "runs": [{
                                                                        "text": "So What",
                                                                        "navigationEndpoint": {
                                                                            "watchEndpoint": { "videoId": "zqNTltOGh5c" }
                                                                        }
                                                                    }]
                                                                }
                                                            }
                                                        },
                                                        {
                                                            "musicResponsiveListItemFlexColumnRenderer": {
                                                                "text": {
                                                                    "runs": [{
                                                                        "text": "Miles Davis",
                                                                        "navigationEndpoint": {
                                                                            "browseEndpoint": { "browseId": "UCdMWYF2elm4LbkNLwb9MHvQ" }
                                                                        }
                                                                    }]
                                                                }
                                                            }
                                                        }
                                                    ],
                                                    "fixedColumns": [{
                                                        "musicResponsiveListItemFixedColumnRenderer": {
                                                            "text": { "runs": [{ "text": "9:22" }] }
                                                        }
                                                    }]
                                                }
                                            }
                                        ],
                                        "continuations": continuations
                                    }
                                }]
                            }
                        }
                    }
                }]
            }
        }
    })
}

#[tokio::test]
async fn test_playlist_page_with_continuation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/browse"))
        .and(body_partial_json(json!({ "browseId": "VLPLtest" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_song_shelf_json(Some("tok-1"))))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client.playlist_page("VLPLtest").await.unwrap();

    let songs = page.songs_page.unwrap();
    assert_eq!(songs.items.len(), 1);
    assert_eq!(songs.items[0].id, "zqNTltOGh5c");
    assert_eq!(songs.items[0].artists[0].name, "Miles Davis");
    assert_eq!(songs.items[0].duration_text.as_deref(), Some("9:22"));
    assert_eq!(songs.continuation.as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn test_songs_continuation_round() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/browse"))
        .and(body_partial_json(json!({ "continuation": "tok-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "continuationContents": {
                "musicShelfContinuation": {
                    "contents": [{
                        "musicResponsiveListItemRenderer": {
                            "flexColumns": [{
                                "musicResponsiveListItemFlexColumnRenderer": {
                                    "text": {
                                        "runs": [{
                                            "text": "Blue in Green",
                                            "navigationEndpoint": {
                                                "watchEndpoint": { "videoId": "TLDflhhdPCg" }
                                            }
                                        }]
                                    }
                                }
                            }]
                        }
                    }],
                    "continuations": []
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client.songs_continuation("tok-1").await.unwrap().unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Blue in Green");
    assert!(page.is_exhausted());
}

#[tokio::test]
async fn test_browse_caches_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/browse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_song_shelf_json(None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let first = client.browse("FEmusic_new_releases_albums", None).await.unwrap();
    let second = client.browse("FEmusic_new_releases_albums", None).await.unwrap();

    assert_eq!(first.sections.len(), second.sections.len());
}

#[tokio::test]
async fn test_search_songs_uses_filter_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({
            "query": "so what",
            "params": "EgWKAQIIAWoKEAkQBRAKEAMQBA%3D%3D"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": {
                "tabbedSearchResultsRenderer": {
                    "tabs": [{
                        "tabRenderer": {
                            "content": {
                                "sectionListRenderer": {
                                    "contents": [{
                                        "musicShelfRenderer": {
                                            "contents": [{
                                                "musicResponsiveListItemRenderer": {
                                                    "flexColumns": [{
                                                        "musicResponsiveListItemFlexColumnRenderer": {
                                                            "text": {
                                                                "runs": [{
                                                                    "text": "So What",
                                                                    "navigationEndpoint": {
                                                                        "watchEndpoint": { "videoId": "zqNTltOGh5c" }
                                                                    }
                                                                }]
                                                            }
                                                        }
                                                    }]
                                                }
                                            }],
                                            "continuations": []
                                        }
                                    }]
                                }
                            }
                        }
                    }]
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client.search_songs("so what").await.unwrap().unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "zqNTltOGh5c");
}

#[tokio::test]
async fn test_search_suggestions_sends_field_mask() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/music/get_search_suggestions"))
        .and(header("X-Goog-FieldMask", "contents.searchSuggestionsSectionRenderer.contents.searchSuggestionRenderer.navigationEndpoint.searchEndpoint.query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": [{
                "searchSuggestionsSectionRenderer": {
                    "contents": [
                        {
                            "searchSuggestionRenderer": {
                                "navigationEndpoint": {
                                    "searchEndpoint": { "query": "miles davis" }
                                }
                            }
                        },
                        {
                            "searchSuggestionRenderer": {
                                "navigationEndpoint": {
                                    "searchEndpoint": { "query": "miles davis so what" }
                                }
                            }
                        }
                    ]
                }
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let suggestions = client.search_suggestions("miles").await.unwrap();

    assert_eq!(suggestions, vec!["miles davis", "miles davis so what"]);
}

#[tokio::test]
async fn test_song_via_player() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/player"))
        .and(body_partial_json(json!({ "videoId": "zqNTltOGh5c" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playabilityStatus": { "status": "OK" },
            "videoDetails": {
                "videoId": "zqNTltOGh5c",
                "title": "So What",
                "author": "Miles Davis",
                "channelId": "UCdMWYF2elm4LbkNLwb9MHvQ",
                "lengthSeconds": "562",
                "thumbnail": {
                    "thumbnails": [{ "url": "cover.jpg", "width": 544, "height": 544 }]
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let song = client.song("zqNTltOGh5c").await.unwrap();

    assert_eq!(song.title, "So What");
    assert_eq!(song.artists[0].name, "Miles Davis");
    assert_eq!(song.duration_text.as_deref(), Some("9:22"));
    assert_eq!(song.thumbnail_url.as_deref(), Some("cover.jpg"));
}

#[tokio::test]
async fn test_song_not_playable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/player"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playabilityStatus": {
                "status": "UNPLAYABLE",
                "reason": "This video is not available"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.song("gone").await.unwrap_err();

    assert!(matches!(err, otinnertube::InnertubeError::NotPlayable(_)));
}

#[tokio::test]
async fn test_http_error_maps_to_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/browse"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.browse("FEmusic_bogus", None).await.unwrap_err();

    assert!(err.is_not_found());
}
