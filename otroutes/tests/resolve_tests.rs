//! Integration tests for URL resolution

use otinnertube::InnertubeClient;
use otroutes::{resolve, Route};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> InnertubeClient {
    InnertubeClient::new("en", "US")
        .unwrap()
        .with_base_url(server.uri())
}

/// Playlist page whose first song carries an album browse id
fn album_playlist_json() -> serde_json::Value {
    json!({
        "contents": {
            "singleColumnBrowseResultsRenderer": {
                "tabs": [{
                    "tabRenderer": {
                        "content": {
                            "sectionListRenderer": {
                                "contents": [{
                                    "musicShelfRenderer": {
                                        "contents": [{
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
                                                                    "text": "Kind of Blue",
                                                                    "navigationEndpoint": {
                                                                        "browseEndpoint": { "browseId": "MPREb_6cJg9sBoEf9" }
                                                                    }
                                                                }]
                                                            }
                                                        }
                                                    }
                                                ]
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
    })
}

#[tokio::test]
async fn test_album_playlist_link_resolves_to_album() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/browse"))
        .and(body_partial_json(json!({ "browseId": "VLOLAK5uy_kXyz" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(album_playlist_json()))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let route = resolve(
        &client,
        "https://music.youtube.com/playlist?list=OLAK5uy_kXyz",
    )
    .await
    .unwrap();

    match route {
        Route::Album { browse_id } => assert_eq!(browse_id, "MPREb_6cJg9sBoEf9"),
        other => panic!("expected album route, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_playlist_link_gets_browse_prefix() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let route = resolve(
        &client,
        "https://music.youtube.com/playlist?list=PLjzeYvran1Gg",
    )
    .await
    .unwrap();

    match route {
        Route::Playlist {
            browse_id,
            is_radio,
        } => {
            assert_eq!(browse_id, "VLPLjzeYvran1Gg");
            assert!(!is_radio);
        }
        other => panic!("expected playlist route, got {:?}", other),
    }
}

#[tokio::test]
async fn test_radio_playlist_is_flagged() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let route = resolve(
        &client,
        "https://music.youtube.com/playlist?list=RDCLAK5uy_kAbc",
    )
    .await
    .unwrap();

    match route {
        Route::Playlist { is_radio, .. } => assert!(is_radio),
        other => panic!("expected playlist route, got {:?}", other),
    }
}

#[tokio::test]
async fn test_watch_link_resolves_to_player() {
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
                "lengthSeconds": "562"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    for url in [
        "https://music.youtube.com/watch?v=zqNTltOGh5c",
        "https://youtu.be/zqNTltOGh5c",
    ] {
        let route = resolve(&client, url).await.unwrap();
        match route {
            Route::Player { song } => {
                assert_eq!(song.id, "zqNTltOGh5c");
                assert_eq!(song.title, "So What");
            }
            other => panic!("expected player route, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_search_and_channel_need_no_network() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let route = resolve(&client, "https://music.youtube.com/search?q=jazz")
        .await
        .unwrap();
    assert!(matches!(route, Route::Search { query } if query == "jazz"));

    let route = resolve(&client, "https://music.youtube.com/channel/UCdMWYF2elm4")
        .await
        .unwrap();
    assert!(matches!(route, Route::Artist { browse_id } if browse_id == "UCdMWYF2elm4"));
}
