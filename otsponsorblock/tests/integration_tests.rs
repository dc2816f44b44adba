//! Integration tests for otsponsorblock

use otsponsorblock::{Action, Category, SponsorBlockClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SponsorBlockClient {
    SponsorBlockClient::new().unwrap().with_base_url(server.uri())
}

#[tokio::test]
async fn test_segments_for_video() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/skipSegments"))
        .and(query_param("videoID", "zqNTltOGh5c"))
        .and(query_param("service", "YouTube"))
        .and(query_param("category", "sponsor"))
        .and(query_param("action", "skip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "UUID": "8a7c2d3e",
                "category": "sponsor",
                "actionType": "skip",
                "segment": [13.5, 42.0]
            },
            {
                "UUID": "91bf0e22",
                "category": "music_offtopic",
                "actionType": "skip",
                "segment": [180.0, 195.25]
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let segments = client
        .segments(
            "zqNTltOGh5c",
            &[Category::Sponsor, Category::MusicOfftopic],
            &[Action::Skip],
            &[],
        )
        .await
        .unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].uuid, "8a7c2d3e");
    assert_eq!(segments[0].category, Category::Sponsor);
    assert_eq!(segments[0].start(), 13.5);
    assert_eq!(segments[1].category, Category::MusicOfftopic);
    assert_eq!(segments[1].end(), 195.25);
}

#[tokio::test]
async fn test_highlight_request_and_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/skipSegments"))
        .and(query_param("category", "poi_highlight"))
        .and(query_param("action", "skip"))
        .and(query_param("action", "poi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "UUID": "c4d51f07",
                "category": "poi_highlight",
                "actionType": "poi",
                "segment": [95.0, 95.0]
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let segments = client
        .segments(
            "vid",
            &[Category::PoiHighlight],
            &[Action::Skip, Action::Poi],
            &[],
        )
        .await
        .unwrap();

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].category, Category::PoiHighlight);
    assert_eq!(segments[0].action, Action::Poi);
}

#[tokio::test]
async fn test_404_means_no_segments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/skipSegments"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let segments = client
        .segments("unreported", &[Category::Sponsor], &[Action::Skip], &[])
        .await
        .unwrap();

    assert!(segments.is_empty());
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/skipSegments"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .segments("any", &[Category::Sponsor], &[Action::Skip], &[])
        .await
        .unwrap_err();

    match err {
        otsponsorblock::SponsorBlockError::ApiError { code, .. } => assert_eq!(code, 503),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_required_segment_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/skipSegments"))
        .and(query_param("requiredSegment", "8a7c2d3e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "UUID": "8a7c2d3e",
                "category": "sponsor",
                "actionType": "skip",
                "segment": [0.0, 5.0]
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let segments = client
        .segments(
            "vid",
            &[Category::Sponsor],
            &[Action::Skip],
            &["8a7c2d3e".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(segments.len(), 1);
}
