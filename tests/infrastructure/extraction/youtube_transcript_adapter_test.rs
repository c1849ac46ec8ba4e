#[path = "../../helpers/mock_server.rs"]
mod mock_server;

use std::collections::HashMap;
use std::time::Duration;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;

use newssense::application::ports::{SourceExtractor, SourceExtractorError};
use newssense::domain::SourceInput;
use newssense::infrastructure::extraction::{YouTubeTranscriptAdapter, parse_timed_text};

use mock_server::MockServer;

const TIMED_TEXT: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<transcript>
  <text start="0.0" dur="2.1">Good evening and welcome.</text>
  <text start="2.1" dur="3.0">Tonight&amp;#39;s top story:   the budget</text>
  <text start="5.1" dur="1.0">   </text>
  <text start="6.1" dur="2.5">Markets &amp;amp; banks reacted.</text>
</transcript>"#;

async fn caption_server() -> MockServer {
    let router = Router::new().route(
        "/api/timedtext",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            match (params.get("v").map(String::as_str), params.get("lang").map(String::as_str)) {
                (Some("abc123"), Some("en")) => (StatusCode::OK, TIMED_TEXT).into_response(),
                (Some("silent"), _) => (StatusCode::OK, "<transcript></transcript>").into_response(),
                _ => StatusCode::NOT_FOUND.into_response(),
            }
        }),
    );
    MockServer::start(router).await
}

fn adapter(server: &MockServer) -> YouTubeTranscriptAdapter {
    YouTubeTranscriptAdapter::new(&server.url(), "en", Duration::from_secs(5)).unwrap()
}

#[test]
fn given_timed_text_when_parsing_then_returns_decoded_segments() {
    let segments = parse_timed_text(TIMED_TEXT).unwrap();

    assert_eq!(
        segments,
        vec![
            "Good evening and welcome.",
            "Tonight's top story: the budget",
            "Markets & banks reacted.",
        ]
    );
}

#[test]
fn given_malformed_xml_when_parsing_then_returns_extraction_failed() {
    let result = parse_timed_text("<transcript><text>unterminated</transcript>");

    assert!(matches!(
        result,
        Err(SourceExtractorError::ExtractionFailed(_))
    ));
}

#[tokio::test]
async fn given_watch_url_when_extracting_then_joins_segments_with_spaces() {
    let server = caption_server().await;

    let text = adapter(&server)
        .extract_text(&SourceInput::YouTube(
            "https://www.youtube.com/watch?v=abc123&t=5s".to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(
        text,
        "Good evening and welcome. Tonight's top story: the budget Markets & banks reacted."
    );
}

#[tokio::test]
async fn given_video_without_captions_when_extracting_then_returns_no_text_found() {
    let server = caption_server().await;

    let result = adapter(&server)
        .extract_text(&SourceInput::YouTube("https://youtu.be/silent".to_string()))
        .await;

    assert!(matches!(result, Err(SourceExtractorError::NoTextFound(_))));
}

#[tokio::test]
async fn given_unknown_video_when_extracting_then_returns_fetch_failed() {
    let server = caption_server().await;

    let result = adapter(&server)
        .extract_text(&SourceInput::YouTube("https://youtu.be/unknown".to_string()))
        .await;

    assert!(matches!(result, Err(SourceExtractorError::FetchFailed(_))));
}

#[tokio::test]
async fn given_url_without_video_id_when_extracting_then_returns_invalid_input() {
    let server = caption_server().await;

    let result = adapter(&server)
        .extract_text(&SourceInput::YouTube("https://example.com/watch".to_string()))
        .await;

    assert!(matches!(result, Err(SourceExtractorError::InvalidInput(_))));
}
