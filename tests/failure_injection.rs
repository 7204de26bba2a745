//! Failure injection tests for the gateway.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{client, config_for, start_gateway};

async fn assert_envelope(res: reqwest::Response, error: &str) -> String {
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], error);
    body["details"]
        .as_str()
        .expect("details must be a string")
        .to_string()
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let dead = common::unused_addr().await;
    let gateway = start_gateway(config_for(&format!("http://{}/3", dead))).await;
    let http = client();

    let cases = [
        ("/movies/popular", "Failed to fetch popular movies"),
        ("/search?q=batman", "Search failed"),
        ("/discover/tv?with_genres=18", "Failed to discover TV shows"),
        ("/tv/1399/season/1", "Failed to fetch season details"),
        ("/movie/550/watch/providers", "Failed to fetch movie watch providers"),
    ];

    for (uri, error) in cases {
        let res = http.get(gateway.url(uri)).send().await.unwrap();
        let details = assert_envelope(res, error).await;
        assert!(details.starts_with("upstream request failed"), "uri {}: {}", uri, details);
        assert!(!details.contains(common::API_KEY), "credential leaked: {}", details);
    }
}

#[tokio::test]
async fn test_upstream_hangs_up() {
    let backend = common::start_hangup_backend().await;
    let gateway = start_gateway(config_for(&format!("http://{}/3", backend))).await;

    let res = client().get(gateway.url("/tv/popular")).send().await.unwrap();
    assert_envelope(res, "Failed to fetch popular TV shows").await;
}

#[tokio::test]
async fn test_non_json_body() {
    let mock = MockServer::start().await;
    Mock::given(path("/3/movie/550"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Service Unavailable</html>"))
        .mount(&mock)
        .await;

    let gateway = start_gateway(config_for(&format!("{}/3", mock.uri()))).await;
    let res = client().get(gateway.url("/movie/550")).send().await.unwrap();

    let details = assert_envelope(res, "Failed to fetch movie details").await;
    assert!(details.starts_with("upstream response is not valid JSON"), "{}", details);
}

#[tokio::test]
async fn test_empty_body() {
    let backend = common::start_raw_backend("502 Bad Gateway", "").await;
    let gateway = start_gateway(config_for(&format!("http://{}/3", backend))).await;

    let res = client()
        .get(gateway.url("/movie/550/credits"))
        .send()
        .await
        .unwrap();
    assert_envelope(res, "Failed to fetch movie credits").await;
}

#[tokio::test]
async fn test_configured_timeout() {
    let mock = MockServer::start().await;
    Mock::given(path("/3/trending/movie/week"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock)
        .await;

    let mut config = config_for(&format!("{}/3", mock.uri()));
    config.upstream.timeout_secs = Some(1);
    let gateway = start_gateway(config).await;

    let res = client()
        .get(gateway.url("/trending/movie"))
        .send()
        .await
        .unwrap();
    assert_envelope(res, "Failed to fetch trending movies").await;
}

#[tokio::test]
async fn test_failures_do_not_poison_later_requests() {
    let mock = MockServer::start().await;
    Mock::given(path("/3/movie/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock)
        .await;
    Mock::given(path("/3/movie/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":2}"#))
        .mount(&mock)
        .await;

    let gateway = start_gateway(config_for(&format!("{}/3", mock.uri()))).await;
    let http = client();

    let bad = http.get(gateway.url("/movie/1")).send().await.unwrap();
    assert_eq!(bad.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let good = http.get(gateway.url("/movie/2")).send().await.unwrap();
    assert_eq!(good.status(), StatusCode::OK);
    assert_eq!(good.text().await.unwrap(), r#"{"id":2}"#);
}
