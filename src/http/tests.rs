//! Tests for the HTTP module

use super::*;
use crate::auth::Authenticator;
use crate::error::ErrorKind;
use crate::request::RequestSpec;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn spec(server: &MockServer, route: &str, query: &[(&str, &str)]) -> RequestSpec {
    RequestSpec {
        url: Url::parse(&format!("{}{route}", server.uri())).unwrap(),
        query: query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.user_agent.starts_with("tap-getresponse/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .user_agent("test-agent/1.0")
        .authenticator(Authenticator::getresponse("t"))
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_http_response_helpers() {
    let mut response = HttpResponse::new(204, "");
    response
        .headers
        .insert("totalpages", "3".parse().unwrap());

    assert!(response.is_success());
    assert_eq!(response.header("TotalPages"), Some("3"));
    assert!(!HttpResponse::new(404, "").is_success());
    assert!(!HttpResponse::new(301, "").is_success());
}

#[tokio::test]
async fn test_http_client_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .and(query_param("perPage", "100"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("CurrentPage", "2")
                .insert_header("TotalPages", "2")
                .set_body_json(serde_json::json!([{"campaignId": "A"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    let response = client
        .get(&spec(&mock_server, "/campaigns", &[("perPage", "100"), ("page", "2")]))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.header("CurrentPage"), Some("2"));
    assert!(response.body.contains("campaignId"));
}

#[tokio::test]
async fn test_http_client_sends_auth_and_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(header("X-Auth-Token", "api-key secret"))
        .and(header("User-Agent", "my-agent/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .user_agent("my-agent/2.0")
        .authenticator(Authenticator::getresponse("secret"))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client.get(&spec(&mock_server, "/contacts", &[])).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn test_http_client_returns_error_status_without_failing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sms"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    let response = client.get(&spec(&mock_server, "/sms", &[])).await.unwrap();

    assert_eq!(response.status, 500);
    assert!(!response.is_success());
    assert_eq!(response.body, "boom");
}

#[tokio::test]
async fn test_http_client_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(50))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.get(&spec(&mock_server, "/slow", &[])).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
