//! Integration tests for `IntakeClient` using wiremock HTTP mocks.

use igleads_core::normalize;
use igleads_intake::{IntakeClient, IntakeError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/discovery/extension/instagram";

fn test_client(root: &str) -> IntakeClient {
    IntakeClient::new(root, "tenant-1", 30).expect("client construction should not fail")
}

#[tokio::test]
async fn check_exists_reports_known_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("username", "studio.ana"))
        .and(header("X-USER-ID", "tenant-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "exists": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply = client
        .check_exists("studio.ana")
        .await
        .expect("check should succeed");

    assert!(reply.exists);
}

#[tokio::test]
async fn check_exists_reports_unknown_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("username", "new.face"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "exists": false, "hint": "free" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reply = client.check_exists("new.face").await.unwrap();

    assert!(!reply.exists);
    assert_eq!(reply.extra.get("hint"), Some(&json!("free")));
}

#[tokio::test]
async fn check_exists_maps_server_error_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.check_exists("studio.ana").await.unwrap_err();

    assert!(
        matches!(
            err,
            IntakeError::Status { status: 500, ref url } if url.contains("username=studio.ana")
        ),
        "expected Status(500), got: {err:?}"
    );
}

#[tokio::test]
async fn check_exists_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.check_exists("studio.ana").await.unwrap_err();

    assert!(
        matches!(err, IntakeError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn submit_posts_profile_tagged_with_social_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("X-USER-ID", "tenant-1"))
        .and(body_partial_json(json!({
            "socialType": "instagram",
            "about": { "username": "studio.ana" },
            "manual": { "gender": "female" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "lead-7" })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = normalize(&json!({
        "about": { "username": "studio.ana" },
        "manual": { "gender": "female" }
    }));
    let client = test_client(&server.uri());
    let reply = client.submit(&profile).await.expect("submit should succeed");

    assert_eq!(reply, json!({ "id": "lead-7" }));
}

#[tokio::test]
async fn submit_accepts_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let profile = normalize(&json!({ "about": { "username": "kai" } }));
    let client = test_client(&server.uri());
    let reply = client.submit(&profile).await.unwrap();

    assert!(reply.is_null());
}

#[tokio::test]
async fn submit_maps_not_found_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let profile = normalize(&json!({ "about": { "username": "kai" } }));
    let client = test_client(&server.uri());
    let err = client.submit(&profile).await.unwrap_err();

    assert!(
        matches!(err, IntakeError::Status { status: 404, .. }),
        "expected Status(404), got: {err:?}"
    );
}

#[tokio::test]
async fn requests_go_beneath_dev_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dev/discovery/extension/instagram"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "exists": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/dev", server.uri()));
    let reply = client.check_exists("studio.ana").await.unwrap();

    assert!(reply.exists);
}
