//! Tests for the hosted auth and storage HTTP adapters

use assert_matches::assert_matches;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use festhub::config::{AuthConfig, StorageConfig};
use festhub::identity::{HttpIdentityProvider, IdentityProvider};
use festhub::media::{HttpObjectStore, ObjectStore};
use festhub::utils::errors::{FestHubError, UploadError};

const JWT_SECRET: &str = "festival-signing-secret";

fn access_token(sub: &str) -> String {
    #[derive(serde::Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        exp: usize,
    }
    encode(
        &Header::default(),
        &Claims { sub, exp: 4_102_444_800 },
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("test token encodes")
}

fn auth_config(base_url: String) -> AuthConfig {
    AuthConfig {
        base_url,
        anon_key: "anon-key".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        timeout_seconds: 5,
    }
}

fn storage_config(base_url: String) -> StorageConfig {
    StorageConfig {
        base_url,
        bucket: "event-images".to_string(),
        service_key: "service-key".to_string(),
        timeout_seconds: 5,
    }
}

#[tokio::test]
async fn test_sign_in_yields_principal_and_session() {
    let server = MockServer::start().await;
    let auth_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "anon-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": access_token(&auth_id.to_string()) })),
        )
        .mount(&server)
        .await;

    let provider = HttpIdentityProvider::new(&auth_config(server.uri())).unwrap();
    let principal = provider.sign_in("student@college.edu", "secret").await.unwrap();
    assert_eq!(principal.id, auth_id);
    assert_eq!(provider.current_principal().await, Some(principal));

    provider.sign_out().await;
    assert!(provider.current_principal().await.is_none());
}

#[tokio::test]
async fn test_rejected_credentials_surface_as_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let provider = HttpIdentityProvider::new(&auth_config(server.uri())).unwrap();
    let result = provider.sign_in("student@college.edu", "wrong").await;
    assert_matches!(result, Err(FestHubError::Authentication(_)));
    assert!(provider.current_principal().await.is_none());
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let server = MockServer::start().await;
    let forged = encode(
        &Header::default(),
        &serde_json::json!({ "sub": Uuid::new_v4().to_string(), "exp": 4_102_444_800usize }),
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .expect("test token encodes");

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": forged })))
        .mount(&server)
        .await;

    let provider = HttpIdentityProvider::new(&auth_config(server.uri())).unwrap();
    let result = provider.sign_in("student@college.edu", "secret").await;
    assert_matches!(result, Err(FestHubError::Token(_)));
}

#[tokio::test]
async fn test_upload_returns_public_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/event-images/posters/banner.png"))
        .and(header("authorization", "Bearer service-key"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "event-images/posters/banner.png"
        })))
        .mount(&server)
        .await;

    let store = HttpObjectStore::new(&storage_config(server.uri())).unwrap();
    let url = store
        .upload("posters/banner.png", vec![0xAA, 0xBB], "image/png")
        .await
        .unwrap();
    assert_eq!(
        url,
        format!(
            "{}/storage/v1/object/public/event-images/posters/banner.png",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_upload_failure_surfaces_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpObjectStore::new(&storage_config(server.uri())).unwrap();
    let result = store.upload("posters/banner.png", vec![1], "image/png").await;
    assert_matches!(result, Err(FestHubError::Upload(UploadError::RequestFailed(_))));
}
