//! `HttpClient` against a mock server: paths, headers, bodies and error codes.

use httpmock::prelude::*;
use pawlike::{ClientConfig, Credentials, DogApi, ErrorCode, HttpClient};
use serde_json::json;
use std::time::Duration;

const IMAGE: &str = "https://images.dog.ceo/breeds/shiba/shiba-11.jpg";

fn client(server: &MockServer) -> HttpClient {
    let config = ClientConfig::new(&server.url("/api"))
        .unwrap()
        .with_timeout(Duration::from_secs(5));
    HttpClient::new(&config).unwrap()
}

#[tokio::test]
async fn login_posts_credentials_and_reads_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .json_body(json!({"email": "bob@example.com", "password": "Passw0rd!"}));
        then.status(200)
            .json_body(json!({"token": "tok-1", "userID": "user-7"}));
    });

    let login = client(&server)
        .login(&Credentials::new("bob@example.com", "Passw0rd!"))
        .await
        .unwrap();

    assert_eq!(login.token.as_deref(), Some("tok-1"));
    assert_eq!(login.user_id, "user-7");
    mock.assert();
}

#[tokio::test]
async fn error_body_code_becomes_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(401).json_body(json!({"code": "invalid_credentials"}));
    });

    let err = client(&server)
        .login(&Credentials::new("bob@example.com", "nope"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidCredentials);
    assert_eq!(err.message, ErrorCode::InvalidCredentials.message());
}

#[tokio::test]
async fn unknown_or_missing_code_is_database_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/dog/random");
        then.status(500).json_body(json!({"code": "something_new"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/auth/verify");
        then.status(502).body("bad gateway");
    });

    let api = client(&server);
    assert_eq!(
        api.random_dog(None).await.unwrap_err().code,
        ErrorCode::DatabaseError
    );
    assert_eq!(
        api.verify_auth("tok").await.unwrap_err().code,
        ErrorCode::DatabaseError
    );
}

#[tokio::test]
async fn register_unwraps_user() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/register");
        then.status(201).json_body(json!({
            "message": "User registered successfully",
            "user": {
                "id": "user-9",
                "email": "new@example.com",
                "created_at": "2024-05-01T10:00:00Z",
                "updated_at": "2024-05-01T10:00:00Z"
            }
        }));
    });

    let user = client(&server)
        .register(&Credentials::new("new@example.com", "Passw0rd!"))
        .await
        .unwrap();

    assert_eq!(user.id, "user-9");
    assert_eq!(user.email, "new@example.com");
}

#[tokio::test]
async fn verify_sends_bearer_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/auth/verify")
            .header("authorization", "Bearer tok-1");
        then.status(200).json_body(json!({"userID": "user-7"}));
    });

    let verified = client(&server).verify_auth("tok-1").await.unwrap();
    assert_eq!(verified.user_id, "user-7");
    mock.assert();
}

#[tokio::test]
async fn random_dog_passes_user_id_when_signed_in() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/dog/random")
            .query_param("user_id", "user-7");
        then.status(200)
            .json_body(json!({"image_url": IMAGE, "liked": true}));
    });

    let image = client(&server).random_dog(Some("user-7")).await.unwrap();
    assert_eq!(image.image_url, IMAGE);
    assert!(image.liked);
    mock.assert();
}

#[tokio::test]
async fn random_dog_without_liked_flag_defaults_to_false() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/dog/random");
        then.status(200).json_body(json!({"image_url": IMAGE}));
    });

    let image = client(&server).random_dog(None).await.unwrap();
    assert!(!image.liked);
}

#[tokio::test]
async fn like_and_unlike_send_image_url() {
    let server = MockServer::start();
    let like = server.mock(|when, then| {
        when.method(POST)
            .path("/api/liked_images/user-7")
            .header("authorization", "Bearer tok-1")
            .json_body(json!({"imageURL": IMAGE}));
        then.status(201)
            .json_body(json!({"message": "Image liked successfully"}));
    });
    let unlike = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/liked_images/user-7")
            .header("authorization", "Bearer tok-1")
            .json_body(json!({"imageURL": IMAGE}));
        then.status(204);
    });

    let api = client(&server);
    api.like_image("tok-1", "user-7", IMAGE).await.unwrap();
    api.unlike_image("tok-1", "user-7", IMAGE).await.unwrap();

    like.assert();
    unlike.assert();
}

#[tokio::test]
async fn like_conflict_maps_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/liked_images/user-7");
        then.status(409).json_body(json!({"code": "image_already_liked"}));
    });

    let err = client(&server)
        .like_image("tok-1", "user-7", IMAGE)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ImageAlreadyLiked);
}

#[tokio::test]
async fn liked_images_reads_list() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/liked_images/user-7")
            .header("authorization", "Bearer tok-1");
        then.status(200).json_body(json!({"images": [IMAGE]}));
    });

    let images = client(&server)
        .liked_images("tok-1", "user-7")
        .await
        .unwrap();
    assert_eq!(images, vec![IMAGE.to_string()]);
}

#[tokio::test]
async fn unreachable_server_is_an_api_error() {
    // Nothing listens on port 9 of localhost.
    let config = ClientConfig::new("http://127.0.0.1:9/api")
        .unwrap()
        .with_timeout(Duration::from_secs(2));
    let api = HttpClient::new(&config).unwrap();

    let err = api.random_dog(None).await.unwrap_err();
    assert!(matches!(
        err.code,
        ErrorCode::DatabaseError | ErrorCode::ExternalApiError
    ));
}
