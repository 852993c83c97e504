use serde_json::json;
use std::path::Path;
use synoid_shorts::agent::publisher::metadata::VideoResource;
use synoid_shorts::agent::publisher::oauth::{Authenticator, ClientSecrets, StoredToken, UPLOAD_SCOPE};
use synoid_shorts::agent::publisher::upload::{ChunkOutcome, ResumableUpload};
use synoid_shorts::agent::publisher::{PublishError, Publisher};
use synoid_shorts::agent::record::ContentRecord;
use synoid_shorts::config::UploadConfig;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn secrets(token_uri: &str) -> ClientSecrets {
    ClientSecrets {
        client_id: "cid".to_string(),
        client_secret: "secret".to_string(),
        auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
        token_uri: token_uri.to_string(),
    }
}

fn write_token(path: &Path, access: &str, refresh: Option<&str>, expires_at: u64) {
    StoredToken {
        access_token: access.to_string(),
        refresh_token: refresh.map(str::to_string),
        expires_at,
        scopes: vec![UPLOAD_SCOPE.to_string()],
    }
    .save(path)
    .unwrap();
}

const FAR_FUTURE: u64 = 4_000_000_000;

#[tokio::test]
async fn test_valid_token_is_reused_without_network() {
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token.json");
    write_token(&token_path, "still-good", Some("r"), FAR_FUTURE);

    let auth = Authenticator::new(secrets("http://127.0.0.1:1/token"), &token_path);
    assert_eq!(auth.access_token().await.unwrap(), "still-good");
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_persisted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token.json");
    write_token(&token_path, "stale", Some("r1"), 1);

    let auth = Authenticator::new(secrets(&format!("{}/token", server.uri())), &token_path);
    assert_eq!(auth.access_token().await.unwrap(), "fresh");

    let saved = StoredToken::load(&token_path).unwrap();
    assert_eq!(saved.access_token, "fresh");
    assert_eq!(saved.refresh_token.as_deref(), Some("r1"));
    assert!(saved.expires_at > 1);
}

#[tokio::test]
async fn test_rejected_refresh_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token.json");
    write_token(&token_path, "stale", Some("revoked"), 1);

    let auth = Authenticator::new(secrets(&format!("{}/token", server.uri())), &token_path);
    let err = auth.access_token().await.unwrap_err();
    assert!(matches!(err, PublishError::Auth(ref msg) if msg.contains("invalid_grant")), "got {:?}", err);
}

async fn mount_session(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/upload/youtube/v3/videos"))
        .and(query_param("uploadType", "resumable"))
        .and(query_param("part", "snippet,status"))
        .and(header("Authorization", "Bearer live-token"))
        .and(header("X-Upload-Content-Length", "10"))
        .and(body_string_contains("\"categoryId\":\"22\""))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Location", format!("{}/session/1", server.uri()).as_str()),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_chunk(server: &MockServer, range: &str, response: ResponseTemplate) {
    Mock::given(method("PUT"))
        .and(path("/session/1"))
        .and(header("Content-Range", range))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn upload_config(server: &MockServer, chunk_size: Option<u64>) -> UploadConfig {
    UploadConfig {
        upload_url: format!("{}/upload/youtube/v3/videos", server.uri()),
        chunk_size,
        ..UploadConfig::default()
    }
}

#[tokio::test]
async fn test_chunked_upload_reports_progress_then_id() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_chunk(
        &server,
        "bytes 0-3/10",
        ResponseTemplate::new(308).insert_header("Range", "bytes=0-3"),
    )
    .await;
    mount_chunk(
        &server,
        "bytes 4-7/10",
        ResponseTemplate::new(308).insert_header("Range", "bytes=0-7"),
    )
    .await;
    mount_chunk(
        &server,
        "bytes 8-9/10",
        ResponseTemplate::new(200).set_body_json(json!({ "id": "abc", "kind": "youtube#video" })),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, b"0123456789").unwrap();

    let config = upload_config(&server, Some(4));
    let resource = VideoResource::from_record(&ContentRecord::fallback(), &config);
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let mut upload = ResumableUpload::start(
        &client,
        &config.upload_url,
        "live-token",
        &resource,
        &video,
        config.chunk_size,
    )
    .await
    .unwrap();

    assert_eq!(upload.next_chunk().await.unwrap(), ChunkOutcome::Progress(0.4));
    assert_eq!(upload.next_chunk().await.unwrap(), ChunkOutcome::Progress(0.8));
    match upload.next_chunk().await.unwrap() {
        ChunkOutcome::Complete(v) => assert_eq!(v.id, "abc"),
        other => panic!("expected completion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_publisher_uploads_with_stored_token() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_chunk(
        &server,
        "bytes 0-9/10",
        ResponseTemplate::new(201).set_body_json(json!({ "id": "vid42" })),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token.json");
    write_token(&token_path, "live-token", None, FAR_FUTURE);
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, b"0123456789").unwrap();

    let auth = Authenticator::new(secrets("http://127.0.0.1:1/token"), &token_path);
    let publisher = Publisher::new(auth, upload_config(&server, None)).unwrap();
    let uploaded = publisher
        .upload_short(&video, &ContentRecord::fallback())
        .await
        .unwrap();
    assert_eq!(uploaded.id, "vid42");
}

#[tokio::test]
async fn test_session_rejection_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/youtube/v3/videos"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quotaExceeded"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, b"0123456789").unwrap();

    let config = upload_config(&server, None);
    let resource = VideoResource::from_record(&ContentRecord::fallback(), &config);
    let err = ResumableUpload::start(
        &reqwest::Client::new(),
        &config.upload_url,
        "t",
        &resource,
        &video,
        None,
    )
    .await
    .err()
    .unwrap();
    assert!(matches!(err, PublishError::Api { status: 403, .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_empty_file_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("empty.mp4");
    std::fs::write(&video, b"").unwrap();

    let config = UploadConfig::default();
    let resource = VideoResource::from_record(&ContentRecord::fallback(), &config);
    let err = ResumableUpload::start(
        &reqwest::Client::new(),
        "http://127.0.0.1:1/upload",
        "t",
        &resource,
        &video,
        None,
    )
    .await
    .err()
    .unwrap();
    assert!(matches!(err, PublishError::Protocol(_)), "got {:?}", err);
}
