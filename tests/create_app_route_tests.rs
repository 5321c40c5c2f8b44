use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use appdock::AppdockError;
use appdock::chat::ChatRelay;
use appdock::db::Db;
use appdock::server::{AppdockState, appdock_router};
use appdock::workspace_host::{
    AccessToken, CreateRepo, DevServer, GrantPermission, RepoCreated, WorkspaceHost,
};

struct StaticHost;

#[async_trait]
impl WorkspaceHost for StaticHost {
    async fn create_repo(&self, _req: &CreateRepo) -> Result<RepoCreated, AppdockError> {
        Ok(RepoCreated {
            repo_id: "repo-route".to_string(),
        })
    }

    async fn grant_permission(&self, _grant: &GrantPermission) -> Result<(), AppdockError> {
        Ok(())
    }

    async fn create_access_token(&self, _identity_id: &str) -> Result<AccessToken, AppdockError> {
        Ok(AccessToken {
            id: "tok-id".to_string(),
            token: "tok-secret".to_string(),
        })
    }

    async fn request_dev_server(&self, _repo_id: &str) -> Result<DevServer, AppdockError> {
        Ok(DevServer {
            mcp_ephemeral_url: "https://mcp.example/route".to_string(),
        })
    }
}

struct SilentRelay;

#[async_trait]
impl ChatRelay for SilentRelay {
    async fn send_initial_message(
        &self,
        _app_id: &str,
        _mcp_ephemeral_url: &str,
        _text: &str,
    ) -> Result<(), AppdockError> {
        Ok(())
    }
}

async fn test_router() -> (axum::Router, Db) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "appdock-route-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let database_url = format!("sqlite:{}", temp_path.display());

    let db = Db::connect(&database_url).await.unwrap();
    let state = AppdockState::new(db.clone(), Arc::new(StaticHost), Arc::new(SilentRelay));
    (appdock_router(state), db)
}

#[tokio::test]
async fn create_app_route_returns_201_with_the_app_row() {
    let (app, db) = test_router().await;

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/apps")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "template_id": "nextjs",
                        "initial_message": "Build me a shop",
                        "user": { "user_id": "user-1", "git_identity": "identity-1" }
                    }"#,
                ))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["git_repo"], "repo-route");
    assert_eq!(body["name"], "Build me a shop");
    let app_id = body["id"].as_str().expect("app id is a string");

    let stored = db.get_app(app_id).await.unwrap().expect("app row persisted");
    assert_eq!(stored.git_repo, "repo-route");

    db.close().await;
}

#[tokio::test]
async fn unknown_template_maps_to_400_with_code() {
    let (app, db) = test_router().await;

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/apps")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "template_id": "cobol",
                        "user": { "user_id": "user-1", "git_identity": "identity-1" }
                    }"#,
                ))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "UNKNOWN_TEMPLATE");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Template cobol not found")
    );

    db.close().await;
}

#[tokio::test]
async fn healthz_and_fallback() {
    let (app, db) = test_router().await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    db.close().await;
}
