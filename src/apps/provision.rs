use std::time::Instant;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::db::models::{AppOwner, AppRow};
use crate::error::AppdockError;
use crate::retry::{self, RetryPolicy};
use crate::server::AppdockState;
use crate::workspace_host::{CreateRepo, GrantPermission, RepoSource};

use super::templates;

/// The acting user, resolved by the caller (there is no auth layer here).
#[derive(Debug, Clone, Deserialize)]
pub struct ActingUser {
    pub user_id: String,
    /// Identity known to the workspace host, used for grants and tokens.
    pub git_identity: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppRequest {
    pub template_id: String,
    #[serde(default)]
    pub initial_message: Option<String>,
    pub user: ActingUser,
}

/// Repos are created before the user has named the app.
const UNNAMED_APP: &str = "Unnamed App";

/// Provisions a new app workspace end to end.
///
/// Steps run strictly in order: template lookup, repo creation, write grant,
/// access token, dev server, then the retried database writes and the
/// optional initial-message relay. Any failure propagates unchanged.
pub async fn provision_app(
    state: &AppdockState,
    req: &CreateAppRequest,
) -> Result<AppRow, AppdockError> {
    let request_id = short_request_id();
    let template = templates::lookup(&req.template_id)?;

    let git_started = Instant::now();
    let repo = state
        .host
        .create_repo(&CreateRepo {
            name: UNNAMED_APP.to_string(),
            public: true,
            source: RepoSource::git(template.repo),
        })
        .await?;
    state
        .host
        .grant_permission(&GrantPermission {
            identity_id: req.user.git_identity.clone(),
            repo_id: repo.repo_id.clone(),
            permission: "write".to_string(),
        })
        .await?;
    let token = state.host.create_access_token(&req.user.git_identity).await?;
    info!(
        request_id,
        template = template.id,
        repo_id = %repo.repo_id,
        elapsed_ms = git_started.elapsed().as_millis(),
        "git provisioning complete"
    );

    let dev_started = Instant::now();
    let dev_server = state.host.request_dev_server(&repo.repo_id).await?;
    info!(
        request_id,
        elapsed_ms = dev_started.elapsed().as_millis(),
        "dev server ready"
    );

    let app_id = Uuid::new_v4().to_string();
    let owner = AppOwner {
        user_id: req.user.user_id.clone(),
        permissions: "admin".to_string(),
        access_token: token.token.clone(),
        access_token_id: token.id.clone(),
        git_identity: req.user.git_identity.clone(),
    };

    let db_started = Instant::now();
    let app = retry::execute(RetryPolicy::default(), "create app", || {
        let db = state.db.clone();
        let app_id = app_id.clone();
        let repo_id = repo.repo_id.clone();
        let name = req.initial_message.clone();
        let owner = owner.clone();
        async move {
            db.create_app_with_owner(&app_id, &repo_id, name.as_deref(), &owner)
                .await
        }
    })
    .await?;
    info!(
        request_id,
        app_id = %app.id,
        elapsed_ms = db_started.elapsed().as_millis(),
        "app persisted"
    );

    let thread_started = Instant::now();
    retry::execute(RetryPolicy::default(), "create thread", || {
        let db = state.db.clone();
        let app_id = app.id.clone();
        async move { db.create_thread(&app_id, &app_id).await }
    })
    .await?;
    info!(
        request_id,
        elapsed_ms = thread_started.elapsed().as_millis(),
        "conversation thread created"
    );

    if let Some(text) = req.initial_message.as_deref() {
        let relay_started = Instant::now();
        state
            .relay
            .send_initial_message(&app.id, &dev_server.mcp_ephemeral_url, text)
            .await?;
        info!(
            request_id,
            elapsed_ms = relay_started.elapsed().as_millis(),
            "initial message sent"
        );
    }

    Ok(app)
}

/// Short id scoping one provisioning run's log lines.
fn short_request_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}
