//! Boundary to the git hosting / dev sandbox provider.
//!
//! The provider owns repositories, identities, access tokens and dev
//! servers; this module only shapes the calls. [`WorkspaceHost`] is the
//! seam the provisioning action depends on, [`HttpWorkspaceHost`] the
//! production implementation.

mod http;

pub use http::HttpWorkspaceHost;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppdockError;

/// Request to create a remote git repository seeded from a source repo.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepo {
    pub name: String,
    pub public: bool,
    pub source: RepoSource,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl RepoSource {
    pub fn git(url: &str) -> Self {
        Self {
            kind: "git".to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoCreated {
    pub repo_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantPermission {
    pub identity_id: String,
    pub repo_id: String,
    pub permission: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub id: String,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServer {
    pub mcp_ephemeral_url: String,
}

/// Operations the provisioning action needs from the provider.
#[async_trait]
pub trait WorkspaceHost: Send + Sync {
    async fn create_repo(&self, req: &CreateRepo) -> Result<RepoCreated, AppdockError>;

    async fn grant_permission(&self, grant: &GrantPermission) -> Result<(), AppdockError>;

    async fn create_access_token(&self, identity_id: &str) -> Result<AccessToken, AppdockError>;

    async fn request_dev_server(&self, repo_id: &str) -> Result<DevServer, AppdockError>;
}
