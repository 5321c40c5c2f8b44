use backon::{ExponentialBuilder, Retryable};
use serde::Serialize;
use serde_json::json;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

use async_trait::async_trait;
use tracing::debug;

use super::{
    AccessToken, CreateRepo, DevServer, GrantPermission, RepoCreated, WorkspaceHost,
};
use crate::config::WorkspaceHostConfig;
use crate::error::AppdockError;

static NETWORK_RETRY_POLICY: LazyLock<ExponentialBuilder> = LazyLock::new(|| {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(100))
        .with_max_delay(Duration::from_millis(300))
        .with_max_times(2)
        .with_jitter()
});

/// HTTP client for the workspace host API.
pub struct HttpWorkspaceHost {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl HttpWorkspaceHost {
    pub fn new(cfg: &WorkspaceHostConfig) -> Result<Self, AppdockError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
        })
    }

    /// POSTs JSON to `path`, retrying server errors with bounded jittered
    /// backoff. Non-2xx after retries surfaces as `HostStatus`.
    async fn post_json<T>(&self, path: &str, body: &T) -> Result<reqwest::Response, AppdockError>
    where
        T: Serialize,
    {
        let url = self.base_url.join(path)?;

        let resp = (|| {
            let client = self.client.clone();
            let url = url.clone();
            let api_key = self.api_key.clone();

            async move {
                let resp = client
                    .post(url.clone())
                    .bearer_auth(api_key)
                    .json(body)
                    .send()
                    .await?;

                if resp.status().is_server_error() {
                    let status = resp.status();
                    let err = resp.error_for_status_ref().unwrap_err();

                    debug!(
                        %status,
                        url = %url,
                        "workspace host server error (will retry)"
                    );

                    return Err(err);
                }

                Ok(resp)
            }
        })
        .retry(*NETWORK_RETRY_POLICY)
        .await?;

        if !resp.status().is_success() {
            return Err(AppdockError::HostStatus(resp.status()));
        }

        Ok(resp)
    }
}

#[async_trait]
impl WorkspaceHost for HttpWorkspaceHost {
    async fn create_repo(&self, req: &CreateRepo) -> Result<RepoCreated, AppdockError> {
        let resp = self.post_json("git/v1/repos", req).await?;
        Ok(resp.json::<RepoCreated>().await?)
    }

    async fn grant_permission(&self, grant: &GrantPermission) -> Result<(), AppdockError> {
        self.post_json("git/v1/permissions", grant).await?;
        Ok(())
    }

    async fn create_access_token(&self, identity_id: &str) -> Result<AccessToken, AppdockError> {
        let body = json!({ "identityId": identity_id });
        let resp = self.post_json("git/v1/access-tokens", &body).await?;
        Ok(resp.json::<AccessToken>().await?)
    }

    async fn request_dev_server(&self, repo_id: &str) -> Result<DevServer, AppdockError> {
        let body = json!({ "repoId": repo_id });
        let resp = self.post_json("dev-servers", &body).await?;
        Ok(resp.json::<DevServer>().await?)
    }
}
