use serde::{Deserialize, Serialize};
use url::Url;

/// External service endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServicesConfig {
    /// Git hosting / dev sandbox provider.
    #[serde(default)]
    pub workspace_host: WorkspaceHostConfig,

    /// Builder model endpoint.
    #[serde(default)]
    pub model: ModelConfig,
}

/// Workspace host (git hosting + dev sandbox) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceHostConfig {
    /// Base URL of the workspace host API.
    /// TOML: `services.workspace_host.base_url`. Default: `http://localhost:8720`.
    #[serde(default = "default_host_base_url")]
    pub base_url: Url,

    /// API key sent as a bearer token on every host call.
    /// TOML: `services.workspace_host.api_key`. Default: empty.
    #[serde(default)]
    pub api_key: String,
}

impl Default for WorkspaceHostConfig {
    fn default() -> Self {
        Self {
            base_url: default_host_base_url(),
            api_key: String::new(),
        }
    }
}

/// Builder model endpoint configuration (OpenAI-compatible).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Base URL of the OpenAI-compatible endpoint.
    /// TOML: `services.model.base_url`. Default: `http://localhost:8000/v1`.
    #[serde(default = "default_model_base_url")]
    pub base_url: Url,

    /// API key for the model endpoint. The local CLI bridge accepts any
    /// value, hence the placeholder default.
    /// TOML: `services.model.api_key`. Default: `dummy-key`.
    #[serde(default = "default_model_api_key")]
    pub api_key: String,

    /// Model identifier requested from the endpoint.
    /// TOML: `services.model.model`. Default: `claude-code`.
    #[serde(default = "default_model_name")]
    pub model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_model_base_url(),
            api_key: default_model_api_key(),
            model: default_model_name(),
        }
    }
}

fn default_host_base_url() -> Url {
    Url::parse("http://localhost:8720").expect("static URL parses")
}

fn default_model_base_url() -> Url {
    Url::parse("http://localhost:8000/v1").expect("static URL parses")
}

fn default_model_api_key() -> String {
    "dummy-key".to_string()
}

fn default_model_name() -> String {
    "claude-code".to_string()
}
