use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct AppRow {
    pub id: String,
    pub git_repo: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct AppUserRow {
    pub app_id: String,
    pub user_id: String,
    pub permissions: String,
    pub access_token: String,
    pub access_token_id: String,
    pub git_identity: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ThreadRow {
    pub id: String,
    pub resource_id: String,
    pub created_at: DateTime<Utc>,
}

/// Owning membership written alongside a new app row.
#[derive(Debug, Clone)]
pub struct AppOwner {
    pub user_id: String,
    pub permissions: String,
    pub access_token: String,
    pub access_token_id: String,
    pub git_identity: String,
}
