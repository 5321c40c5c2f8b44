//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `apps` table (one row per provisioned app workspace)
/// - `app_users` table (membership + git credentials, one (app_id, user_id) per row)
/// - `threads` table (conversation threads, keyed by the owning app)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Provisioned app workspaces
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS apps (
    id TEXT PRIMARY KEY NOT NULL,
    git_repo TEXT NOT NULL,
    name TEXT NULL,
    created_at TEXT NOT NULL -- RFC3339
);

-- ---------------------------------------------------------------------------
-- App membership (one (app_id, user_id) per row)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS app_users (
    app_id TEXT NOT NULL REFERENCES apps(id),
    user_id TEXT NOT NULL,
    permissions TEXT NOT NULL,
    access_token TEXT NOT NULL,
    access_token_id TEXT NOT NULL,
    git_identity TEXT NOT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    UNIQUE(app_id, user_id)
);

CREATE INDEX IF NOT EXISTS idx_app_users_user ON app_users(user_id);

-- ---------------------------------------------------------------------------
-- Conversation threads (thread id doubles as the owning resource id)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS threads (
    id TEXT PRIMARY KEY NOT NULL,
    resource_id TEXT NOT NULL,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_threads_resource ON threads(resource_id);
"#;
