use chrono::Utc;

use super::Db;
use super::models::{AppOwner, AppRow, AppUserRow, ThreadRow};
use crate::error::AppdockError;

impl Db {
    /// Inserts the app row and its owning membership in one transaction.
    ///
    /// Either both rows land or neither does; callers run this under the
    /// retry executor, so the whole transaction re-runs on a transient
    /// failure.
    pub async fn create_app_with_owner(
        &self,
        app_id: &str,
        git_repo: &str,
        name: Option<&str>,
        owner: &AppOwner,
    ) -> Result<AppRow, AppdockError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let app: AppRow = sqlx::query_as(
            r#"
        INSERT INTO apps (id, git_repo, name, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, git_repo, name, created_at
        "#,
        )
        .bind(app_id)
        .bind(git_repo)
        .bind(name)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
        INSERT INTO app_users (
            app_id, user_id, permissions, access_token, access_token_id, git_identity, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
        )
        .bind(&app.id)
        .bind(&owner.user_id)
        .bind(&owner.permissions)
        .bind(&owner.access_token)
        .bind(&owner.access_token_id)
        .bind(&owner.git_identity)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(app)
    }

    /// Creates a conversation thread row.
    pub async fn create_thread(
        &self,
        thread_id: &str,
        resource_id: &str,
    ) -> Result<(), AppdockError> {
        let now = Utc::now();
        sqlx::query(
            r#"
        INSERT INTO threads (id, resource_id, created_at)
        VALUES (?, ?, ?)
        "#,
        )
        .bind(thread_id)
        .bind(resource_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_app(&self, app_id: &str) -> Result<Option<AppRow>, AppdockError> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
        SELECT id, git_repo, name, created_at
        FROM apps
        WHERE id = ?
        "#,
        )
        .bind(app_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_app_users(&self, app_id: &str) -> Result<Vec<AppUserRow>, AppdockError> {
        let rows = sqlx::query_as::<_, AppUserRow>(
            r#"
        SELECT app_id, user_id, permissions, access_token, access_token_id, git_identity, created_at
        FROM app_users
        WHERE app_id = ?
        ORDER BY user_id
        "#,
        )
        .bind(app_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_thread(&self, thread_id: &str) -> Result<Option<ThreadRow>, AppdockError> {
        let row = sqlx::query_as::<_, ThreadRow>(
            r#"
        SELECT id, resource_id, created_at
        FROM threads
        WHERE id = ?
        "#,
        )
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
