use async_trait::async_trait;
use sqlx::PgPool;

use crate::users::repo_types::{User, UserFields};

/// Failures surfaced by a [`UserRepository`].
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("no user row with id {0}")]
    NotFound(i64),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence port for the `users` table. Every method issues exactly one
/// statement.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, fields: &UserFields) -> Result<i64, RepoError>;
    async fn get_by_id(&self, id: i64) -> Result<User, RepoError>;
    async fn get_all(&self) -> Result<Vec<User>, RepoError>;
    async fn update_by_id(&self, id: i64, fields: &UserFields) -> Result<(), RepoError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), RepoError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    /// Insert a new user; timestamps come from the store.
    async fn create(&self, fields: &UserFields) -> Result<i64, RepoError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (first_name, last_name, email, username, role, photo, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, now(), now())
            RETURNING id
            "#,
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(&fields.username)
        .bind(&fields.role)
        .bind(&fields.photo)
        .fetch_one(&self.db)
        .await?;
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> Result<User, RepoError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, username, role, photo, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(RepoError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, username, role, photo, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    /// Replace all writable columns and bump `updated_at`.
    async fn update_by_id(&self, id: i64, fields: &UserFields) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE users
               SET first_name = $1, last_name = $2, email = $3,
                   username = $4, role = $5, photo = $6,
                   updated_at = now()
             WHERE id = $7
            "#,
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(&fields.username)
        .bind(&fields.role)
        .bind(&fields.photo)
        .bind(id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}
