//! In-process repositories backing service and router tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};

use super::repo::{RepoError, UserRepository};
use super::repo_types::{User, UserFields};

#[derive(Default)]
pub struct MemoryUserRepository {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

impl MemoryUserRepository {
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, fields: &UserFields) -> Result<i64, RepoError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        let now = OffsetDateTime::now_utc();
        inner.rows.insert(
            id,
            User {
                id,
                first_name: fields.first_name.clone(),
                last_name: fields.last_name.clone(),
                email: fields.email.clone(),
                username: fields.username.clone(),
                role: fields.role.clone(),
                photo: fields.photo.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> Result<User, RepoError> {
        let inner = self.inner.lock().unwrap();
        inner.rows.get(&id).cloned().ok_or(RepoError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.values().cloned().collect())
    }

    async fn update_by_id(&self, id: i64, fields: &UserFields) -> Result<(), RepoError> {
        let mut inner = self.inner.lock().unwrap();
        let user = inner.rows.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        // Clock resolution can repeat a timestamp; keep updated_at monotonic.
        let now = OffsetDateTime::now_utc().max(user.updated_at + Duration::microseconds(1));
        user.first_name = fields.first_name.clone();
        user.last_name = fields.last_name.clone();
        user.email = fields.email.clone();
        user.username = fields.username.clone();
        user.role = fields.role.clone();
        user.photo = fields.photo.clone();
        user.updated_at = now;
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepoError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound(id))
    }
}

/// Every call fails as if the pool were exhausted.
pub struct FailingUserRepository;

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn create(&self, _fields: &UserFields) -> Result<i64, RepoError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn get_by_id(&self, _id: i64) -> Result<User, RepoError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update_by_id(&self, _id: i64, _fields: &UserFields) -> Result<(), RepoError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), RepoError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}
