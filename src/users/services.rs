use std::sync::Arc;

use tracing::{info, warn};

use crate::error::AppError;
use crate::users::repo::{RepoError, UserRepository};
use crate::users::repo_types::{User, UserFields};

/// Use-case layer between the HTTP handlers and the repository.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Validate required fields and insert a new user, returning its id.
    pub async fn register(&self, fields: UserFields) -> Result<i64, AppError> {
        if !fields.has_required() {
            warn!("registration rejected: missing first_name, last_name or email");
            return Err(AppError::Validation("incomplete user data".into()));
        }

        let id = self
            .repo
            .create(&fields)
            .await
            .map_err(|e| AppError::storage("failed to register user", e))?;
        info!(user_id = id, email = %fields.email, "user registered");
        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<User, AppError> {
        let user = self.repo.get_by_id(id).await.map_err(|e| match e {
            RepoError::NotFound(id) => AppError::NotFound { id },
            other => AppError::storage(format!("failed to get user with ID {id}"), other),
        })?;
        info!(user_id = id, "user retrieved");
        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = self
            .repo
            .get_all()
            .await
            .map_err(|e| AppError::storage("failed to get all users", e))?;
        info!(count = users.len(), "users listed");
        Ok(users)
    }

    pub async fn update_by_id(&self, id: i64, fields: UserFields) -> Result<(), AppError> {
        self.repo
            .update_by_id(id, &fields)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(id) => AppError::NotFound { id },
                other => AppError::storage(format!("failed to update user with ID {id}"), other),
            })?;
        info!(user_id = id, "user updated");
        Ok(())
    }

    pub async fn remove_by_id(&self, id: i64) -> Result<(), AppError> {
        self.repo.delete_by_id(id).await.map_err(|e| match e {
            RepoError::NotFound(id) => AppError::NotFound { id },
            other => AppError::storage(format!("failed to delete user with ID {id}"), other),
        })?;
        info!(user_id = id, "user deleted");
        Ok(())
    }
}
