//! User service - Handles user-related business logic.
//!
//! Validates create input, turns store outcomes into results and
//! keeps no state between calls.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{ENTITY_USER, FIELD_EMAIL, MSG_NAME_AND_EMAIL_REQUIRED};
use crate::domain::{CreateUser, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{DeleteOutcome, InsertOutcome, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users in store order
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Create a user; both name and email must be present and the email unused
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Delete user by ID
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found(ENTITY_USER)
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        let new_user = input
            .into_new_user()
            .ok_or_else(|| AppError::validation(MSG_NAME_AND_EMAIL_REQUIRED))?;

        let email = new_user.email.clone();
        match self.repo.insert(new_user).await? {
            InsertOutcome::Inserted(user) => {
                tracing::info!(user_id = user.id, "User created");
                Ok(user)
            }
            InsertOutcome::DuplicateEmail => {
                tracing::warn!(%email, "Rejected user with duplicate email");
                Err(AppError::conflict(FIELD_EMAIL))
            }
        }
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        match self.repo.delete(id).await? {
            DeleteOutcome::Deleted => {
                tracing::info!(user_id = id, "User deleted");
                Ok(())
            }
            DeleteOutcome::Missing => Err(AppError::not_found(ENTITY_USER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::NewUser;
    use crate::infra::MockUserRepository;

    fn ann(id: i32) -> User {
        User {
            id,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
        }
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_list_users_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|| Ok(vec![ann(1), ann(2)]));

        let users = service(repo).list_users().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
    }

    #[tokio::test]
    async fn test_list_users_empty() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|| Ok(vec![]));

        assert!(service(repo).list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(9))
            .returning(|_| Ok(None));

        let result = service(repo).get_user(9).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .with(eq(NewUser {
                name: "Ann".to_string(),
                email: "ann@example.com".to_string(),
            }))
            .times(1)
            .returning(|_| Ok(InsertOutcome::Inserted(ann(1))));

        let user = service(repo)
            .create_user(CreateUser::new("Ann", "ann@example.com"))
            .await
            .unwrap();

        assert_eq!(user, ann(1));
    }

    #[tokio::test]
    async fn test_create_user_missing_name_never_touches_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert().never();

        let input = CreateUser {
            name: None,
            email: Some("ann@example.com".to_string()),
        };
        let err = service(repo).create_user(input).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_NAME_AND_EMAIL_REQUIRED));
    }

    #[tokio::test]
    async fn test_create_user_missing_email_never_touches_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert().never();

        let input = CreateUser {
            name: Some("Ann".to_string()),
            email: None,
        };
        let err = service(repo).create_user(input).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_is_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .returning(|_| Ok(InsertOutcome::DuplicateEmail));

        let err = service(repo)
            .create_user(CreateUser::new("Ann", "ann@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.user_message(), "Email already exists");
    }

    #[tokio::test]
    async fn test_create_user_store_failure_is_not_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .returning(|_| Err(AppError::from(sea_orm::DbErr::Custom("not null".into()))));

        let err = service(repo)
            .create_user(CreateUser::new("Ann", "ann@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(DeleteOutcome::Deleted));

        assert!(service(repo).delete_user(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_missing() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .returning(|_| Ok(DeleteOutcome::Missing));

        let err = service(repo).delete_user(42).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.user_message(), "User not found");
    }
}
