//! User repository implementation.
//!
//! Mutations run inside a scoped transaction and report their
//! non-error alternatives through outcome enums.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set, SqlErr,
    TransactionTrait,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Result of an insert attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum InsertOutcome {
    /// Row committed; carries the stored record with its assigned id
    Inserted(User),
    /// Email uniqueness constraint rejected the row; nothing was written
    DuplicateEmail,
}

/// Result of a delete attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum DeleteOutcome {
    Deleted,
    /// No row with the requested id
    Missing,
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users ordered by id
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Insert a new user, committing on success and rolling back on conflict
    async fn insert(&self, new_user: NewUser) -> AppResult<InsertOutcome>;

    /// Delete user by ID
    async fn delete(&self, id: i32) -> AppResult<DeleteOutcome>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn insert(&self, new_user: NewUser) -> AppResult<InsertOutcome> {
        let txn = self.db.begin().await?;

        let active_model = ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            ..Default::default()
        };

        match active_model.insert(&txn).await {
            Ok(model) => {
                txn.commit().await?;
                Ok(InsertOutcome::Inserted(User::from(model)))
            }
            // Only the unique constraint maps to a conflict; any other
            // integrity failure stays a database error.
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                txn.rollback().await?;
                Ok(InsertOutcome::DuplicateEmail)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(AppError::from(err))
            }
        }
    }

    async fn delete(&self, id: i32) -> AppResult<DeleteOutcome> {
        let txn = self.db.begin().await?;

        let Some(model) = UserEntity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(DeleteOutcome::Missing);
        };

        // Dropping `txn` on an error path rolls it back.
        model.delete(&txn).await?;
        txn.commit().await?;

        Ok(DeleteOutcome::Deleted)
    }
}
