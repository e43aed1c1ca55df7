//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Identifier assigned by the store on insert
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Validated input for inserting a user. Both fields are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// User creation data transfer object.
///
/// Fields are optional so that an absent key and an explicit `null`
/// both surface as a validation failure instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    /// User display name
    #[validate(required(message = "Name and email are required"))]
    #[schema(example = "Ann", value_type = String)]
    pub name: Option<String>,
    /// User email address (must be unique)
    #[validate(required(message = "Name and email are required"))]
    #[schema(example = "ann@example.com", value_type = String)]
    pub email: Option<String>,
}

impl CreateUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Convert into insert data, or `None` if a required field is missing.
    pub fn into_new_user(self) -> Option<NewUser> {
        match (self.name, self.email) {
            (Some(name), Some(email)) => Some(NewUser { name, email }),
            _ => None,
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i32,
    /// User display name
    #[schema(example = "Ann")]
    pub name: String,
    /// User email address
    #[schema(example = "ann@example.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
