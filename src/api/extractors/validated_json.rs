//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::errors::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// Malformed bodies are rejected as `BadRequest`, failed field rules as
/// `Validation`; both answer 400. A well-formed body that is not an
/// object carries no named fields and is validated as `{}`.
///
/// # Example
///
/// ```rust,ignore
/// use users_api::api::extractors::ValidatedJson;
/// use users_api::domain::CreateUser;
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) {
///     // payload.name and payload.email are both present here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let value: T = serde_json::from_value(into_object(body))
            .map_err(|e| AppError::bad_request(e.to_string()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Keep objects as they are; anything else becomes an empty object so
/// positional or scalar bodies never fill named fields.
fn into_object(body: Value) -> Value {
    match body {
        Value::Object(_) => body,
        _ => Value::Object(Map::new()),
    }
}

/// Format validation errors into a user-friendly string.
///
/// Fields sharing one message (e.g. "Name and email are required")
/// report it once.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();

    messages.sort();
    messages.dedup();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;
    use crate::domain::CreateUser;

    #[test]
    fn test_non_object_bodies_carry_no_fields() {
        for body in [
            serde_json::json!(["Ann", "ann@example.com"]),
            serde_json::json!(null),
            serde_json::json!("Ann"),
        ] {
            let payload: CreateUser = serde_json::from_value(into_object(body)).unwrap();
            assert!(payload.validate().is_err());
            assert_eq!(payload.into_new_user(), None);
        }

        let object = serde_json::json!({ "name": "Ann", "email": "ann@example.com" });
        assert_eq!(into_object(object.clone()), object);
    }

    #[test]
    fn test_shared_message_reported_once() {
        let errors = CreateUser::default().validate().unwrap_err();
        assert_eq!(
            format_validation_errors(&errors),
            "Name and email are required"
        );
    }
}
