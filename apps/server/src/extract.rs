//! Request extractors that fail with the uniform error shape

use crate::error::ApiError;
use axum::{
	async_trait,
	extract::{FromRequest, FromRequestParts, Path, Request},
	http::request::Parts,
	Json,
};
use serde_json::{json, Value};
use travelog_core::{
	error::{PostError, MSG_INVALID_ID, MSG_INVALID_INPUTS},
	validation::Payload,
};

/// A JSON object body
pub struct JsonPayload(pub Payload);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for JsonPayload {
	type Rejection = ApiError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let reason = match Json::<Value>::from_request(req, state).await {
			Ok(Json(Value::Object(payload))) => return Ok(Self(payload)),
			Ok(Json(_)) => "expected a JSON object".to_string(),
			Err(rejection) => rejection.body_text(),
		};

		Err(PostError::Validation {
			message: MSG_INVALID_INPUTS.to_string(),
			details: Some(json!({ "body": reason })),
		}
		.into())
	}
}

/// The numeric `:id` segment of `/posts/:id`
///
/// Ids that parse but cannot name a stored post are rejected as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostId(pub i32);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PostId {
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let invalid = || -> ApiError {
			PostError::Validation {
				message: MSG_INVALID_ID.to_string(),
				details: None,
			}
			.into()
		};

		let Path(raw) = Path::<String>::from_request_parts(parts, state)
			.await
			.map_err(|_| invalid())?;

		let id: i64 = raw.trim().parse().map_err(|_| invalid())?;

		// Numeric but outside the key space: no such post.
		i32::try_from(id)
			.map(Self)
			.map_err(|_| PostError::NotFound.into())
	}
}
