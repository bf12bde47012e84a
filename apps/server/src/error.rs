//! Uniform error responses
//!
//! Every failure leaves the server as
//! `{ "error": { "type": .., "message": .. }, "details": <object|null> }`.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use travelog_core::error::{PostError, MSG_INTERNAL};

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	kind: &'static str,
	message: String,
	details: Option<Value>,
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
	error: ErrorDetail,
	details: Option<Value>,
}

#[derive(Serialize)]
struct ErrorDetail {
	#[serde(rename = "type")]
	kind: &'static str,
	message: String,
}

impl ApiError {
	/// An error with no more specific category, classified by its status
	pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self {
			status,
			kind: if status.is_server_error() {
				"server error"
			} else {
				"client error"
			},
			message: message.into(),
			details: None,
		}
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}
}

impl From<PostError> for ApiError {
	fn from(err: PostError) -> Self {
		let status =
			StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

		// Storage failures are logged here and never echoed to the client.
		let message = if status.is_server_error() {
			error!("Request failed: {}", err);
			MSG_INTERNAL.to_string()
		} else {
			err.to_string()
		};

		Self {
			status,
			kind: err.kind(),
			message,
			details: err.details().cloned(),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody {
			error: ErrorDetail {
				kind: self.kind,
				message: self.message,
			},
			details: self.details,
		};
		(self.status, Json(body)).into_response()
	}
}
