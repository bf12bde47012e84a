//! Error taxonomy shared by validators, repositories and the HTTP layer

use serde_json::{json, Map, Value};
use thiserror::Error;

pub const MSG_NOT_FOUND: &str = "Viaggio non trovato";
pub const MSG_MISSING_INPUTS: &str = "Campi mancanti";
pub const MSG_INVALID_INPUTS: &str = "Campi non validi";
pub const MSG_INVALID_ID: &str = "Il parametro id deve essere numerico";
pub const MSG_EMPTY_ALBUM: &str = "Al viaggio deve essere associato almeno un elemento nell'album";
pub const MSG_INTERNAL: &str = "Errore interno del server";

/// Everything that can go wrong while handling a travel post
#[derive(Error, Debug)]
pub enum PostError {
	/// Malformed, missing, extra or mistyped input
	#[error("{message}")]
	Validation {
		message: String,
		details: Option<Value>,
	},

	/// Unknown post id
	#[error("{}", MSG_NOT_FOUND)]
	NotFound,

	/// Business rule violation, such as an empty album
	#[error("{0}")]
	Domain(String),

	#[error("Database error: {0}")]
	Database(#[from] sea_orm::DbErr),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl PostError {
	/// Validation failure carrying a single detail list, e.g. `{"missingInputs": [..]}`
	pub fn validation(message: impl Into<String>, key: &str, fields: Vec<String>) -> Self {
		let mut details = Map::new();
		details.insert(key.to_string(), json!(fields));

		Self::Validation {
			message: message.into(),
			details: Some(Value::Object(details)),
		}
	}

	pub fn empty_album() -> Self {
		Self::Domain(MSG_EMPTY_ALBUM.to_string())
	}

	/// HTTP status code this error maps to
	pub fn status(&self) -> u16 {
		match self {
			Self::Validation { .. } | Self::Domain(_) => 400,
			Self::NotFound => 404,
			Self::Database(_) | Self::Io(_) | Self::Json(_) => 500,
		}
	}

	/// Error category as exposed in the `error.type` field
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Validation { .. } => "validation",
			_ if self.status() < 500 => "client error",
			_ => "server error",
		}
	}

	pub fn details(&self) -> Option<&Value> {
		match self {
			Self::Validation { details, .. } => details.as_ref(),
			_ => None,
		}
	}
}

/// Result type for travel post operations
pub type Result<T> = std::result::Result<T, PostError>;
