use crate::{error::ApiError, AppState};
use axum::{http::StatusCode, routing::get, Router};
use tower_http::trace::TraceLayer;

mod posts;

/// Create the HTTP router
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(|| async { "OK" }))
		.nest("/posts", posts::router())
		.fallback(|| async { ApiError::new(StatusCode::NOT_FOUND, "Risorsa non trovata") })
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}
