//! Travelog HTTP API
//!
//! Routes `/posts` requests through the payload validators to a [`PostRepository`]
//! and shapes every outcome into `{ "data": .. }` or the uniform error body.

use std::sync::Arc;
use travelog_core::PostRepository;

pub mod error;
pub mod extract;
pub mod routes;

pub use routes::create_router;

#[derive(Clone)]
pub struct AppState {
	pub posts: Arc<dyn PostRepository>,
}

impl AppState {
	pub fn new(posts: Arc<dyn PostRepository>) -> Self {
		Self { posts }
	}
}
