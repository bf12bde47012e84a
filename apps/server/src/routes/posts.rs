//! `/posts` handlers

use crate::{
	error::ApiResult,
	extract::{JsonPayload, PostId},
	AppState,
};
use axum::{
	extract::State,
	http::StatusCode,
	routing::get,
	Json, Router,
};
use once_cell::sync::Lazy;
use serde::Serialize;
use travelog_core::{
	validation::{modify_pipeline, store_pipeline, Pipeline},
	PostDraft, PostError, PostPatch, TravelPost,
};

static STORE_CHECKS: Lazy<Pipeline> = Lazy::new(store_pipeline);
static MODIFY_CHECKS: Lazy<Pipeline> = Lazy::new(modify_pipeline);

/// Success envelope
#[derive(Debug, Serialize)]
struct Data<T> {
	data: T,
}

impl<T> Data<T> {
	fn json(data: T) -> Json<Self> {
		Json(Self { data })
	}
}

pub(crate) fn router() -> Router<AppState> {
	Router::new()
		.route("/", get(index).post(store))
		.route("/:id", get(show).patch(modify).delete(destroy))
}

async fn index(State(state): State<AppState>) -> ApiResult<Json<Data<Vec<TravelPost>>>> {
	let posts = state.posts.get_posts().await?;
	Ok(Data::json(posts))
}

async fn show(
	State(state): State<AppState>,
	PostId(id): PostId,
) -> ApiResult<Json<Data<TravelPost>>> {
	let post = state
		.posts
		.get_post_by_id(id)
		.await?
		.ok_or(PostError::NotFound)?;
	Ok(Data::json(post))
}

async fn store(
	State(state): State<AppState>,
	JsonPayload(mut payload): JsonPayload,
) -> ApiResult<(StatusCode, Json<Data<TravelPost>>)> {
	STORE_CHECKS.run(&mut payload)?;

	let draft = PostDraft::from_payload(&payload)?;
	let post = state.posts.create_post(draft).await?;

	Ok((StatusCode::CREATED, Data::json(post)))
}

async fn modify(
	State(state): State<AppState>,
	PostId(id): PostId,
	JsonPayload(mut payload): JsonPayload,
) -> ApiResult<Json<Data<TravelPost>>> {
	MODIFY_CHECKS.run(&mut payload)?;
	let patch = PostPatch::from_payload(&payload)?;

	let existing = state
		.posts
		.get_post_by_id(id)
		.await?
		.ok_or(PostError::NotFound)?;

	let post = state.posts.update_post(id, patch.merge(&existing)).await?;
	Ok(Data::json(post))
}

async fn destroy(
	State(state): State<AppState>,
	PostId(id): PostId,
) -> ApiResult<Json<Data<TravelPost>>> {
	let existing = state
		.posts
		.get_post_by_id(id)
		.await?
		.ok_or(PostError::NotFound)?;

	state.posts.delete_post(id).await?;
	Ok(Data::json(existing))
}
