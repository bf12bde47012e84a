//! End-to-end `/posts` behavior over both storage backends

use std::sync::Arc;

use axum::{
	body::Body,
	http::{header, Method, Request, StatusCode},
	Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use travelog_core::{
	infra::db::Database,
	repository::{FilePostRepository, MemoryStore, SqlPostRepository},
};
use travelog_server::{create_router, AppState};

fn memory_app() -> Router {
	let posts = FilePostRepository::new(MemoryStore::new());
	create_router(AppState::new(Arc::new(posts)))
}

async fn sqlite_app() -> (TempDir, Router) {
	let temp_dir = TempDir::new().unwrap();
	let db = Database::create(&temp_dir.path().join("travelog.db"))
		.await
		.unwrap();
	db.migrate().await.unwrap();

	let app = create_router(AppState::new(Arc::new(SqlPostRepository::new(db))));
	(temp_dir, app)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
	let builder = Request::builder().method(method).uri(uri);
	let request = match body {
		Some(payload) => builder
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(serde_json::to_vec(&payload).unwrap()))
			.unwrap(),
		None => builder.body(Body::empty()).unwrap(),
	};

	let response = app.clone().oneshot(request).await.unwrap();
	let status = response.status();
	let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
		.await
		.unwrap();

	let parsed = serde_json::from_slice(&bytes)
		.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
	(status, parsed)
}

fn roma() -> Value {
	json!({
		"title": "  Roma ",
		"locality": "Roma",
		"album": ["a.jpg", "b.jpg"],
		"description": "Weekend",
		"company": ["Mario", "Luigi"],
		"initialDate": "01/05/2024",
		"finalDate": "05/05/2024"
	})
}

/// Full create, read, update, delete cycle; shared by both backends.
async fn crud_cycle(app: &Router) {
	let (status, body) = send(app, Method::POST, "/posts", Some(roma())).await;
	assert_eq!(status, StatusCode::CREATED);
	let created = body["data"].clone();
	assert_eq!(created["id"], 1);
	assert_eq!(created["title"], "Roma");
	assert_eq!(created["initialDate"], "01/05/2024");
	assert_eq!(created["finalDate"], "05/05/2024");
	assert_eq!(created["album"], json!(["a.jpg", "b.jpg"]));
	assert_eq!(created["company"], json!(["Mario", "Luigi"]));

	let (status, body) = send(app, Method::GET, "/posts/1", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"], created);

	let (status, body) = send(
		app,
		Method::PATCH,
		"/posts/1",
		Some(json!({ "locality": " Napoli ", "company": [] })),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	let updated = body["data"].clone();
	assert_eq!(updated["locality"], "Napoli");
	assert_eq!(updated["title"], "Roma");
	assert_eq!(updated["album"], json!(["a.jpg", "b.jpg"]));
	assert_eq!(updated["company"], json!([]));
	assert_eq!(updated["createdAt"], created["createdAt"]);

	let (status, body) = send(app, Method::GET, "/posts", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"], json!([updated.clone()]));

	let (status, body) = send(app, Method::DELETE, "/posts/1", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"], updated);

	let (status, body) = send(app, Method::GET, "/posts", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn crud_over_memory_store() {
	crud_cycle(&memory_app()).await;
}

#[tokio::test]
async fn crud_over_sqlite() {
	let (_temp, app) = sqlite_app().await;
	crud_cycle(&app).await;
}

#[tokio::test]
async fn health_check() {
	let (status, body) = send(&memory_app(), Method::GET, "/health", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!("OK"));
}

#[tokio::test]
async fn unknown_ids_are_404_without_side_effects() {
	let (_temp, app) = sqlite_app().await;
	send(&app, Method::POST, "/posts", Some(roma())).await;

	for method in [Method::GET, Method::DELETE] {
		let (status, body) = send(&app, method, "/posts/42", None).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(
			body,
			json!({
				"error": { "type": "client error", "message": "Viaggio non trovato" },
				"details": null
			})
		);
	}

	let (status, _) = send(
		&app,
		Method::PATCH,
		"/posts/42",
		Some(json!({ "title": "Parigi" })),
	)
	.await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (_, body) = send(&app, Method::GET, "/posts", None).await;
	assert_eq!(body["data"].as_array().unwrap().len(), 1);
	assert_eq!(body["data"][0]["title"], "Roma");
}

#[tokio::test]
async fn extra_fields_are_rejected() {
	let app = memory_app();
	let mut payload = roma();
	payload["extra"] = json!("nope");

	let (status, body) = send(&app, Method::POST, "/posts", Some(payload)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(
		body,
		json!({
			"error": { "type": "validation", "message": "Campi non validi" },
			"details": { "notAllowed": ["extra"] }
		})
	);

	let (_, body) = send(&app, Method::GET, "/posts", None).await;
	assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn missing_fields_are_listed() {
	let (status, body) = send(
		&memory_app(),
		Method::POST,
		"/posts",
		Some(json!({ "title": "Roma", "description": "x" })),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"]["message"], "Campi mancanti");
	assert_eq!(
		body["details"],
		json!({ "missingInputs": ["locality", "album", "company", "initialDate", "finalDate"] })
	);
}

#[tokio::test]
async fn mistyped_fields_are_listed() {
	let mut payload = roma();
	payload["title"] = json!(7);
	payload["album"] = json!("a.jpg");

	let (status, body) = send(&memory_app(), Method::POST, "/posts", Some(payload)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["details"], json!({ "invalidTypes": ["title", "album"] }));
}

#[tokio::test]
async fn malformed_dates_are_rejected() {
	let mut payload = roma();
	payload["finalDate"] = json!("2024-05-05");

	let (status, body) = send(&memory_app(), Method::POST, "/posts", Some(payload)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["details"], json!({ "invalidDates": ["finalDate"] }));
}

#[tokio::test]
async fn empty_album_is_rejected() {
	let (_temp, app) = sqlite_app().await;

	let mut payload = roma();
	payload["album"] = json!([]);
	let (status, body) = send(&app, Method::POST, "/posts", Some(payload)).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(
		body["error"]["message"],
		"Al viaggio deve essere associato almeno un elemento nell'album"
	);

	send(&app, Method::POST, "/posts", Some(roma())).await;
	let (status, _) = send(&app, Method::PATCH, "/posts/1", Some(json!({ "album": [] }))).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);

	let (_, body) = send(&app, Method::GET, "/posts/1", None).await;
	assert_eq!(body["data"]["album"], json!(["a.jpg", "b.jpg"]));
}

#[tokio::test]
async fn non_numeric_ids_are_rejected() {
	let (status, body) = send(&memory_app(), Method::GET, "/posts/abc", None).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(
		body,
		json!({
			"error": { "type": "validation", "message": "Il parametro id deve essere numerico" },
			"details": null
		})
	);
}

#[tokio::test]
async fn non_object_bodies_are_rejected() {
	let (status, body) = send(&memory_app(), Method::POST, "/posts", Some(json!([1, 2]))).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"]["type"], "validation");
	assert!(body["details"]["body"].is_string());
}

#[tokio::test]
async fn unknown_routes_fall_through_to_404() {
	let (status, body) = send(&memory_app(), Method::GET, "/nowhere", None).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["error"]["type"], "client error");
}

/// Duplicate album URLs and companions collapse to their first occurrence.
async fn duplicates_collapse(app: &Router) {
	let mut payload = roma();
	payload["album"] = json!(["a.jpg", "b.jpg", "a.jpg"]);
	payload["company"] = json!(["Mario", "Mario"]);

	let (status, body) = send(app, Method::POST, "/posts", Some(payload)).await;
	assert_eq!(status, StatusCode::CREATED);
	assert_eq!(body["data"]["album"], json!(["a.jpg", "b.jpg"]));
	assert_eq!(body["data"]["company"], json!(["Mario"]));

	let (_, fetched) = send(app, Method::GET, "/posts/1", None).await;
	assert_eq!(fetched["data"], body["data"]);

	let (status, body) = send(
		app,
		Method::PATCH,
		"/posts/1",
		Some(json!({ "album": ["c.jpg", "c.jpg", "a.jpg"] })),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["album"], json!(["c.jpg", "a.jpg"]));

	let (_, fetched) = send(app, Method::GET, "/posts/1", None).await;
	assert_eq!(fetched["data"], body["data"]);
}

#[tokio::test]
async fn duplicate_entries_collapse_over_memory_store() {
	duplicates_collapse(&memory_app()).await;
}

#[tokio::test]
async fn duplicate_entries_collapse_over_sqlite() {
	let (_temp, app) = sqlite_app().await;
	duplicates_collapse(&app).await;
}

#[tokio::test]
async fn out_of_range_ids_are_not_found() {
	let app = memory_app();
	send(&app, Method::POST, "/posts", Some(roma())).await;

	for uri in ["/posts/99999999999", "/posts/-99999999999"] {
		let (status, body) = send(&app, Method::GET, uri, None).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body["error"]["message"], "Viaggio non trovato");
	}

	let (status, _) = send(&app, Method::DELETE, "/posts/99999999999", None).await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (_, body) = send(&app, Method::GET, "/posts", None).await;
	assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
