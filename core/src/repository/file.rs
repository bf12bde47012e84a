//! JSON-file repository
//!
//! The whole collection is the unit of storage: every write loads the array, changes
//! it and saves it back. Writers within one process are serialised so that id
//! assignment cannot race; separate processes sharing the file can still lose updates
//! or hand out the same id.

use super::PostRepository;
use crate::domain::post::{PostDraft, TravelPost};
use crate::error::{PostError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

/// Backing storage for the whole post collection
#[async_trait]
pub trait PostStore: Send + Sync {
	async fn load(&self) -> Result<Vec<TravelPost>>;

	async fn save(&self, posts: &[TravelPost]) -> Result<()>;
}

/// Posts kept as a pretty-printed JSON array on disk
pub struct JsonFileStore {
	path: PathBuf,
}

impl JsonFileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

#[async_trait]
impl PostStore for JsonFileStore {
	/// An unreadable or corrupt file is logged and treated as an empty collection.
	async fn load(&self) -> Result<Vec<TravelPost>> {
		let json = match fs::read_to_string(&self.path).await {
			Ok(json) => json,
			Err(e) if e.kind() == ErrorKind::NotFound => {
				debug!("No posts file at {:?} yet", self.path);
				return Ok(Vec::new());
			}
			Err(e) => {
				error!("Failed to read posts file {:?}: {}", self.path, e);
				return Ok(Vec::new());
			}
		};

		match serde_json::from_str(&json) {
			Ok(posts) => Ok(posts),
			Err(e) => {
				error!("Failed to parse posts file {:?}: {}", self.path, e);
				Ok(Vec::new())
			}
		}
	}

	async fn save(&self, posts: &[TravelPost]) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).await?;
		}

		let json = serde_json::to_string_pretty(posts)?;
		fs::write(&self.path, json).await?;
		Ok(())
	}
}

/// In-process store, mostly for tests
#[derive(Default)]
pub struct MemoryStore {
	posts: RwLock<Vec<TravelPost>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl PostStore for MemoryStore {
	async fn load(&self) -> Result<Vec<TravelPost>> {
		Ok(self.posts.read().await.clone())
	}

	async fn save(&self, posts: &[TravelPost]) -> Result<()> {
		*self.posts.write().await = posts.to_vec();
		Ok(())
	}
}

/// Next id: one past the highest existing id, or 1 for an empty collection
pub fn generate_id(posts: &[TravelPost]) -> i32 {
	posts.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

pub struct FilePostRepository<S> {
	store: S,
	write_lock: Mutex<()>,
}

impl<S: PostStore> FilePostRepository<S> {
	pub fn new(store: S) -> Self {
		Self {
			store,
			write_lock: Mutex::new(()),
		}
	}
}

#[async_trait]
impl<S: PostStore> PostRepository for FilePostRepository<S> {
	async fn get_posts(&self) -> Result<Vec<TravelPost>> {
		self.store.load().await
	}

	async fn get_post_by_id(&self, id: i32) -> Result<Option<TravelPost>> {
		Ok(self.store.load().await?.into_iter().find(|p| p.id == id))
	}

	async fn create_post(&self, draft: PostDraft) -> Result<TravelPost> {
		draft.ensure_album()?;

		let _guard = self.write_lock.lock().await;
		let mut posts = self.store.load().await?;

		let post = TravelPost::from_draft(generate_id(&posts), draft, Utc::now());
		posts.push(post.clone());
		self.store.save(&posts).await?;

		info!("Created travel post {} ({:?})", post.id, post.title);
		Ok(post)
	}

	async fn update_post(&self, id: i32, draft: PostDraft) -> Result<TravelPost> {
		draft.ensure_album()?;

		let _guard = self.write_lock.lock().await;
		let mut posts = self.store.load().await?;

		let post = posts
			.iter_mut()
			.find(|p| p.id == id)
			.ok_or(PostError::NotFound)?;
		post.apply(draft, Utc::now());
		let updated = post.clone();

		self.store.save(&posts).await?;

		info!("Updated travel post {}", id);
		Ok(updated)
	}

	async fn delete_post(&self, id: i32) -> Result<()> {
		let _guard = self.write_lock.lock().await;
		let mut posts = self.store.load().await?;

		let index = posts
			.iter()
			.position(|p| p.id == id)
			.ok_or(PostError::NotFound)?;
		posts.remove(index);

		self.store.save(&posts).await?;

		info!("Deleted travel post {}", id);
		Ok(())
	}
}
