//! Travel post repositories
//!
//! [`PostRepository`] is the contract the HTTP handlers program against. Two backends
//! implement it: [`SqlPostRepository`] normalises posts across four SQLite tables, and
//! [`FilePostRepository`] keeps the whole collection in one JSON array.

use crate::config::{AppConfig, StorageConfig};
use crate::domain::post::{PostDraft, TravelPost};
use crate::error::Result;
use crate::infra::db::Database;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub mod file;
pub mod fold;
pub mod relational;

pub use file::{FilePostRepository, JsonFileStore, MemoryStore, PostStore};
pub use relational::SqlPostRepository;

#[async_trait]
pub trait PostRepository: Send + Sync {
	/// Every post, ordered by id
	async fn get_posts(&self) -> Result<Vec<TravelPost>>;

	/// `None` when no post has this id
	async fn get_post_by_id(&self, id: i32) -> Result<Option<TravelPost>>;

	/// Persist a new post and return it with its assigned id and timestamps.
	///
	/// Fails with a domain error when the album is empty.
	async fn create_post(&self, draft: PostDraft) -> Result<TravelPost>;

	/// Replace every writable field of post `id`, album and companions included.
	///
	/// Fails with a domain error when the album is empty and with `NotFound` for
	/// unknown ids.
	async fn update_post(&self, id: i32, draft: PostDraft) -> Result<TravelPost>;

	/// Remove post `id`; `NotFound` for unknown ids
	async fn delete_post(&self, id: i32) -> Result<()>;
}

/// Build the repository selected by `config.storage`
pub async fn open(config: &AppConfig) -> Result<Arc<dyn PostRepository>> {
	match &config.storage {
		StorageConfig::Relational { database } => {
			let path = config.resolve(database);
			let db = Database::create(&path).await?;
			db.migrate().await?;
			info!("Using relational storage at {:?}", path);
			Ok(Arc::new(SqlPostRepository::new(db)))
		}
		StorageConfig::File { posts_file } => {
			let path = config.resolve(posts_file);
			info!("Using JSON file storage at {:?}", path);
			Ok(Arc::new(FilePostRepository::new(JsonFileStore::new(path))))
		}
	}
}
