//! SQLite storage for travel posts

use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::{path::Path, time::Duration};
use tokio::fs;
use tracing::info;

pub mod entities;
pub mod migration;

const MAX_CONNECTIONS: u32 = 10;

/// Connection pool over one SQLite file
#[derive(Clone)]
pub struct Database {
	conn: DatabaseConnection,
}

impl Database {
	/// Connect to the SQLite file at `path`, creating it and its parent directory if missing
	pub async fn create(path: &Path) -> Result<Self, DbErr> {
		if let Some(dir) = path.parent() {
			fs::create_dir_all(dir).await.map_err(|e| {
				DbErr::Custom(format!("Unable to create {}: {}", dir.display(), e))
			})?;
		}

		let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
		options
			.max_connections(MAX_CONNECTIONS)
			.min_connections(1)
			.connect_timeout(Duration::from_secs(8))
			.idle_timeout(Duration::from_secs(60))
			.sqlx_logging(false);

		let conn = sea_orm::Database::connect(options).await?;
		info!("Connected to {:?}", path);

		Ok(Self { conn })
	}

	/// Bring the schema up to date
	pub async fn migrate(&self) -> Result<(), DbErr> {
		migration::Migrator::up(&self.conn, None).await?;
		info!("Schema is up to date");
		Ok(())
	}

	pub fn conn(&self) -> &DatabaseConnection {
		&self.conn
	}
}
