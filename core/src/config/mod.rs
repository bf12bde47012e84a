//! Server configuration

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

pub mod app_config;
pub mod migration;

pub use app_config::{AppConfig, StorageConfig};
pub use migration::Migrate;

/// `<platform data dir>/travelog`, created on first use
pub fn default_data_dir() -> Result<PathBuf> {
	let base = dirs::data_local_dir().context("no platform data directory available")?;
	let dir = base.join("travelog");
	fs::create_dir_all(&dir)
		.with_context(|| format!("Unable to create data directory {}", dir.display()))?;
	Ok(dir)
}
