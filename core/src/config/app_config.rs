//! `travelog.json`, the persisted server settings

use super::Migrate;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::{
	fs,
	path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "travelog.json";
const DEFAULT_PORT: u16 = 3000;

/// Where travel posts are persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
	/// SQLite database, relative paths resolve against the data directory
	Relational { database: PathBuf },
	/// Single JSON array file
	File { posts_file: PathBuf },
}

impl StorageConfig {
	pub fn relational() -> Self {
		Self::Relational {
			database: PathBuf::from("travelog.db"),
		}
	}

	pub fn file() -> Self {
		Self::File {
			posts_file: PathBuf::from("posts.json"),
		}
	}
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self::relational()
	}
}

/// Server settings, overridable from the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
	pub version: u32,

	/// Holds this file and any relative storage paths
	pub data_dir: PathBuf,

	/// Default tracing filter, overridden by `RUST_LOG`
	pub log_level: String,

	pub port: u16,

	pub storage: StorageConfig,
}

impl AppConfig {
	/// Fresh configuration rooted at `data_dir`
	pub fn new(data_dir: PathBuf) -> Self {
		Self {
			version: Self::target_version(),
			data_dir,
			log_level: "info".into(),
			port: DEFAULT_PORT,
			storage: StorageConfig::default(),
		}
	}

	/// Read `travelog.json` from `data_dir`.
	///
	/// A missing file is replaced by a freshly written default; an outdated one is
	/// upgraded and written back.
	pub fn load_from(data_dir: &Path) -> Result<Self> {
		let path = data_dir.join(CONFIG_FILE);

		if !path.exists() {
			warn!("{:?} not found, writing defaults", path);
			let config = Self::new(data_dir.to_path_buf());
			config.save()?;
			return Ok(config);
		}

		let raw = fs::read_to_string(&path)?;
		let mut config: Self = serde_json::from_str(&raw)?;
		debug!("Read config v{} from {:?}", config.version, path);

		if config.needs_migration() {
			info!(
				from = config.version,
				to = Self::target_version(),
				"Upgrading config schema"
			);
			config.migrate()?;
			config.save()?;
		}

		Ok(config)
	}

	/// Write the config back to `<data_dir>/travelog.json`
	pub fn save(&self) -> Result<()> {
		fs::create_dir_all(&self.data_dir)?;

		let path = self.data_dir.join(CONFIG_FILE);
		fs::write(&path, serde_json::to_string_pretty(self)?)?;
		debug!("Wrote config to {:?}", path);
		Ok(())
	}

	/// Storage paths are relative to the data directory unless absolute
	pub fn resolve(&self, path: &Path) -> PathBuf {
		if path.is_absolute() {
			path.to_path_buf()
		} else {
			self.data_dir.join(path)
		}
	}
}

impl Migrate for AppConfig {
	fn current_version(&self) -> u32 {
		self.version
	}

	fn target_version() -> u32 {
		1
	}

	fn migrate(&mut self) -> Result<()> {
		match self.version {
			0 => {
				self.version = 1;
				Ok(())
			}
			1 => Ok(()),
			v => bail!("travelog.json has unsupported version {}", v),
		}
	}
}
