use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use travelog_core::{
	config::{default_data_dir, AppConfig, StorageConfig},
	repository,
};
use travelog_server::{create_router, AppState};

mod utils;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Storage {
	Relational,
	File,
}

#[derive(Debug, Parser)]
#[command(name = "travelog-server", about = "Travel journal HTTP API")]
struct Args {
	/// Directory holding travelog.json and the storage files
	#[arg(long, env = "DATA_DIR")]
	data_dir: Option<PathBuf>,

	/// Port to listen on, overrides the config file
	#[arg(long, env = "PORT")]
	port: Option<u16>,

	/// Storage backend, overrides the config file
	#[arg(long, env = "TRAVELOG_STORAGE", value_enum)]
	storage: Option<Storage>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let data_dir = match args.data_dir {
		Some(dir) => dir,
		None => default_data_dir()?,
	};
	let mut config = AppConfig::load_from(&data_dir)
		.with_context(|| format!("Unable to load config from {}", data_dir.display()))?;

	if let Some(port) = args.port {
		config.port = port;
	}
	match args.storage {
		Some(Storage::Relational) if !matches!(config.storage, StorageConfig::Relational { .. }) => {
			config.storage = StorageConfig::relational();
		}
		Some(Storage::File) if !matches!(config.storage, StorageConfig::File { .. }) => {
			config.storage = StorageConfig::file();
		}
		_ => {}
	}

	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
	tracing_subscriber::fmt().with_env_filter(filter).init();

	let posts = repository::open(&config)
		.await
		.context("Unable to open post storage")?;
	let app = create_router(AppState::new(posts));

	let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
	let listener = TcpListener::bind(addr)
		.await
		.with_context(|| format!("Unable to bind {}", addr))?;
	info!("Listening on http://localhost:{}", config.port);

	axum::serve(listener, app)
		.with_graceful_shutdown(utils::shutdown_signal())
		.await
		.context("HTTP server failed")?;

	Ok(())
}
