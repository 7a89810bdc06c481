//! shelf-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store once, and serves the catalog API over HTTP.
//!
//! # Seeding
//!
//! To replace the store contents with the built-in fixture and exit:
//!
//! ```
//! cargo run -p shelf-server --bin server -- --seed
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use shelf_server::ServerConfig;
use shelf_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Shelf catalog server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Wipe the store, load the fixture catalog, print the report and exit.
  #[arg(long)]
  seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SHELF"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: seed and exit.
  if cli.seed {
    let report = shelf_core::seed::seed(&store)
      .await
      .context("failed to seed store")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  let app = shelf_server::router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}/api/graphql");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
