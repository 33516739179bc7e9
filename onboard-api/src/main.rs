//! onboard-api - Employee onboarding service
//!
//! Accepts the onboarding form at POST /api/onboarding and stores each
//! submission as one employee row.

use anyhow::Result;
use clap::Parser;
use onboard_common::config::{
    default_config_path, load_toml_config, ConfigOverrides, RootFolderInitializer, ServiceConfig,
    TomlConfig,
};
use onboard_common::db::init_database;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use onboard_api::blob::BlobStore;
use onboard_api::db::SqliteRecordStore;
use onboard_api::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "onboard-api", version, about = "Employee onboarding service")]
struct Args {
    /// Folder holding onboard.db and uploads/ (overrides ONBOARD_ROOT_FOLDER)
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Listen address
    #[arg(long, env = "ONBOARD_BIND")]
    bind: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "ONBOARD_LOG_LEVEL")]
    log_level: Option<String>,

    /// TOML config file (defaults to ~/.config/onboard/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts; its outcome is logged below
    // once the subscriber is installed
    let config_path = args.config.clone().or_else(default_config_path);
    let toml_result = config_path.as_deref().map(load_toml_config);
    let toml = match &toml_result {
        Some(Ok(config)) => config.clone(),
        _ => TomlConfig::default(),
    };

    let overrides = ConfigOverrides {
        root_folder: args.root_folder,
        bind_address: args.bind,
        log_level: args.log_level,
    };
    let config = ServiceConfig::resolve(overrides, &toml);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "Starting onboard-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match (&config_path, &toml_result) {
        (Some(path), Some(Ok(_))) => info!("Loaded config file: {}", path.display()),
        (_, Some(Err(e))) => warn!("{} (continuing with defaults)", e),
        _ => info!("No config file found, using defaults"),
    }
    info!(
        "Root folder: {} (from {})",
        config.root_folder.display(),
        config.root_folder_source
    );

    let initializer = RootFolderInitializer::new(config.root_folder.clone());
    initializer.ensure_directory_exists()?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let uploads = initializer.uploads_path();
    info!("Uploads directory: {}", uploads.display());

    let state = AppState::new(
        Arc::new(SqliteRecordStore::new(pool)),
        BlobStore::new(uploads),
        config.max_upload_bytes,
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("onboard-api listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
