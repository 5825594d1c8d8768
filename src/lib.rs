pub mod auth;
pub mod capture;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod models;
pub mod settings;
pub mod stats;
pub mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use auth::{commands::restore_session, AuthService};
use capture::CaptureController;
use cli::Cli;
use config::Config;
use db::Database;
use settings::SettingsStore;

const ENABLE_LOGS: bool = true;

/// Everything a command needs. Cloned handles share the same store and state.
pub struct AppState {
    pub db: Database,
    pub auth: AuthService,
    pub capture: CaptureController,
    pub settings: SettingsStore,
}

impl AppState {
    pub fn open(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("failed to create data directory {}", config.data_dir.display())
        })?;

        let db = Database::new(config.db_path())?;
        let auth = AuthService::new(db.clone());
        let capture = CaptureController::new(db.clone(), auth.clone());
        let settings = SettingsStore::new(config.settings_path())?;

        Ok(Self {
            db,
            auth,
            capture,
            settings,
        })
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(data_dir) = cli.data_dir.clone() {
        config.data_dir = data_dir;
    }

    utils::logging::init_logging(config.debug);
    log::debug!("MoliStats starting with data in {}", config.data_dir.display());

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async move {
        let state = AppState::open(&config)?;
        restore_session(&state).await.map_err(|e| anyhow::anyhow!(e))?;

        let result = cli::execute(cli.command, &state).await;
        if let Err(err) = &result {
            log_error!("Command failed: {err:#}");
        }
        result
    })
}
