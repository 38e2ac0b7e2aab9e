pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::model::ViewSelection;
use crate::core::rank::{Ranker, SortState};
use crate::providers::{HttpSnapshotProvider, SnapshotProvider};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// The views the CLI can render from one snapshot fetch.
pub enum AppCommand {
    /// Aggregated cross-fund change view.
    Changes { sort: SortState },
    /// Detail view for one fund: its changes and full holdings.
    Fund { fund_id: String, sort: SortState },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("ETF holdings tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let ranker = Ranker::new(&config.locale)?;
    let provider = HttpSnapshotProvider::new(
        &config.backend.base_url,
        config.fetch.retries,
        config.fetch.retry_delay_ms,
    );

    let spinner = cli::ui::new_fetch_spinner("Fetching latest holdings comparison...");
    let snapshot = provider.fetch_snapshot().await;
    spinner.finish_and_clear();
    let snapshot = snapshot.context(
        "Could not reach the backend. Check that it is running, then retry",
    )?;

    let (view, sort) = match command {
        AppCommand::Changes { sort } => (ViewSelection::Aggregated, sort),
        AppCommand::Fund { fund_id, sort } => (ViewSelection::Fund(fund_id), sort),
    };

    match view {
        ViewSelection::Aggregated => cli::changes::run(&snapshot, &ranker, &sort),
        ViewSelection::Fund(fund_id) => cli::fund::run(&snapshot, &fund_id, &ranker, &sort),
    }
}
