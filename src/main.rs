mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use anyhow::{anyhow, Result};

use app::BikeDashboardApp;
use config::DashboardConfig;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_args(std::env::args());

    // A dataset that cannot be loaded at startup is fatal.
    let mut state = AppState::default();
    state.open(&config.data_path)?;

    eframe::run_native(
        "Bike Sharing Dashboard",
        config.native_options(),
        Box::new(|_cc| Ok(Box::new(BikeDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
