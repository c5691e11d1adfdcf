mod app;
mod cli;
mod color;
mod state;
mod ui;

use anyhow::Context;
use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = cli::Cli::parse();
    let config = cli
        .resolve_config()
        .context("loading dashboard configuration")?;
    log::debug!("Resolved config: {config:?}");

    let mut state = AppState::new(config.load_options(), config.group_by, config.title.clone());
    // A missing file is not fatal: the window opens empty with the error in the status line.
    state.load_path(&config.data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Foreclosures Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
