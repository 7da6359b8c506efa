mod app;
mod color;
mod config;
mod data;
mod error;
mod projection;
mod reactive;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{anyhow, Context};
use app::WorldIndicatorsApp;
use config::Config;
use data::filter::FilterSelection;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let path = config.data_path()?;
    let table = data::loader::load_file(&path)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", path.display()))
        .with_context(|| format!("loading {}", path.display()))?;

    // Loaded once; every recomputation reads this shared handle.
    let table = Arc::new(table);
    let state = AppState::new(table, FilterSelection::default());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "World Indicators",
        options,
        Box::new(move |_cc| Ok(Box::new(WorldIndicatorsApp::new(state)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
