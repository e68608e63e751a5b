mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use app::LaunchBoardApp;
use eframe::egui;

/// The dataset read at startup, from the working directory.
const DATASET_FILE: &str = "spacex_launch_dash.csv";

fn main() -> Result<()> {
    env_logger::init();

    // A missing or malformed dataset is fatal before the window opens.
    let dataset = data::loader::load_file(Path::new(DATASET_FILE))
        .with_context(|| format!("loading {DATASET_FILE}"))?;
    log::info!(
        "Loaded {} launch records across {} sites (payload {:.0}–{:.0} kg)",
        dataset.len(),
        dataset.sites.len(),
        dataset.payload_min,
        dataset.payload_max,
    );
    let dataset = Arc::new(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchBoardApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
