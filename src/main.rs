use std::path::PathBuf;

use anyhow::Result;
use eframe::egui;
use trajview::app::TrajviewApp;
use trajview::config::SessionConfig;
use trajview::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    // Optional session file; the built-in KF/UKF/SIS layout otherwise.
    let config = match std::env::args_os().nth(1) {
        Some(path) => SessionConfig::from_file(&PathBuf::from(path))?,
        None => SessionConfig::default(),
    };
    log::info!("Base directory {}", config.base_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "trajview – Filter Log Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(TrajviewApp::new(AppState::new(config))))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
