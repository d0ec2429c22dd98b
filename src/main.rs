//! Demo window for the download control.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use download_pill::config::{self, AppSettings};
use download_pill::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use download_pill::logging;
use eframe::egui;
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = load_settings();
    info!(
        time_multiplier = settings.style.time_multiplier,
        "Starting demo"
    );

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(MIN_VIEWPORT_SIZE)
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Download Pill",
        native_options,
        Box::new(move |_cc| Ok(Box::new(EguiApp::new(settings)))),
    )?;
    Ok(())
}

fn load_settings() -> AppSettings {
    match config::load_or_default() {
        Ok(settings) => settings,
        Err(err) => {
            warn!("Using default settings: {err}");
            AppSettings::default()
        }
    }
}
