//! Folio - single-page portfolio with a local content admin panel
//!
//! Site copy and projects live in one JSON document that the admin panel
//! edits in place and writes through to local storage on every change.

mod app;
mod core;
mod ui;

use app::FolioApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Folio...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Folio"),
        ..Default::default()
    };

    eframe::run_native(
        "Folio",
        native_options,
        Box::new(|cc| Ok(Box::new(FolioApp::new(cc)))),
    )
}
