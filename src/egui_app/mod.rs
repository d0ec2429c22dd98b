//! egui front end of the demo window.

/// Simulated download wiring around a single control.
pub mod controller;
/// Plain UI state consumed by the renderer.
pub mod state;
/// eframe app and painters.
pub mod ui;
