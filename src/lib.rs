//! Library exports for the download button core, reused by the demo, tests
//! and benchmarks.
/// Animation driver abstraction and the built-in timeline.
pub mod animation;
/// Application directory helpers.
pub mod app_dirs;
/// The download control and its state machine.
pub mod button;
/// Persistent style and demo settings.
pub mod config;
/// Shared egui UI modules for the demo window.
pub mod egui_app;
/// Stroke paths for the pill outline and the progress circle.
pub mod geometry;
/// Logging setup.
pub mod logging;

pub use animation::{AnimationDriver, Easing, Timeline};
pub use button::{
    AnimationPhase, ButtonEvent, ButtonFrame, ButtonId, DownloadButton, DownloadObserver,
    DownloadState, EventQueue, LabelVariant,
};
pub use config::ButtonStyle;
