//! Persisted settings: the control's style and the demo's simulated timings.

mod defaults;
mod errors;
mod io;
mod types;

pub use errors::ConfigError;
pub use io::{CONFIG_FILE_NAME, config_path, load_from, load_or_default, save_to_path};
pub use types::{AppSettings, ButtonStyle, DemoSettings, FontSpec, LabelStyle};
