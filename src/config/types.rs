use egui::{Color32, FontId};
use serde::{Deserialize, Serialize};

use super::defaults::{
    DEFAULT_DETAIL_SIZE, DEFAULT_TITLE_SIZE, clamp_line_width, clamp_opacity,
    clamp_progress_step, clamp_seconds, clamp_time_multiplier, default_detail_color,
    default_disabled_opacity, default_downloading_color, default_highlight_color,
    default_line_width, default_main_color, default_pending_delay_secs,
    default_progress_interval_secs, default_progress_step, default_time_multiplier,
    default_title_color,
};

/// Everything stored in `config.toml`.
///
/// Config keys (TOML): `style`, `demo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub style: ButtonStyle,
    #[serde(default)]
    pub demo: DemoSettings,
}

impl AppSettings {
    pub fn normalized(mut self) -> Self {
        self.style = self.style.normalized();
        self.demo = self.demo.normalized();
        self
    }
}

/// Visual parameters of the control, fixed at construction.
///
/// Config keys: `time_multiplier`, `line_width`, `progress_line_width`,
/// `main_color`, `downloading_color`, `highlight_color`, `disabled_opacity`,
/// `normal`, `done`. Colors are `[r, g, b, a]` arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonStyle {
    /// Scales every animation duration; values above 1.0 slow things down.
    #[serde(default = "default_time_multiplier")]
    pub time_multiplier: f32,
    /// Stroke width of the pill outline and the spinner.
    #[serde(default = "default_line_width")]
    pub line_width: f32,
    #[serde(default = "default_line_width")]
    pub progress_line_width: f32,
    /// Background, outline and spinner color.
    #[serde(default = "default_main_color")]
    pub main_color: Color32,
    /// Progress arc color.
    #[serde(default = "default_downloading_color")]
    pub downloading_color: Color32,
    /// Background color while pressed or busy.
    #[serde(default = "default_highlight_color")]
    pub highlight_color: Color32,
    #[serde(default = "default_disabled_opacity")]
    pub disabled_opacity: f32,
    #[serde(default = "LabelStyle::normal")]
    pub normal: LabelStyle,
    /// Labels shown once the download is done. Missing keys inside a
    /// present `[style.done]` table fall back to the normal defaults.
    #[serde(default = "LabelStyle::done")]
    pub done: LabelStyle,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            time_multiplier: default_time_multiplier(),
            line_width: default_line_width(),
            progress_line_width: default_line_width(),
            main_color: default_main_color(),
            downloading_color: default_downloading_color(),
            highlight_color: default_highlight_color(),
            disabled_opacity: default_disabled_opacity(),
            normal: LabelStyle::normal(),
            done: LabelStyle::done(),
        }
    }
}

impl ButtonStyle {
    /// Replace out-of-range values with usable ones.
    pub fn normalized(mut self) -> Self {
        self.time_multiplier = clamp_time_multiplier(self.time_multiplier);
        self.line_width = clamp_line_width(self.line_width);
        self.progress_line_width = clamp_line_width(self.progress_line_width);
        self.disabled_opacity = clamp_opacity(self.disabled_opacity);
        self.normal = self.normal.normalized();
        self.done = self.done.normalized();
        self
    }
}

/// Title and detail text for one label variant.
///
/// Config keys: `title`, `title_color`, `title_font`, `detail`,
/// `detail_color`, `detail_font`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub title: String,
    pub title_color: Color32,
    pub title_font: FontSpec,
    /// Secondary line drawn below the control.
    pub detail: String,
    pub detail_color: Color32,
    pub detail_font: FontSpec,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::normal()
    }
}

impl LabelStyle {
    pub fn normal() -> Self {
        Self {
            title: "GET".to_string(),
            title_color: default_title_color(),
            title_font: FontSpec::new(DEFAULT_TITLE_SIZE),
            detail: "Extra content".to_string(),
            detail_color: default_detail_color(),
            detail_font: FontSpec::new(DEFAULT_DETAIL_SIZE),
        }
    }

    pub fn done() -> Self {
        Self {
            title: "OPEN".to_string(),
            detail: String::new(),
            ..Self::normal()
        }
    }

    fn normalized(mut self) -> Self {
        self.title_font = self.title_font.normalized(DEFAULT_TITLE_SIZE);
        self.detail_font = self.detail_font.normalized(DEFAULT_DETAIL_SIZE);
        self
    }
}

/// Font size and family of a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size: f32,
    #[serde(default)]
    pub monospace: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE_SIZE)
    }
}

impl FontSpec {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            monospace: false,
        }
    }

    pub fn font_id(&self) -> FontId {
        if self.monospace {
            FontId::monospace(self.size)
        } else {
            FontId::proportional(self.size)
        }
    }

    fn normalized(mut self, fallback: f32) -> Self {
        if !self.size.is_finite() || self.size <= 0.0 {
            self.size = fallback;
        }
        self
    }
}

/// Timings of the simulated download in the demo window.
///
/// Config keys: `pending_delay_secs`, `progress_step`,
/// `progress_interval_secs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSettings {
    /// Wait between the control going pending and the download starting.
    #[serde(default = "default_pending_delay_secs")]
    pub pending_delay_secs: f32,
    /// Progress fraction added per report.
    #[serde(default = "default_progress_step")]
    pub progress_step: f32,
    #[serde(default = "default_progress_interval_secs")]
    pub progress_interval_secs: f32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            pending_delay_secs: default_pending_delay_secs(),
            progress_step: default_progress_step(),
            progress_interval_secs: default_progress_interval_secs(),
        }
    }
}

impl DemoSettings {
    pub fn normalized(mut self) -> Self {
        self.pending_delay_secs =
            clamp_seconds(self.pending_delay_secs, default_pending_delay_secs());
        self.progress_step = clamp_progress_step(self.progress_step);
        self.progress_interval_secs =
            clamp_seconds(self.progress_interval_secs, default_progress_interval_secs());
        self
    }
}
