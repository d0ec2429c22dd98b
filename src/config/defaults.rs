use egui::Color32;

pub(super) const DEFAULT_TITLE_SIZE: f32 = 18.0;
pub(super) const DEFAULT_DETAIL_SIZE: f32 = 12.0;

pub(super) fn default_time_multiplier() -> f32 {
    1.0
}

pub(super) fn default_line_width() -> f32 {
    2.0
}

pub(super) fn default_main_color() -> Color32 {
    Color32::from_rgb(217, 217, 217)
}

pub(super) fn default_downloading_color() -> Color32 {
    Color32::from_rgb(0, 0, 255)
}

pub(super) fn default_highlight_color() -> Color32 {
    Color32::WHITE
}

pub(super) fn default_title_color() -> Color32 {
    Color32::from_rgb(0, 0, 255)
}

pub(super) fn default_detail_color() -> Color32 {
    Color32::from_rgb(170, 170, 170)
}

pub(super) fn default_disabled_opacity() -> f32 {
    0.4
}

pub(super) fn default_pending_delay_secs() -> f32 {
    2.5
}

pub(super) fn default_progress_step() -> f32 {
    0.2
}

pub(super) fn default_progress_interval_secs() -> f32 {
    1.0
}

pub(super) fn clamp_time_multiplier(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default_time_multiplier()
    }
}

pub(super) fn clamp_line_width(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { default_line_width() }
}

pub(super) fn clamp_opacity(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        default_disabled_opacity()
    }
}

pub(super) fn clamp_seconds(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

pub(super) fn clamp_progress_step(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value.min(1.0)
    } else {
        default_progress_step()
    }
}
