//! Shared state types for the demo UI.

use std::collections::VecDeque;

use egui::Color32;

use crate::button::DownloadState;
use crate::egui_app::ui::style;

/// Entries kept in the activity list.
pub const ACTIVITY_CAPACITY: usize = 12;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub activity: ActivityLog,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            activity: ActivityLog::default(),
        }
    }
}

/// Status badge and text shown in the bottom bar.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self::for_state(DownloadState::None, 0.0)
    }

    pub fn for_state(state: DownloadState, progress: f32) -> Self {
        let palette = style::palette();
        let (badge_label, badge_color, text) = match state {
            DownloadState::None => (
                "Idle",
                palette.text_muted,
                "Tap the control to start".to_string(),
            ),
            DownloadState::Pending => (
                "Pending",
                palette.warning,
                "Waiting for the download".to_string(),
            ),
            DownloadState::Downloading => (
                "Downloading",
                palette.accent_ice,
                format!("{:.0}% downloaded", progress * 100.0),
            ),
            DownloadState::Done => ("Done", palette.success, "Tap to open".to_string()),
        };
        Self {
            text,
            badge_label: badge_label.to_string(),
            badge_color,
        }
    }
}

/// Most recent notifications, newest last.
#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<String>,
}

impl ActivityLog {
    pub fn push(&mut self, entry: impl Into<String>) {
        if self.entries.len() == ACTIVITY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_log_drops_oldest_entries() {
        let mut log = ActivityLog::default();
        for idx in 0..ACTIVITY_CAPACITY + 3 {
            log.push(format!("entry {idx}"));
        }
        assert_eq!(log.len(), ACTIVITY_CAPACITY);
        assert_eq!(log.iter().next(), Some("entry 3"));
        assert_eq!(log.last(), Some("entry 14"));
    }

    #[test]
    fn downloading_status_shows_percentage() {
        let status = StatusBarState::for_state(DownloadState::Downloading, 0.4);
        assert_eq!(status.text, "40% downloaded");
        assert_eq!(status.badge_label, "Downloading");
    }
}
