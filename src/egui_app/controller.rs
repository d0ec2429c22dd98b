//! Drives one control with a simulated download.
//!
//! Notifications from the control are queued and handled after each call
//! returns, so reacting to them can call back into the control.

use std::time::Duration;

use tracing::{debug, info};

use crate::button::{ButtonEvent, ButtonId, DownloadButton, DownloadState, EventQueue};
use crate::config::{AppSettings, DemoSettings};
use crate::egui_app::state::{StatusBarState, UiState};

const DEMO_BUTTON: ButtonId = ButtonId(1);

/// Progress of the fake download behind the control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Simulation {
    Idle,
    /// Control is pending; the download "starts" once `remaining` runs out.
    WaitingToStart { remaining: f32 },
    Running { progress: f32, until_next: f32 },
}

/// Maintains demo state and bridges the control to the egui UI.
pub struct DemoController {
    pub ui: UiState,
    button: DownloadButton,
    events: EventQueue,
    settings: DemoSettings,
    simulation: Simulation,
}

impl DemoController {
    pub fn new(settings: AppSettings) -> Self {
        let events = EventQueue::new();
        let mut button = DownloadButton::new(settings.style).with_id(DEMO_BUTTON);
        button.set_observer(events.clone());
        Self {
            ui: UiState::default(),
            button,
            events,
            settings: settings.demo,
            simulation: Simulation::Idle,
        }
    }

    pub fn button(&self) -> &DownloadButton {
        &self.button
    }

    /// Mutable access for the painter, which forwards pointer input.
    pub fn button_mut(&mut self) -> &mut DownloadButton {
        &mut self.button
    }

    pub fn simulation(&self) -> Simulation {
        self.simulation
    }

    pub fn toggle_enabled(&mut self) {
        let enabled = !self.button.is_enabled();
        self.button.set_enabled(enabled);
        self.ui
            .activity
            .push(if enabled { "Enabled" } else { "Disabled" });
        self.handle_events();
    }

    pub fn reset(&mut self) {
        self.simulation = Simulation::Idle;
        self.button.reset();
        self.handle_events();
    }

    pub fn start(&mut self) {
        self.button.request_start();
        self.handle_events();
    }

    pub fn set_downloaded(&mut self) {
        self.simulation = Simulation::Idle;
        self.button.set_downloaded();
        self.handle_events();
    }

    /// Handle pointer notifications queued by the painter.
    pub fn after_input(&mut self) {
        self.handle_events();
    }

    /// Advance the control's animations and the simulated download by `dt`.
    pub fn update(&mut self, dt: Duration) {
        self.button.tick(dt);
        self.handle_events();
        self.advance_simulation(dt.as_secs_f32());
        self.handle_events();
        self.ui.status =
            StatusBarState::for_state(self.button.state(), self.button.progress());
    }

    /// True while anything on screen or in the simulation is still moving.
    pub fn needs_repaint(&self) -> bool {
        self.button.is_animating() || self.simulation != Simulation::Idle
    }

    fn handle_events(&mut self) {
        loop {
            let events = self.events.drain();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.handle_event(event);
            }
        }
    }

    fn handle_event(&mut self, event: ButtonEvent) {
        debug!(?event, "Demo event");
        match event {
            ButtonEvent::StateChanged { state, .. } => {
                self.ui.activity.push(format!("State changed to {state:?}"));
                match state {
                    DownloadState::Pending => {
                        self.simulation = Simulation::WaitingToStart {
                            remaining: self.settings.pending_delay_secs,
                        };
                    }
                    DownloadState::None | DownloadState::Done => {
                        self.simulation = Simulation::Idle;
                    }
                    DownloadState::Downloading => {}
                }
            }
            ButtonEvent::OpenRequested { .. } => {
                info!("Open requested");
                self.ui.activity.push("Open requested");
            }
            ButtonEvent::CancelRequested { .. } => {
                info!("Cancel requested");
                self.ui.activity.push("Cancel requested");
                self.simulation = Simulation::Idle;
                self.button.request_cancel();
            }
        }
    }

    fn advance_simulation(&mut self, dt: f32) {
        match self.simulation {
            Simulation::Idle => {}
            Simulation::WaitingToStart { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.simulation = Simulation::WaitingToStart { remaining };
                    return;
                }
                self.button.notify_download_started();
                self.simulation = Simulation::Running {
                    progress: 0.0,
                    until_next: self.settings.progress_interval_secs,
                };
            }
            Simulation::Running {
                progress,
                until_next,
            } => {
                let until_next = until_next - dt;
                if until_next > 0.0 {
                    self.simulation = Simulation::Running {
                        progress,
                        until_next,
                    };
                    return;
                }
                let progress = (progress + self.settings.progress_step).min(1.0);
                self.button.notify_progress(progress);
                self.simulation = if progress >= 1.0 {
                    Simulation::Idle
                } else {
                    Simulation::Running {
                        progress,
                        until_next: until_next + self.settings.progress_interval_secs,
                    }
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn controller() -> DemoController {
        let mut settings = AppSettings::default();
        settings.demo = DemoSettings {
            pending_delay_secs: 0.5,
            progress_step: 0.5,
            progress_interval_secs: 1.2,
        };
        DemoController::new(settings)
    }

    fn run_for(controller: &mut DemoController, secs: f32) {
        let frames = (secs / FRAME.as_secs_f32()).ceil() as usize;
        for _ in 0..frames {
            controller.update(FRAME);
        }
    }

    #[test]
    fn simulated_download_reaches_done() {
        let mut controller = controller();
        controller.start();
        run_for(&mut controller, 0.4);
        assert!(matches!(
            controller.simulation(),
            Simulation::WaitingToStart { .. }
        ));
        run_for(&mut controller, 0.6);
        assert!(matches!(controller.simulation(), Simulation::Running { .. }));
        assert_eq!(controller.button().state(), DownloadState::Downloading);
        run_for(&mut controller, 4.0);
        assert_eq!(controller.button().state(), DownloadState::Done);
        assert_eq!(controller.simulation(), Simulation::Idle);
        assert_eq!(controller.ui.status.badge_label, "Done");
        assert!(!controller.needs_repaint());
    }

    #[test]
    fn tap_while_pending_cancels_the_simulation() {
        let mut controller = controller();
        controller.start();
        run_for(&mut controller, 0.4);
        controller.button_mut().pointer_down();
        controller.button_mut().pointer_up();
        controller.after_input();
        assert_eq!(controller.simulation(), Simulation::Idle);
        assert!(controller.button().is_interrupted());
        run_for(&mut controller, 1.0);
        assert_eq!(controller.button().state(), DownloadState::None);
        assert_eq!(
            controller.ui.activity.last(),
            Some("State changed to None")
        );
    }

    #[test]
    fn set_downloaded_then_reset_returns_to_idle() {
        let mut controller = controller();
        controller.set_downloaded();
        assert_eq!(controller.button().state(), DownloadState::Done);
        controller.reset();
        assert_eq!(controller.button().state(), DownloadState::None);
        let entries: Vec<&str> = controller.ui.activity.iter().collect();
        assert_eq!(
            entries,
            vec!["State changed to Done", "State changed to None"]
        );
    }

    #[test]
    fn toggling_enabled_is_logged() {
        let mut controller = controller();
        controller.toggle_enabled();
        assert!(!controller.button().is_enabled());
        assert_eq!(controller.ui.activity.last(), Some("Disabled"));
    }
}
