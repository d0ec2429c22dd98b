#![allow(dead_code)]

pub mod config_env;

use std::time::Duration;

use download_pill::animation::AnimationDriver;
use download_pill::{
    ButtonEvent, ButtonStyle, DownloadButton, DownloadState, EventQueue, Timeline,
};
use egui::{Rect, pos2, vec2};

pub const FRAME: Duration = Duration::from_millis(16);

/// A control with bounds and a recording observer.
pub struct Harness<D: AnimationDriver = Timeline> {
    pub button: DownloadButton<D>,
    pub events: EventQueue,
}

impl Harness<Timeline> {
    pub fn new() -> Self {
        Self::with_style(ButtonStyle::default())
    }

    pub fn with_style(style: ButtonStyle) -> Self {
        Self::with_button(DownloadButton::new(style))
    }
}

impl<D: AnimationDriver> Harness<D> {
    pub fn with_button(mut button: DownloadButton<D>) -> Self {
        button.set_bounds(Rect::from_min_size(pos2(0.0, 0.0), vec2(74.0, 28.0)));
        let events = EventQueue::new();
        button.set_observer(events.clone());
        Self { button, events }
    }

    /// Tick at a 16 ms frame rate for at least `secs` seconds.
    pub fn run_for(&mut self, secs: f32) {
        let frames = (secs / FRAME.as_secs_f32()).ceil() as usize;
        for _ in 0..frames {
            self.button.tick(FRAME);
        }
    }

    /// Tick until `done` holds, giving up after `limit_secs`.
    pub fn run_until(
        &mut self,
        limit_secs: f32,
        done: impl Fn(&DownloadButton<D>) -> bool,
    ) -> bool {
        let frames = (limit_secs / FRAME.as_secs_f32()).ceil() as usize;
        for _ in 0..frames {
            if done(&self.button) {
                return true;
            }
            self.button.tick(FRAME);
        }
        done(&self.button)
    }

    /// Drain recorded notifications, keeping only state changes.
    pub fn states(&self) -> Vec<DownloadState> {
        self.events
            .drain()
            .into_iter()
            .filter_map(|event| match event {
                ButtonEvent::StateChanged { state, .. } => Some(state),
                _ => None,
            })
            .collect()
    }
}
