//! The download control.
//!
//! [`DownloadButton`] owns the two state dimensions, interprets the actions
//! produced by the transition policy against an [`AnimationDriver`], and
//! exposes a [`ButtonFrame`] snapshot for renderers. Calls whose
//! preconditions do not hold are ignored.

mod chain;
mod frame;
mod machine;
mod observer;
mod state;


pub use chain::Step;
pub use frame::{ButtonFrame, LabelFrame, LabelVariant, StrokeFrame};
pub use observer::{ButtonEvent, ButtonId, DownloadObserver, EventQueue};
pub use state::{AnimationPhase, DownloadState};

use std::time::Duration;

use egui::{Align2, Rect, pos2};
use tracing::{debug, trace};

use crate::animation::{
    AnimationDriver, Easing, Layer, Property, Target, Timeline, Transaction, Transition, Value,
};
use crate::config::{ButtonStyle, LabelStyle};
use crate::geometry::{self, StrokePath};

use chain::{
    BORDER_END, PROGRESS_COLOR, PROGRESS_END, PROGRESS_START, Presentation, SPINNER_END,
    SPINNER_ROTATION, SPINNER_START, StepContext,
};
use frame::DETAIL_GAP;
use machine::{Action, Event, Notification, Snapshot};

const BACKGROUND_FADE_SECS: f64 = 0.1;
const LABEL_FADE_SECS: f64 = 0.1;
const ENABLE_FADE_SECS: f64 = 0.2;
/// Distance between sampled points of a trimmed stroke.
const STROKE_SPACING: f32 = 1.5;

const BORDER_START: Target = Target::new(Layer::Border, Property::StrokeStart);
const BORDER_COLOR: Target = Target::new(Layer::Border, Property::StrokeColor);
const SPINNER_COLOR: Target = Target::new(Layer::Spinner, Property::StrokeColor);
const BACKGROUND_FILL: Target = Target::new(Layer::Background, Property::Fill);
const LABEL_OPACITY: Target = Target::new(Layer::Labels, Property::Opacity);
const CONTROL_OPACITY: Target = Target::new(Layer::Control, Property::Opacity);

/// Pill-shaped download control driven by caller-reported progress.
pub struct DownloadButton<D: AnimationDriver = Timeline> {
    id: ButtonId,
    style: ButtonStyle,
    driver: D,
    observer: Option<Box<dyn DownloadObserver>>,
    state: DownloadState,
    phase: AnimationPhase,
    interrupted: bool,
    enabled: bool,
    committed_progress: f32,
    variant: LabelVariant,
    bounds: Rect,
    pill: StrokePath,
    pill_reversed: StrokePath,
    circle: StrokePath,
    border_reversed: bool,
}

impl DownloadButton<Timeline> {
    /// Control animated by the built-in [`Timeline`].
    pub fn new(style: ButtonStyle) -> Self {
        Self::with_driver(style, Timeline::new())
    }
}

impl<D: AnimationDriver> DownloadButton<D> {
    pub fn with_driver(style: ButtonStyle, driver: D) -> Self {
        let mut button = Self {
            id: ButtonId::default(),
            style: style.normalized(),
            driver,
            observer: None,
            state: DownloadState::None,
            phase: AnimationPhase::None,
            interrupted: false,
            enabled: true,
            committed_progress: 0.0,
            variant: LabelVariant::Normal,
            bounds: Rect::ZERO,
            pill: StrokePath::default(),
            pill_reversed: StrokePath::default(),
            circle: StrokePath::default(),
            border_reversed: false,
        };
        button.install_resting_values();
        button
    }

    pub fn with_id(mut self, id: ButtonId) -> Self {
        self.id = id;
        self
    }

    /// Replace the observer. Notifications fire synchronously.
    pub fn set_observer(&mut self, observer: impl DownloadObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    pub fn state(&self) -> DownloadState {
        self.state
    }

    /// Current choreography phase; read-only diagnostics.
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Last progress value accepted and not yet reset.
    pub fn progress(&self) -> f32 {
        self.committed_progress
    }

    pub fn label_variant(&self) -> LabelVariant {
        self.variant
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// True while any transition is running or a completion is queued.
    pub fn is_animating(&self) -> bool {
        !self.driver.is_idle()
    }

    /// Recompute both outlines for new bounds.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.pill = geometry::pill_path(bounds, self.style.line_width);
        self.pill_reversed = self.pill.reversed();
        self.circle = geometry::circle_path(bounds);
    }

    /// Cross-fade the whole control; a disabled control ignores pointers.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        let target = if enabled {
            1.0
        } else {
            self.style.disabled_opacity
        };
        let from = self.driver.presented(CONTROL_OPACITY).scalar();
        self.driver.set_model(CONTROL_OPACITY, Value::Scalar(target));
        self.driver.clear(Layer::Control);
        self.driver.commit(Transaction::new().with(Transition::new(
            CONTROL_OPACITY,
            from,
            target,
            ENABLE_FADE_SECS * self.time_scale(),
            Easing::EaseOut,
        )));
        debug!(button = self.id.0, enabled, "Enabled changed");
    }

    /// Begin the forward chain from rest.
    pub fn request_start(&mut self) {
        self.dispatch(Event::Start);
    }

    /// The host's download actually began; stop spinning and wait for progress.
    pub fn notify_download_started(&mut self) {
        self.dispatch(Event::DownloadStarted);
    }

    /// Report progress as a fraction; values are clamped to 0.0-1.0.
    ///
    /// Reaching 1.0 finishes the download once the fill animation ends.
    pub fn notify_progress(&mut self, value: f32) {
        self.dispatch(Event::Progress(value));
    }

    /// Report progress as a percentage (0-100).
    pub fn notify_progress_percent(&mut self, percent: impl Into<f64>) {
        self.notify_progress((percent.into() / 100.0) as f32);
    }

    /// Unwind whatever forward phase is running back to rest.
    pub fn request_cancel(&mut self) {
        self.dispatch(Event::Cancel);
    }

    /// Return a finished control to rest without animation.
    pub fn reset(&mut self) {
        self.dispatch(Event::Reset);
    }

    /// Show the finished state immediately, e.g. for already downloaded items.
    pub fn set_downloaded(&mut self) {
        self.dispatch(Event::SetDownloaded);
    }

    pub fn pointer_down(&mut self) {
        self.dispatch(Event::PointerDown);
    }

    pub fn pointer_up(&mut self) {
        self.dispatch(Event::PointerUp);
    }

    /// The pointer left the control before release.
    pub fn pointer_cancelled(&mut self) {
        self.dispatch(Event::PointerCancelled);
    }

    /// Advance the animation clock and run whatever chain steps finished.
    pub fn tick(&mut self, dt: Duration) {
        self.driver.advance(dt.as_secs_f64());
        loop {
            let finished = self.driver.drain_finished();
            if finished.is_empty() {
                break;
            }
            for step in finished {
                trace!(button = self.id.0, ?step, "Step finished");
                self.dispatch(Event::Finished(step));
            }
        }
    }

    /// Snapshot of what is currently on screen.
    pub fn frame(&self) -> ButtonFrame {
        let center = self.bounds.center();
        let border_path = if self.border_reversed {
            &self.pill_reversed
        } else {
            &self.pill
        };
        let border = StrokeFrame {
            points: border_path.trimmed(
                self.scalar(BORDER_START),
                self.scalar(BORDER_END),
                STROKE_SPACING,
            ),
            color: self.driver.presented(BORDER_COLOR).color(),
            width: self.style.line_width,
        };
        let mut spinner_points = self.circle.trimmed(
            self.scalar(SPINNER_START),
            self.scalar(SPINNER_END),
            STROKE_SPACING,
        );
        geometry::rotate_points(&mut spinner_points, center, self.scalar(SPINNER_ROTATION));
        let spinner = StrokeFrame {
            points: spinner_points,
            color: self.driver.presented(SPINNER_COLOR).color(),
            width: self.style.line_width,
        };
        let progress = StrokeFrame {
            points: self.circle.trimmed(
                self.scalar(PROGRESS_START),
                self.scalar(PROGRESS_END),
                STROKE_SPACING,
            ),
            color: self.driver.presented(PROGRESS_COLOR).color(),
            width: self.style.progress_line_width,
        };
        let (labels, label_opacity) = match self.variant {
            LabelVariant::Normal => (&self.style.normal, self.scalar(LABEL_OPACITY)),
            LabelVariant::Done => (&self.style.done, 1.0),
        };
        ButtonFrame {
            bounds: self.bounds,
            corner_radius: geometry::corner_radius(self.bounds),
            background: self.driver.presented(BACKGROUND_FILL).color(),
            opacity: self.scalar(CONTROL_OPACITY).clamp(0.0, 1.0),
            border,
            spinner,
            progress,
            variant: self.variant,
            labels: self.label_frames(labels, label_opacity.clamp(0.0, 1.0)),
        }
    }

    fn label_frames(&self, style: &LabelStyle, opacity: f32) -> Vec<LabelFrame> {
        let center = self.bounds.center();
        let mut labels = Vec::with_capacity(2);
        if !style.title.is_empty() {
            labels.push(LabelFrame {
                text: style.title.clone(),
                color: style.title_color.gamma_multiply(opacity),
                font: style.title_font.font_id(),
                anchor: center,
                align: Align2::CENTER_CENTER,
            });
        }
        if !style.detail.is_empty() {
            labels.push(LabelFrame {
                text: style.detail.clone(),
                color: style.detail_color.gamma_multiply(opacity),
                font: style.detail_font.font_id(),
                anchor: pos2(center.x, self.bounds.max.y + DETAIL_GAP),
                align: Align2::CENTER_TOP,
            });
        }
        labels
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            phase: self.phase,
            interrupted: self.interrupted,
            enabled: self.enabled,
        }
    }

    fn scalar(&self, target: Target) -> f32 {
        self.driver.presented(target).scalar()
    }

    fn time_scale(&self) -> f64 {
        f64::from(self.style.time_multiplier)
    }

    fn presentation(&self) -> Presentation {
        Presentation {
            rotation: chain::normalize_angle(self.scalar(SPINNER_ROTATION)),
            border_end: self.scalar(BORDER_END),
            spinner_end: self.scalar(SPINNER_END),
            progress_end: self.scalar(PROGRESS_END),
            background: self.driver.presented(BACKGROUND_FILL).color(),
            label_opacity: self.scalar(LABEL_OPACITY),
        }
    }

    fn dispatch(&mut self, event: Event) {
        let actions = machine::transition(&self.snapshot(), event);
        if actions.is_empty() {
            trace!(
                button = self.id.0,
                ?event,
                state = ?self.state,
                phase = ?self.phase,
                interrupted = self.interrupted,
                "Ignored"
            );
            return;
        }
        // Start values come from what was on screen before this event.
        let presented = self.presentation();
        for action in actions {
            self.apply(action, &presented);
        }
    }

    fn apply(&mut self, action: Action, presented: &Presentation) {
        match action {
            Action::EnterPhase(phase) => {
                debug!(button = self.id.0, from = ?self.phase, to = ?phase, "Phase");
                self.phase = phase;
                self.apply_phase_values(phase);
            }
            Action::Arm(step) => self.arm(step, presented),
            Action::SetState(state) => self.set_state(state),
            Action::SetInterrupted(interrupted) => self.interrupted = interrupted,
            Action::CommitProgress(value) => self.committed_progress = value,
            Action::Highlight(highlight) => self.fade_background(highlight, presented),
            Action::ShowLabels(visible) => self.fade_labels(visible, presented),
            Action::StopStrokes => {
                for layer in [Layer::Border, Layer::Spinner, Layer::Progress] {
                    self.driver.clear(layer);
                }
            }
            Action::Notify(notification) => self.notify(notification),
        }
    }

    fn arm(&mut self, step: Step, presented: &Presentation) {
        let plan = step.plan(&StepContext {
            style: &self.style,
            presented,
            committed_progress: self.committed_progress,
        });
        for layer in plan.clear {
            self.driver.clear(*layer);
        }
        for (target, value) in plan.models {
            self.driver.set_model(target, value);
        }
        trace!(button = self.id.0, ?step, "Arming");
        self.driver.commit(plan.transaction);
    }

    fn set_state(&mut self, state: DownloadState) {
        if state == self.state {
            return;
        }
        debug!(button = self.id.0, from = ?self.state, to = ?state, "State");
        self.state = state;
        match state {
            DownloadState::None => self.variant = LabelVariant::Normal,
            DownloadState::Done => self.variant = LabelVariant::Done,
            DownloadState::Pending | DownloadState::Downloading => {}
        }
        let id = self.id;
        if let Some(observer) = self.observer.as_mut() {
            observer.state_changed(state, id);
        }
    }

    fn notify(&mut self, notification: Notification) {
        let id = self.id;
        debug!(button = id.0, ?notification, "Notify");
        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        match notification {
            Notification::OpenRequested => observer.open_requested(id),
            Notification::CancelRequested => observer.cancel_requested(id),
        }
    }

    fn fade_background(&mut self, highlight: bool, presented: &Presentation) {
        let target = if highlight {
            self.style.highlight_color
        } else {
            self.style.main_color
        };
        self.driver.set_model(BACKGROUND_FILL, Value::Color(target));
        self.driver.clear(Layer::Background);
        self.driver.commit(Transaction::new().with(Transition::new(
            BACKGROUND_FILL,
            presented.background,
            target,
            BACKGROUND_FADE_SECS * self.time_scale(),
            Easing::EaseOut,
        )));
    }

    fn fade_labels(&mut self, visible: bool, presented: &Presentation) {
        let target = if visible { 1.0 } else { 0.0 };
        self.driver.set_model(LABEL_OPACITY, Value::Scalar(target));
        self.driver.clear(Layer::Labels);
        self.driver.commit(Transaction::new().with(Transition::new(
            LABEL_OPACITY,
            presented.label_opacity,
            target,
            LABEL_FADE_SECS * self.time_scale(),
            Easing::EaseOut,
        )));
    }

    fn set_model(&mut self, target: Target, value: impl Into<Value>) {
        self.driver.set_model(target, value.into());
    }

    fn install_resting_values(&mut self) {
        let main = self.style.main_color;
        self.set_model(BACKGROUND_FILL, main);
        self.set_model(CONTROL_OPACITY, 1.0);
        self.set_model(LABEL_OPACITY, 1.0);
        self.set_model(BORDER_START, 0.0);
        self.set_model(BORDER_END, 1.0);
        self.set_model(BORDER_COLOR, main);
        self.set_model(SPINNER_START, 0.0);
        self.set_model(SPINNER_END, 0.0);
        self.set_model(SPINNER_COLOR, main);
        self.set_model(SPINNER_ROTATION, 0.0);
        self.set_model(PROGRESS_START, 0.0);
        self.set_model(PROGRESS_END, 0.0);
        self.set_model(PROGRESS_COLOR, self.style.downloading_color);
    }

    /// Starting layer values of each phase, written before anything is armed.
    fn apply_phase_values(&mut self, phase: AnimationPhase) {
        let main = self.style.main_color;
        match phase {
            AnimationPhase::None => {
                self.border_reversed = false;
                self.set_model(BORDER_START, 0.0);
                self.set_model(BORDER_END, 1.0);
                self.set_model(PROGRESS_START, 0.0);
                self.set_model(PROGRESS_END, 0.0);
            }
            AnimationPhase::BorderToCircle => {
                self.border_reversed = false;
                self.set_model(BORDER_START, 0.0);
                self.set_model(BORDER_END, 0.0);
                self.set_model(BORDER_COLOR, main);
                self.set_model(SPINNER_START, 0.0);
                self.set_model(SPINNER_END, chain::SPINNER_ARC);
                self.set_model(SPINNER_COLOR, main);
            }
            AnimationPhase::BorderToCircleReverse => {
                self.set_model(BORDER_START, 0.0);
                self.set_model(BORDER_END, 1.0);
                self.set_model(BORDER_COLOR, main);
                self.set_model(SPINNER_START, 0.0);
                self.set_model(SPINNER_END, 0.0);
                self.set_model(SPINNER_COLOR, main);
            }
            AnimationPhase::RotateToEnd | AnimationPhase::DownloadingReverse => {
                self.set_model(PROGRESS_START, 0.0);
                self.set_model(PROGRESS_END, 0.0);
                self.set_model(SPINNER_START, 0.0);
                self.set_model(SPINNER_END, 1.0);
            }
            AnimationPhase::Downloading => {
                self.set_model(PROGRESS_COLOR, self.style.downloading_color);
            }
            AnimationPhase::Done => {
                self.border_reversed = true;
                self.set_model(BORDER_START, 0.0);
                self.set_model(BORDER_END, 1.0);
                self.set_model(SPINNER_START, 0.0);
                self.set_model(SPINNER_END, 0.0);
                self.set_model(PROGRESS_START, 1.0);
                self.set_model(PROGRESS_END, 1.0);
            }
            AnimationPhase::CircleRotation | AnimationPhase::CircleRotationReverse => {}
        }
    }
}
