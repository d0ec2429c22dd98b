//! The timed links of the forward and reverse chains.
//!
//! Every step reads its start values from what is on screen when it is armed,
//! so a chain can be redirected mid-flight without visible jumps.

use std::f32::consts::{PI, TAU};

use egui::Color32;

use crate::animation::{Easing, Layer, Property, Target, Transaction, Transition, Value};
use crate::config::ButtonStyle;

pub(crate) const BORDER_TO_CIRCLE_SECS: f64 = 0.3;
pub(crate) const SPIN_TURN_SECS: f64 = 1.0;
pub(crate) const ROTATE_TO_END_SECS: f64 = 0.1;
pub(crate) const PROGRESS_SECS: f64 = 1.0;
pub(crate) const DOWNLOAD_END_SECS: f64 = 0.3;
pub(crate) const UNWIND_SECS: f64 = 0.3;
pub(crate) const ROTATION_UNWIND_SECS: f64 = 0.02;

/// Portion of the circle the spinner covers while pending.
pub(crate) const SPINNER_ARC: f32 = 0.85;

pub(crate) const BORDER_END: Target = Target::new(Layer::Border, Property::StrokeEnd);
pub(crate) const SPINNER_START: Target = Target::new(Layer::Spinner, Property::StrokeStart);
pub(crate) const SPINNER_END: Target = Target::new(Layer::Spinner, Property::StrokeEnd);
pub(crate) const SPINNER_ROTATION: Target = Target::new(Layer::Spinner, Property::Rotation);
pub(crate) const PROGRESS_START: Target = Target::new(Layer::Progress, Property::StrokeStart);
pub(crate) const PROGRESS_END: Target = Target::new(Layer::Progress, Property::StrokeEnd);
pub(crate) const PROGRESS_COLOR: Target = Target::new(Layer::Progress, Property::StrokeColor);

/// A timed link in a chain; reported back by the driver when it finishes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Pill outline shrinks while the circle stroke grows.
    BorderToCircle,
    /// Endless indeterminate spin; never finishes.
    Spin,
    /// Spin settles at the top and the circle closes.
    RotateToEnd,
    /// Progress arc fills up to `value`.
    Progress { value: f32 },
    /// Progress arc sweeps away and the pill outline returns.
    DownloadEnd,
    DownloadingReverse,
    RotationReverse,
    BorderReverse,
}

/// On-screen values captured before an event is interpreted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Presentation {
    /// Spinner rotation normalised to (-π, π].
    pub rotation: f32,
    pub border_end: f32,
    pub spinner_end: f32,
    pub progress_end: f32,
    pub background: Color32,
    pub label_opacity: f32,
}

pub(crate) struct StepContext<'a> {
    pub style: &'a ButtonStyle,
    pub presented: &'a Presentation,
    pub committed_progress: f32,
}

/// What arming a step does to the driver, in order.
#[derive(Debug, PartialEq)]
pub(crate) struct StepPlan {
    pub clear: &'static [Layer],
    pub models: Vec<(Target, Value)>,
    pub transaction: Transaction,
}

pub(crate) fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    angle.sin().atan2(angle.cos())
}

impl Step {
    pub(crate) fn plan(self, ctx: &StepContext<'_>) -> StepPlan {
        let scale = f64::from(ctx.style.time_multiplier);
        let presented = ctx.presented;
        match self {
            Step::BorderToCircle => {
                let duration = BORDER_TO_CIRCLE_SECS * scale;
                StepPlan {
                    clear: &[Layer::Border, Layer::Spinner],
                    models: Vec::new(),
                    transaction: Transaction::new()
                        .with(Transition::new(BORDER_END, 1.0, 0.0, duration, Easing::EaseOut))
                        .with(Transition::new(
                            SPINNER_END,
                            0.0,
                            SPINNER_ARC,
                            duration,
                            Easing::EaseIn,
                        ))
                        .on_finish(self),
                }
            }
            Step::Spin => StepPlan {
                clear: &[Layer::Spinner],
                models: Vec::new(),
                transaction: Transaction::new().with(
                    Transition::new(
                        SPINNER_ROTATION,
                        0.0,
                        TAU,
                        SPIN_TURN_SECS * scale,
                        Easing::Linear,
                    )
                    .repeating(),
                ),
            },
            Step::RotateToEnd => {
                let duration = ROTATE_TO_END_SECS * scale;
                StepPlan {
                    clear: &[Layer::Spinner],
                    models: Vec::new(),
                    transaction: Transaction::new()
                        .with(Transition::new(
                            SPINNER_END,
                            SPINNER_ARC,
                            1.0,
                            duration,
                            Easing::Linear,
                        ))
                        .with(Transition::new(
                            SPINNER_ROTATION,
                            presented.rotation,
                            0.0,
                            duration,
                            Easing::Linear,
                        ))
                        .on_finish(self),
                }
            }
            Step::Progress { value } => {
                let duration = PROGRESS_SECS * scale;
                let start = if ctx.committed_progress == 0.0 {
                    0.0
                } else {
                    presented.progress_end
                };
                StepPlan {
                    clear: &[Layer::Spinner, Layer::Progress],
                    models: vec![
                        (PROGRESS_END, Value::Scalar(value)),
                        (PROGRESS_START, Value::Scalar(0.0)),
                        (SPINNER_START, Value::Scalar(value)),
                    ],
                    transaction: Transaction::new()
                        .with(Transition::new(
                            PROGRESS_END,
                            start,
                            value,
                            duration,
                            Easing::Linear,
                        ))
                        .with(Transition::new(
                            SPINNER_START,
                            start,
                            value,
                            duration,
                            Easing::Linear,
                        ))
                        .on_finish(self),
                }
            }
            Step::DownloadEnd => {
                let duration = DOWNLOAD_END_SECS * scale;
                StepPlan {
                    clear: &[Layer::Border, Layer::Spinner],
                    models: Vec::new(),
                    transaction: Transaction::new()
                        .with(Transition::new(BORDER_END, 0.0, 1.0, duration, Easing::EaseIn))
                        .with(Transition::new(
                            PROGRESS_START,
                            0.0,
                            1.0,
                            duration,
                            Easing::EaseOut,
                        ))
                        .with(Transition::new(
                            PROGRESS_COLOR,
                            ctx.style.downloading_color,
                            ctx.style.main_color,
                            duration,
                            Easing::EaseOut,
                        ))
                        .on_finish(self),
                }
            }
            Step::DownloadingReverse => {
                let line_end = presented.progress_end;
                let duration = UNWIND_SECS * scale * f64::from(line_end);
                StepPlan {
                    clear: &[Layer::Spinner, Layer::Progress],
                    models: Vec::new(),
                    transaction: Transaction::new()
                        .with(Transition::new(
                            PROGRESS_END,
                            line_end,
                            0.0,
                            duration,
                            Easing::EaseIn,
                        ))
                        .with(Transition::new(
                            SPINNER_START,
                            line_end,
                            0.0,
                            duration,
                            Easing::EaseIn,
                        ))
                        .on_finish(self),
                }
            }
            Step::RotationReverse => {
                let angle = presented.rotation;
                let duration = ROTATION_UNWIND_SECS * scale * f64::from(angle / PI + 1.0);
                StepPlan {
                    clear: &[Layer::Spinner],
                    models: Vec::new(),
                    transaction: Transaction::new()
                        .with(Transition::new(
                            SPINNER_ROTATION,
                            angle,
                            0.0,
                            duration,
                            Easing::Linear,
                        ))
                        .on_finish(self),
                }
            }
            Step::BorderReverse => {
                let duration = UNWIND_SECS * scale * f64::from(presented.spinner_end);
                StepPlan {
                    clear: &[Layer::Spinner, Layer::Border],
                    models: Vec::new(),
                    transaction: Transaction::new()
                        .with(Transition::new(
                            BORDER_END,
                            presented.border_end,
                            1.0,
                            duration,
                            Easing::EaseIn,
                        ))
                        .with(Transition::new(
                            SPINNER_END,
                            presented.spinner_end,
                            0.0,
                            duration,
                            Easing::EaseOut,
                        ))
                        .on_finish(self),
                }
            }
        }
    }
}
