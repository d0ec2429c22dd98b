//! Property transitions for the control's drawable layers.
//!
//! The control never interpolates anything itself. It writes model values,
//! commits [`Transaction`]s, and receives the [`Step`] attached to a
//! transaction once every transition in it has run to completion.

mod easing;
mod timeline;

pub use easing::Easing;
pub use timeline::Timeline;

use egui::Color32;

use crate::button::Step;

/// Drawable parts of the control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Filled capsule behind everything else.
    Background,
    /// Pill outline.
    Border,
    /// Indeterminate circle stroke that spins while pending.
    Spinner,
    /// Determinate progress arc.
    Progress,
    /// Title and detail text of the normal label variant.
    Labels,
    /// The whole control (enabled/disabled opacity).
    Control,
}

/// Animatable properties of a [`Layer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    StrokeStart,
    StrokeEnd,
    StrokeColor,
    /// Rotation in radians around the bounds centre.
    Rotation,
    Fill,
    Opacity,
}

/// A single animatable slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    pub layer: Layer,
    pub property: Property,
}

impl Target {
    pub const fn new(layer: Layer, property: Property) -> Self {
        Self { layer, property }
    }
}

/// Value stored in or interpolated for a [`Target`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Scalar(f32),
    Color(Color32),
}

impl Value {
    /// Scalar payload, or 0.0 for colors.
    pub fn scalar(self) -> f32 {
        match self {
            Value::Scalar(value) => value,
            Value::Color(_) => 0.0,
        }
    }

    /// Color payload, or transparent for scalars.
    pub fn color(self) -> Color32 {
        match self {
            Value::Color(color) => color,
            Value::Scalar(_) => Color32::TRANSPARENT,
        }
    }

    /// Interpolate towards `to` by `t`; mismatched kinds snap at the midpoint.
    pub fn lerp(self, to: Value, t: f32) -> Value {
        match (self, to) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(a + (b - a) * t),
            (Value::Color(a), Value::Color(b)) => Value::Color(lerp_color(a, b, t)),
            _ if t < 0.5 => self,
            _ => to,
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Scalar(value)
    }
}

impl From<Color32> for Value {
    fn from(value: Color32) -> Self {
        Value::Color(value)
    }
}

fn lerp_color(from: Color32, to: Color32, t: f32) -> Color32 {
    let channel = |a: u8, b: u8| -> u8 {
        let value = a as f32 + (b as f32 - a as f32) * t;
        value.round().clamp(0.0, 255.0) as u8
    };
    Color32::from_rgba_premultiplied(
        channel(from.r(), to.r()),
        channel(from.g(), to.g()),
        channel(from.b(), to.b()),
        channel(from.a(), to.a()),
    )
}

/// Animate one target from `from` to `to` over `duration` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub target: Target,
    pub from: Value,
    pub to: Value,
    pub duration: f64,
    pub easing: Easing,
    /// Restart from `from` forever instead of finishing.
    pub repeat: bool,
}

impl Transition {
    pub fn new(
        target: Target,
        from: impl Into<Value>,
        to: impl Into<Value>,
        duration: f64,
        easing: Easing,
    ) -> Self {
        Self {
            target,
            from: from.into(),
            to: to.into(),
            duration: if duration.is_finite() {
                duration.max(0.0)
            } else {
                0.0
            },
            easing,
            repeat: false,
        }
    }

    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// Transitions armed together, reported finished as one unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transaction {
    transitions: Vec<Transition>,
    finish: Option<Step>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Report `step` once every transition in the transaction has finished.
    pub fn on_finish(mut self, step: Step) -> Self {
        self.finish = Some(step);
        self
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn finish(&self) -> Option<Step> {
        self.finish
    }

    pub(crate) fn into_parts(self) -> (Vec<Transition>, Option<Step>) {
        (self.transitions, self.finish)
    }
}

/// Rendering-side collaborator that owns the animation clock.
///
/// Implementations must never report a transaction whose transitions were
/// cleared or superseded before they finished.
pub trait AnimationDriver {
    /// Set the resting value shown once no transition covers `target`.
    fn set_model(&mut self, target: Target, value: Value);

    fn model(&self, target: Target) -> Value;

    /// Value currently on screen, including in-flight transitions.
    fn presented(&self, target: Target) -> Value;

    /// Drop every transition on `layer` together with the completions of
    /// the transactions they belonged to.
    fn clear(&mut self, layer: Layer);

    /// Arm a transaction. A transition replaces any in-flight transition on
    /// the same target.
    fn commit(&mut self, transaction: Transaction);

    /// Advance the clock by `dt` seconds.
    fn advance(&mut self, dt: f64);

    /// Steps of transactions that finished since the last call, in order.
    fn drain_finished(&mut self) -> Vec<Step>;

    /// True when nothing is animating.
    fn is_idle(&self) -> bool;
}
