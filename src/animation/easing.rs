/// Timing curves applied to a transition's normalized time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant rate; used for spins and progress fills.
    Linear,
    /// Slow start, cubic-bezier (0.42, 0, 1, 1).
    EaseIn,
    /// Slow finish, cubic-bezier (0, 0, 0.58, 1).
    EaseOut,
}

impl Easing {
    /// Map linear time `t` (clamped to 0.0-1.0) to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
        }
    }
}

/// Evaluate a unit cubic-bezier timing curve at `x`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let t = solve_curve_x(x1, x2, x);
    bezier_component(y1, y2, t)
}

fn bezier_component(a1: f32, a2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
}

fn bezier_slope(a1: f32, a2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
}

fn solve_curve_x(x1: f32, x2: f32, x: f32) -> f32 {
    const EPSILON: f32 = 1e-6;
    let mut t = x;
    for _ in 0..8 {
        let error = bezier_component(x1, x2, t) - x;
        if error.abs() < EPSILON {
            return t;
        }
        let slope = bezier_slope(x1, x2, t);
        if slope.abs() < EPSILON {
            break;
        }
        t -= error / slope;
    }
    // Newton stalled on a flat section; bisect instead.
    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    t = x;
    for _ in 0..32 {
        let value = bezier_component(x1, x2, t);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            low = t;
        } else {
            high = t;
        }
        t = (low + high) * 0.5;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 3] = [Easing::Linear, Easing::EaseIn, Easing::EaseOut];

    #[test]
    fn curves_pin_endpoints() {
        for easing in CURVES {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn ease_in_lags_and_ease_out_leads() {
        assert!(Easing::EaseIn.apply(0.5) < 0.4);
        assert!(Easing::EaseOut.apply(0.5) > 0.6);
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in CURVES {
            let mut previous = 0.0;
            for step in 1..=100 {
                let value = easing.apply(step as f32 / 100.0);
                assert!(value + 1e-5 >= previous, "{easing:?} dipped at {step}");
                previous = value;
            }
        }
    }

    #[test]
    fn out_of_range_time_is_clamped() {
        assert_eq!(Easing::EaseOut.apply(-3.0), 0.0);
        assert!((Easing::EaseIn.apply(7.0) - 1.0).abs() < 1e-6);
        assert_eq!(Easing::Linear.apply(f32::NAN), 0.0);
    }
}
