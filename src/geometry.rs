//! Stroke paths for the pill outline and the progress circle.
//!
//! Angles follow screen coordinates (y grows downward), so a positive sweep
//! runs clockwise on screen. All helpers are pure functions of the bounds and
//! line width; degenerate bounds yield zero-radius paths.

use std::f32::consts::{PI, TAU};

use egui::{Pos2, Rect, Vec2, pos2};

/// One piece of a [`StrokePath`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Line {
        from: Pos2,
        to: Pos2,
    },
    Arc {
        center: Pos2,
        radius: f32,
        /// Start angle in radians.
        start: f32,
        /// Signed sweep in radians; positive is clockwise on screen.
        sweep: f32,
    },
}

impl Segment {
    pub fn length(&self) -> f32 {
        match *self {
            Segment::Line { from, to } => from.distance(to),
            Segment::Arc { radius, sweep, .. } => radius * sweep.abs(),
        }
    }

    /// Point at fraction `t` (0.0-1.0) along the segment.
    pub fn point_at(&self, t: f32) -> Pos2 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Segment::Line { from, to } => from + (to - from) * t,
            Segment::Arc {
                center,
                radius,
                start,
                sweep,
            } => {
                let angle = start + sweep * t;
                center + Vec2::new(angle.cos(), angle.sin()) * radius
            }
        }
    }

    pub fn reversed(&self) -> Segment {
        match *self {
            Segment::Line { from, to } => Segment::Line { from: to, to: from },
            Segment::Arc {
                center,
                radius,
                start,
                sweep,
            } => Segment::Arc {
                center,
                radius,
                start: start + sweep,
                sweep: -sweep,
            },
        }
    }
}

/// An open or closed outline that can be trimmed by length fraction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokePath {
    segments: Vec<Segment>,
}

impl StrokePath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn length(&self) -> f32 {
        self.segments.iter().map(Segment::length).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.length() <= f32::EPSILON
    }

    /// Same outline drawn from the other end.
    pub fn reversed(&self) -> StrokePath {
        StrokePath {
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
        }
    }

    /// Point at `fraction` of the total length.
    pub fn point_at(&self, fraction: f32) -> Pos2 {
        let Some(first) = self.segments.first() else {
            return Pos2::ZERO;
        };
        let total = self.length();
        if total <= f32::EPSILON {
            return first.point_at(0.0);
        }
        let mut remaining = fraction.clamp(0.0, 1.0) * total;
        for segment in &self.segments {
            let length = segment.length();
            if remaining <= length {
                let t = if length > 0.0 { remaining / length } else { 0.0 };
                return segment.point_at(t);
            }
            remaining -= length;
        }
        self.segments
            .last()
            .map(|segment| segment.point_at(1.0))
            .unwrap_or(Pos2::ZERO)
    }

    /// Polyline covering `[start, end]` of the path, sampled every `spacing`
    /// points. Empty when the range is empty.
    pub fn trimmed(&self, start: f32, end: f32, spacing: f32) -> Vec<Pos2> {
        let start = start.clamp(0.0, 1.0);
        let end = end.clamp(0.0, 1.0);
        let total = self.length();
        if end <= start || total <= f32::EPSILON || !total.is_finite() {
            return Vec::new();
        }
        let spacing = spacing.max(0.25);
        let from = start * total;
        let to = end * total;
        let mut points = vec![self.point_at(start)];
        let mut offset = 0.0;
        for segment in &self.segments {
            let length = segment.length();
            let segment_from = from.max(offset);
            let segment_to = to.min(offset + length);
            if segment_to > segment_from && length > 0.0 {
                let steps = ((segment_to - segment_from) / spacing).ceil().max(1.0) as usize;
                for step in 1..=steps {
                    let along =
                        segment_from + (segment_to - segment_from) * step as f32 / steps as f32;
                    points.push(segment.point_at((along - offset) / length));
                }
            }
            offset += length;
        }
        points
    }
}

/// Half of the shorter side, never negative.
pub fn corner_radius(bounds: Rect) -> f32 {
    let width = bounds.width().max(0.0);
    let height = bounds.height().max(0.0);
    let radius = width.min(height) / 2.0;
    if radius.is_finite() { radius } else { 0.0 }
}

/// Capsule outline starting at the top middle and running counter-clockwise.
/// Empty for non-finite bounds.
pub fn pill_path(bounds: Rect, line_width: f32) -> StrokePath {
    if !bounds.is_finite() {
        return StrokePath::default();
    }
    let radius = corner_radius(bounds);
    let center = bounds.center();
    let width = bounds.width().max(0.0);
    let half_stroke = line_width.max(0.0) / 2.0;
    let focal_offset = (width / 2.0 - (radius + half_stroke)).max(0.0);
    let left = pos2(center.x - focal_offset, center.y);
    let right = pos2(center.x + focal_offset, center.y);
    let top = center.y - radius;
    let bottom = center.y + radius;
    let middle_top = pos2((left.x + right.x) / 2.0, top);
    StrokePath::new(vec![
        Segment::Line {
            from: middle_top,
            to: pos2(left.x, top),
        },
        Segment::Arc {
            center: left,
            radius,
            start: 1.5 * PI,
            sweep: -PI,
        },
        Segment::Line {
            from: pos2(left.x, bottom),
            to: pos2(right.x, bottom),
        },
        Segment::Arc {
            center: right,
            radius,
            start: 0.5 * PI,
            sweep: -PI,
        },
        Segment::Line {
            from: pos2(right.x, top),
            to: middle_top,
        },
    ])
}

/// Full circle inscribed in the bounds, starting at the top, clockwise.
/// Empty for non-finite bounds.
pub fn circle_path(bounds: Rect) -> StrokePath {
    if !bounds.is_finite() {
        return StrokePath::default();
    }
    StrokePath::new(vec![Segment::Arc {
        center: bounds.center(),
        radius: corner_radius(bounds),
        start: 1.5 * PI,
        sweep: TAU,
    }])
}

/// Rotate `points` by `angle` radians around `pivot` (clockwise on screen).
pub fn rotate_points(points: &mut [Pos2], pivot: Pos2, angle: f32) {
    if angle == 0.0 || !angle.is_finite() {
        return;
    }
    let (sin, cos) = angle.sin_cos();
    for point in points {
        let offset = *point - pivot;
        *point = pivot
            + Vec2::new(
                offset.x * cos - offset.y * sin,
                offset.x * sin + offset.y * cos,
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Pos2, b: Pos2) -> bool {
        a.distance(b) < 1e-3
    }

    fn pill_bounds() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(120.0, 40.0))
    }

    #[test]
    fn pill_length_is_two_edges_plus_one_circle() {
        let path = pill_path(pill_bounds(), 2.0);
        // focal offset = 60 - 21 = 39; straight edges = 2 * 78
        let expected = 2.0 * 78.0 + TAU * 20.0;
        assert!((path.length() - expected).abs() < 1e-3);
    }

    #[test]
    fn pill_starts_top_middle_and_heads_left() {
        let path = pill_path(pill_bounds(), 2.0);
        assert!(close(path.point_at(0.0), pos2(60.0, 0.0)));
        assert!(path.point_at(0.05).x < 60.0);
        assert!(close(path.point_at(1.0), pos2(60.0, 0.0)));
    }

    #[test]
    fn circle_runs_clockwise_from_the_top() {
        let path = circle_path(pill_bounds());
        assert!(close(path.point_at(0.0), pos2(60.0, 0.0)));
        assert!(close(path.point_at(0.25), pos2(80.0, 20.0)));
        assert!(close(path.point_at(0.5), pos2(60.0, 40.0)));
    }

    #[test]
    fn reversing_swaps_the_direction() {
        let path = pill_path(pill_bounds(), 2.0);
        let reversed = path.reversed();
        assert!((reversed.length() - path.length()).abs() < 1e-3);
        assert!(close(reversed.point_at(0.3), path.point_at(0.7)));
    }

    #[test]
    fn trimming_samples_only_the_requested_range() {
        let path = circle_path(pill_bounds());
        assert!(path.trimmed(0.5, 0.5, 2.0).is_empty());
        assert!(path.trimmed(0.8, 0.2, 2.0).is_empty());
        let points = path.trimmed(0.0, 0.5, 2.0);
        assert!(close(points[0], pos2(60.0, 0.0)));
        assert!(close(*points.last().unwrap(), pos2(60.0, 40.0)));
        assert!(points.iter().all(|point| point.x >= 60.0 - 1e-3));
    }

    #[test]
    fn degenerate_bounds_produce_zero_radius_paths() {
        let inverted = Rect::from_min_max(pos2(10.0, 10.0), pos2(-5.0, -5.0));
        assert_eq!(corner_radius(inverted), 0.0);
        let pill = pill_path(inverted, 2.0);
        assert!(pill.is_empty());
        assert!(pill.trimmed(0.0, 1.0, 1.0).is_empty());
        let circle = circle_path(Rect::from_min_size(pos2(5.0, 5.0), Vec2::ZERO));
        assert!(circle.is_empty());
        assert_eq!(circle.point_at(0.5), circle.point_at(0.0));
    }

    #[test]
    fn unbounded_rects_produce_empty_paths() {
        let pill = pill_path(Rect::EVERYTHING, 2.0);
        assert!(pill.segments().is_empty());
        assert!(pill.trimmed(0.0, 1.0, 1.0).is_empty());
        let circle = circle_path(Rect::EVERYTHING);
        assert!(circle.segments().is_empty());
        let half_open = Rect::from_min_max(Pos2::ZERO, pos2(f32::INFINITY, 30.0));
        assert!(pill_path(half_open, 2.0).segments().is_empty());
        assert!(circle_path(half_open).trimmed(0.0, 0.5, 2.0).is_empty());
    }

    #[test]
    fn rotation_turns_clockwise_on_screen() {
        let mut points = [pos2(60.0, 0.0)];
        rotate_points(&mut points, pos2(60.0, 20.0), PI / 2.0);
        assert!(close(points[0], pos2(80.0, 20.0)));
    }
}
