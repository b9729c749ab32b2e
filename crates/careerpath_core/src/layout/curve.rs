//! Smooth interpolating curves through waypoint sequences.
//!
//! # Invariants
//! - Every input point lies on the curve (segment endpoints are the inputs).
//! - Zero or negative horizontal deltas produce valid, possibly self-crossing
//!   segments, never errors.

use crate::model::geometry::Point;
use std::fmt::Write as _;

/// Curvature allowance applied to straight-line segment lengths.
pub const LENGTH_CURVATURE_FACTOR: f64 = 1.2;

/// One drawing instruction of a curve descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
}

/// Renderer-agnostic curve description.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveDescriptor {
    commands: Vec<PathCommand>,
}

impl CurveDescriptor {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, PathCommand::CubicTo { .. }))
            .count()
    }

    /// Serializes as SVG path data (`M x y C x1 y1, x2 y2, x y ...`).
    pub fn to_svg_path_data(&self) -> String {
        let mut data = String::new();
        for command in &self.commands {
            if !data.is_empty() {
                data.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match command {
                PathCommand::MoveTo(point) => write!(data, "M {} {}", point.x, point.y),
                PathCommand::CubicTo { c1, c2, to } => write!(
                    data,
                    "C {} {}, {} {}, {} {}",
                    c1.x, c1.y, c2.x, c2.y, to.x, to.y
                ),
            };
        }
        data
    }
}

/// Builds a horizontal-tangent cubic spline through `points`.
///
/// For each consecutive pair with `dx = curr.x - prev.x` the control points
/// are `(prev.x + dx/2, prev.y)` and `(curr.x - dx/2, curr.y)`.
pub fn build_sinuous_path(points: &[Point]) -> CurveDescriptor {
    let Some(first) = points.first() else {
        return CurveDescriptor::default();
    };

    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(*first));
    for pair in points.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        let dx = curr.x - prev.x;
        commands.push(PathCommand::CubicTo {
            c1: Point::new(prev.x + dx * 0.5, prev.y),
            c2: Point::new(curr.x - dx * 0.5, curr.y),
            to: curr,
        });
    }

    CurveDescriptor { commands }
}

/// Polyline length scaled by [`LENGTH_CURVATURE_FACTOR`].
///
/// Only used as an animation timing hint; layout never depends on it.
pub fn approximate_path_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance_to(pair[1]) * LENGTH_CURVATURE_FACTOR)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{build_sinuous_path, CurveDescriptor};
    use crate::model::geometry::Point;

    #[test]
    fn svg_path_data_matches_expected_syntax() {
        let curve = build_sinuous_path(&[Point::new(0.0, 0.0), Point::new(100.0, 50.0)]);
        assert_eq!(curve.to_svg_path_data(), "M 0 0 C 50 0, 50 50, 100 50");
    }

    #[test]
    fn empty_descriptor_serializes_to_empty_string() {
        assert_eq!(CurveDescriptor::default().to_svg_path_data(), "");
    }
}
