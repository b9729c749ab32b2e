//! Deterministic waypoint synthesis.
//!
//! # Responsibility
//! - Map event/step counts and canvas dimensions to point sequences.
//!
//! # Invariants
//! - Pure: identical inputs give bit-identical outputs.
//! - Never fails: empty or degenerate inputs yield minimal valid outputs.
//! - Non-finite width/height are treated as `0.0`, so no NaN escapes.
//!
//! Callers are expected to pass a measured, positive width; `CanvasSizer`
//! enforces that before a width reaches this module.

use crate::model::geometry::Point;
use std::f64::consts::PI;

pub const DEFAULT_PADDING_X: f64 = 80.0;
pub const DEFAULT_AMPLITUDE: f64 = 80.0;
pub const DEFAULT_STEP_SPACING: f64 = 160.0;
pub const DEFAULT_LANE_SPACING: f64 = 70.0;
pub const DEFAULT_OBJECTIVE_AMPLITUDE: f64 = 60.0;

/// Number of distinct vertical lanes for objective paths.
pub const LANE_COUNT: usize = 3;

const EVENT_WAVE_SPAN: f64 = 2.5 * PI;
const OBJECTIVE_WAVE_SPAN: f64 = 1.5 * PI;
const OBJECTIVE_PHASE_SHIFT: f64 = 1.2;

/// Timeline wave parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventWave {
    pub padding_x: f64,
    pub amplitude: f64,
}

impl Default for EventWave {
    fn default() -> Self {
        Self {
            padding_x: DEFAULT_PADDING_X,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

/// Objective branch parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveBranch {
    pub padding_x: f64,
    pub step_spacing: f64,
    pub lane_spacing: f64,
    pub amplitude: f64,
}

impl Default for ObjectiveBranch {
    fn default() -> Self {
        Self {
            padding_x: DEFAULT_PADDING_X,
            step_spacing: DEFAULT_STEP_SPACING,
            lane_spacing: DEFAULT_LANE_SPACING,
            amplitude: DEFAULT_OBJECTIVE_AMPLITUDE,
        }
    }
}

/// Event waypoints with default padding and amplitude.
pub fn compute_event_waypoints(count: usize, width: f64, height: f64) -> Vec<Point> {
    compute_event_waypoints_with(count, width, height, EventWave::default())
}

/// Lays `count` events along a sine wave of ~1.25 oscillations.
///
/// `x` spreads evenly across `width - 2 * padding_x` (midpoint for a single
/// event); `y = height / 2 + amplitude * sin(t * 2.5π)`.
pub fn compute_event_waypoints_with(
    count: usize,
    width: f64,
    height: f64,
    wave: EventWave,
) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }

    let width = finite_or_zero(width);
    let center_y = finite_or_zero(height) / 2.0;
    let usable_width = width - wave.padding_x * 2.0;
    let last_index = (count - 1) as f64;

    (0..count)
        .map(|index| {
            let (t, phase_t) = if count == 1 {
                (0.5, 0.0)
            } else {
                let t = index as f64 / last_index;
                (t, t)
            };
            let x = wave.padding_x + t * usable_width;
            let y = center_y + (phase_t * EVENT_WAVE_SPAN).sin() * wave.amplitude;
            Point::new(x, y)
        })
        .collect()
}

/// Objective waypoints with default padding and spacing.
pub fn compute_objective_waypoints(
    anchor: Point,
    step_count: usize,
    width: f64,
    height: f64,
    objective_index: usize,
) -> Vec<Point> {
    compute_objective_waypoints_with(
        anchor,
        step_count,
        width,
        height,
        objective_index,
        ObjectiveBranch::default(),
    )
}

/// Lays a branch of `step_count` steps to the right of `anchor`.
///
/// Point 0 is the anchor unchanged. Steps advance by `step_spacing` and are
/// clamped at `width - padding_x / 2`, so long paths compress against the
/// right edge. Objectives share one of three lanes (`index mod 3`) and get a
/// per-index phase shift so concurrent curves drift apart.
pub fn compute_objective_waypoints_with(
    anchor: Point,
    step_count: usize,
    width: f64,
    height: f64,
    objective_index: usize,
    branch: ObjectiveBranch,
) -> Vec<Point> {
    let mut points = Vec::with_capacity(step_count + 1);
    points.push(anchor);
    if step_count == 0 {
        return points;
    }

    let right_bound = finite_or_zero(width) - branch.padding_x / 2.0;
    let center_y = finite_or_zero(height) / 2.0;
    let branch_offset = lane_offset(objective_index, branch.lane_spacing);
    let phase_shift = objective_index as f64 * OBJECTIVE_PHASE_SHIFT;
    let denominator = (step_count + 1) as f64;

    for step in 1..=step_count {
        let x = (anchor.x + step as f64 * branch.step_spacing).min(right_bound);
        let phase = (step as f64 / denominator) * OBJECTIVE_WAVE_SPAN + phase_shift;
        let y = center_y + branch_offset + phase.sin() * branch.amplitude;
        points.push(Point::new(x, y));
    }

    points
}

/// Vertical lane displacement: `(index mod 3 - 1) * lane_spacing`.
pub fn lane_offset(objective_index: usize, lane_spacing: f64) -> f64 {
    let lane = (objective_index % LANE_COUNT) as f64 - 1.0;
    lane * lane_spacing
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
