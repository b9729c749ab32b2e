use careerpath_core::layout::waypoints::{
    compute_event_waypoints, compute_objective_waypoints, lane_offset, DEFAULT_PADDING_X,
};
use careerpath_core::Point;
use std::f64::consts::PI;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn event_waypoint_count_matches_input() {
    for count in 0..12 {
        assert_eq!(compute_event_waypoints(count, 1000.0, 340.0).len(), count);
    }
    assert!(compute_event_waypoints(0, 1000.0, 340.0).is_empty());
}

#[test]
fn single_event_sits_at_usable_midpoint() {
    let points = compute_event_waypoints(1, 1000.0, 340.0);
    assert_eq!(points, vec![Point::new(500.0, 170.0)]);
}

#[test]
fn three_events_follow_the_reference_wave() {
    let points = compute_event_waypoints(3, 1000.0, 340.0);
    let expected_x = [80.0, 500.0, 920.0];
    let phases = [0.0, 1.25 * PI, 2.5 * PI];

    for ((point, x), phase) in points.iter().zip(expected_x).zip(phases) {
        assert_close(point.x, x);
        assert_close(point.y, 170.0 + 80.0 * f64::sin(phase));
    }
}

#[test]
fn synthesis_is_bit_identical_across_calls() {
    let first = compute_event_waypoints(7, 913.5, 340.0);
    let second = compute_event_waypoints(7, 913.5, 340.0);
    assert_eq!(first, second);

    let anchor = Point::new(920.0, 250.0);
    let branch_a = compute_objective_waypoints(anchor, 4, 1400.0, 340.0, 2);
    let branch_b = compute_objective_waypoints(anchor, 4, 1400.0, 340.0, 2);
    assert_eq!(branch_a, branch_b);
}

#[test]
fn objective_branch_starts_at_anchor_and_steps_right() {
    let anchor = Point::new(100.0, 200.0);
    let points = compute_objective_waypoints(anchor, 3, 2000.0, 340.0, 1);

    assert_eq!(points.len(), 4);
    assert_eq!(points[0], anchor);
    assert_close(points[1].x, 260.0);
    assert_close(points[2].x, 420.0);
    assert_close(points[3].x, 580.0);
    // Middle lane has no offset: y = 170 + 60 * sin(step / 4 * 1.5pi + 1.2).
    assert_close(points[1].y, 170.0 + 60.0 * f64::sin(0.25 * 1.5 * PI + 1.2));
}

#[test]
fn objective_steps_clamp_at_right_edge() {
    let anchor = Point::new(900.0, 170.0);
    let points = compute_objective_waypoints(anchor, 3, 1000.0, 340.0, 0);
    let right_bound = 1000.0 - DEFAULT_PADDING_X / 2.0;
    for point in &points[1..] {
        assert_close(point.x, right_bound);
    }
}

#[test]
fn anchor_only_branch_for_zero_steps() {
    let anchor = Point::new(80.0, 170.0);
    assert_eq!(
        compute_objective_waypoints(anchor, 0, 1000.0, 340.0, 4),
        vec![anchor]
    );
}

#[test]
fn lanes_separate_concurrent_objectives() {
    let anchor = Point::new(80.0, 170.0);
    let lower = compute_objective_waypoints(anchor, 1, 1000.0, 340.0, 0);
    let upper = compute_objective_waypoints(anchor, 1, 1000.0, 340.0, 2);
    assert_eq!(lane_offset(0, 70.0), -70.0);
    assert_ne!(lower[1].y, upper[1].y);
}
