//! Render model composition.
//!
//! # Responsibility
//! - Run synthesis for the current state and canvas size.
//! - Compose overrides on top and build curves for every path.
//! - Size nodes, place labels and answer hit tests in paint order.
//!
//! # Invariants
//! - Each objective anchor equals the effective tail of the timeline, or
//!   `(padding_x, height / 2)` while the timeline is empty.
//! - Objectives without generated steps (or still loading) are anchor-only.
//! - Hidden objectives are composed but never hit-testable.

use crate::config::LayoutConfig;
use crate::layout::curve::{approximate_path_length, build_sinuous_path, CurveDescriptor};
use crate::layout::overrides::{NodeKey, OverrideLayer};
use crate::layout::waypoints::{
    compute_event_waypoints_with, compute_objective_waypoints_with, EventWave, ObjectiveBranch,
};
use crate::model::event::{CareerEvent, EventId};
use crate::model::geometry::Point;
use crate::model::objective::{Objective, ObjectiveId, StepKind};
use crate::store::CareerState;

const EVENT_TITLE_MAX_CHARS: usize = 14;
const STEP_TITLE_MAX_CHARS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Above,
    Below,
}

impl LabelSide {
    /// Even indices sit above the path, odd ones below.
    pub fn alternating(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Above
        } else {
            Self::Below
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeLabel {
    pub side: LabelSide,
    pub anchor: Point,
    pub title: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventNodeLayout {
    pub event_id: EventId,
    pub position: Point,
    pub radius: f64,
    pub hit_radius: f64,
    /// Last node of the timeline; objective paths branch from it.
    pub is_tail: bool,
    pub is_overridden: bool,
    pub label: NodeLabel,
}

impl EventNodeLayout {
    pub fn key(&self) -> NodeKey {
        NodeKey::Event(self.event_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepNodeLayout {
    pub objective_id: ObjectiveId,
    /// Waypoint index, starting at 1 (0 is the anchor).
    pub step_index: usize,
    pub kind: StepKind,
    pub position: Point,
    pub radius: f64,
    pub hit_radius: f64,
    pub is_final: bool,
    pub is_overridden: bool,
    pub label: NodeLabel,
}

impl StepNodeLayout {
    pub fn key(&self) -> NodeKey {
        NodeKey::objective_step(self.objective_id, self.step_index)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineLayout {
    pub waypoints: Vec<Point>,
    pub curve: CurveDescriptor,
    pub path_length: f64,
    pub nodes: Vec<EventNodeLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveLayout {
    pub objective_id: ObjectiveId,
    /// Creation-order index driving lane and phase.
    pub objective_index: usize,
    pub color: String,
    pub is_visible: bool,
    pub is_loading: bool,
    /// Effective waypoints, anchor first.
    pub waypoints: Vec<Point>,
    pub curve: CurveDescriptor,
    pub path_length: f64,
    pub steps: Vec<StepNodeLayout>,
}

impl ObjectiveLayout {
    /// Whether a dotted branch should be painted for this objective.
    pub fn is_drawable(&self) -> bool {
        self.is_visible && self.waypoints.len() >= 2
    }
}

/// Node found under a pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTarget {
    pub key: NodeKey,
    pub position: Point,
}

/// Everything a host needs to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Drawing width; grows past the canvas when branches run long.
    pub extent_width: f64,
    pub timeline: TimelineLayout,
    pub objectives: Vec<ObjectiveLayout>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.timeline.nodes.is_empty()
    }

    pub fn objective(&self, id: ObjectiveId) -> Option<&ObjectiveLayout> {
        self.objectives
            .iter()
            .find(|layout| layout.objective_id == id)
    }

    /// Effective position of a node currently in the scene.
    pub fn node_position(&self, key: NodeKey) -> Option<Point> {
        match key {
            NodeKey::Event(id) => self
                .timeline
                .nodes
                .iter()
                .find(|node| node.event_id == id)
                .map(|node| node.position),
            NodeKey::ObjectiveStep { objective, step } => self
                .objective(objective)
                .and_then(|layout| layout.waypoints.get(step).copied()),
        }
    }

    /// Topmost draggable node whose hit region contains `point`.
    ///
    /// Paint order is objectives first, then the timeline; later items are
    /// on top, so the search walks that order backwards.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        let event_hit = self
            .timeline
            .nodes
            .iter()
            .rev()
            .find(|node| node.position.distance_to(point) <= node.hit_radius)
            .map(|node| HitTarget {
                key: node.key(),
                position: node.position,
            });
        if event_hit.is_some() {
            return event_hit;
        }

        self.objectives
            .iter()
            .rev()
            .filter(|layout| layout.is_visible)
            .flat_map(|layout| layout.steps.iter().rev())
            .find(|node| node.position.distance_to(point) <= node.hit_radius)
            .map(|node| HitTarget {
                key: node.key(),
                position: node.position,
            })
    }
}

/// Builds the scene for `state` at `canvas_width`.
pub fn compose_scene(
    state: &CareerState,
    overrides: &OverrideLayer,
    canvas_width: f64,
    config: &LayoutConfig,
) -> Scene {
    let height = config.canvas_height;
    let timeline = compose_timeline(state.events(), overrides, canvas_width, config);
    let anchor = timeline
        .waypoints
        .last()
        .copied()
        .unwrap_or_else(|| Point::new(config.event_padding_x, height / 2.0));

    let branch = ObjectiveBranch {
        padding_x: config.event_padding_x,
        step_spacing: config.step_spacing,
        lane_spacing: config.lane_spacing,
        amplitude: config.objective_amplitude,
    };
    let objectives = state
        .objectives()
        .iter()
        .enumerate()
        .map(|(index, objective)| {
            compose_objective(objective, index, anchor, overrides, canvas_width, branch, config)
        })
        .collect::<Vec<_>>();

    let farthest_x = objectives
        .iter()
        .filter(|layout| layout.is_visible)
        .flat_map(|layout| layout.waypoints.iter())
        .map(|point| point.x)
        .fold(f64::NEG_INFINITY, f64::max);
    let extent_width = if farthest_x.is_finite() {
        canvas_width.max(farthest_x + config.extent_margin)
    } else {
        canvas_width
    };

    Scene {
        canvas_width,
        canvas_height: height,
        extent_width,
        timeline,
        objectives,
    }
}

fn compose_timeline(
    events: &[CareerEvent],
    overrides: &OverrideLayer,
    canvas_width: f64,
    config: &LayoutConfig,
) -> TimelineLayout {
    let wave = EventWave {
        padding_x: config.event_padding_x,
        amplitude: config.event_amplitude,
    };
    let base = compute_event_waypoints_with(events.len(), canvas_width, config.canvas_height, wave);
    let waypoints = overrides.compose_events(events, &base);
    let tail_index = events.len().saturating_sub(1);

    let nodes = events
        .iter()
        .zip(&waypoints)
        .enumerate()
        .map(|(index, (event, position))| {
            let is_tail = index == tail_index;
            let radius = if is_tail {
                config.current_event_radius
            } else {
                config.event_radius
            };
            EventNodeLayout {
                event_id: event.id,
                position: *position,
                radius,
                hit_radius: radius + config.hit_slop,
                is_tail,
                is_overridden: overrides.get(NodeKey::Event(event.id)).is_some(),
                label: place_label(
                    index,
                    *position,
                    config.label_offset,
                    truncate_title(&event.title, EVENT_TITLE_MAX_CHARS),
                    event.year_label(),
                ),
            }
        })
        .collect();

    TimelineLayout {
        curve: build_sinuous_path(&waypoints),
        path_length: approximate_path_length(&waypoints),
        waypoints,
        nodes,
    }
}

fn compose_objective(
    objective: &Objective,
    index: usize,
    anchor: Point,
    overrides: &OverrideLayer,
    canvas_width: f64,
    branch: ObjectiveBranch,
    config: &LayoutConfig,
) -> ObjectiveLayout {
    let step_count = if objective.is_loading {
        0
    } else {
        objective.step_count()
    };
    let base = compute_objective_waypoints_with(
        anchor,
        step_count,
        canvas_width,
        config.canvas_height,
        index,
        branch,
    );
    let waypoints = overrides.compose_objective(objective.id, &base);

    let steps = waypoints
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(step_index, position)| {
            let step = objective.step(step_index)?;
            let is_final = step_index == step_count;
            let radius = if is_final {
                config.final_step_radius
            } else {
                config.step_radius
            };
            let key = NodeKey::objective_step(objective.id, step_index);
            Some(StepNodeLayout {
                objective_id: objective.id,
                step_index,
                kind: step.kind,
                position: *position,
                radius,
                hit_radius: radius + config.hit_slop,
                is_final,
                is_overridden: overrides.get(key).is_some(),
                label: place_label(
                    step_index - 1,
                    *position,
                    config.label_offset,
                    truncate_title(&step.title, STEP_TITLE_MAX_CHARS),
                    step.caption(),
                ),
            })
        })
        .collect();

    ObjectiveLayout {
        objective_id: objective.id,
        objective_index: index,
        color: objective.color.clone(),
        is_visible: objective.is_visible,
        is_loading: objective.is_loading,
        curve: build_sinuous_path(&waypoints),
        path_length: approximate_path_length(&waypoints),
        waypoints,
        steps,
    }
}

fn place_label(
    index: usize,
    position: Point,
    offset: f64,
    title: String,
    caption: String,
) -> NodeLabel {
    let side = LabelSide::alternating(index);
    let dy = match side {
        LabelSide::Above => -offset,
        LabelSide::Below => offset,
    };
    NodeLabel {
        side,
        anchor: Point::new(position.x, position.y + dy),
        title,
        caption,
    }
}

/// Cuts titles longer than `max_chars` to `max_chars - 1` chars plus `…`.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let mut truncated = title
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    truncated.push('…');
    truncated
}
