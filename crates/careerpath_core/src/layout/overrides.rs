//! Sparse user position overrides.
//!
//! # Responsibility
//! - Store absolute positions written by drags, keyed by typed node keys.
//! - Compose overrides on top of synthesized layouts at render time.
//!
//! # Invariants
//! - Base layouts are never mutated; composition always returns new points.
//! - An objective anchor (step 0) is never stored nor consulted.
//! - Only finite points are stored.
//! - Overrides are session-only and never persisted.

use crate::model::event::{CareerEvent, EventId};
use crate::model::geometry::Point;
use crate::model::objective::ObjectiveId;
use crate::store::CareerState;
use std::collections::HashMap;

/// Index of the anchor waypoint within an objective path.
pub const ANCHOR_STEP: usize = 0;

/// Identity of one draggable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Event(EventId),
    ObjectiveStep { objective: ObjectiveId, step: usize },
}

impl NodeKey {
    pub fn objective_step(objective: ObjectiveId, step: usize) -> Self {
        Self::ObjectiveStep { objective, step }
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, Self::ObjectiveStep { step, .. } if *step == ANCHOR_STEP)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideLayer {
    positions: HashMap<NodeKey, Point>,
}

impl OverrideLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes an absolute position for `key`.
    ///
    /// Returns `false` (and stores nothing) for anchors and non-finite points.
    pub fn set(&mut self, key: NodeKey, position: Point) -> bool {
        if key.is_anchor() || !position.is_finite() {
            return false;
        }
        self.positions.insert(key, position);
        true
    }

    pub fn get(&self, key: NodeKey) -> Option<Point> {
        if key.is_anchor() {
            return None;
        }
        self.positions.get(&key).copied()
    }

    /// Effective position: the override when present, else `base`.
    pub fn resolve(&self, key: NodeKey, base: Point) -> Point {
        self.get(key).unwrap_or(base)
    }

    pub fn remove(&mut self, key: NodeKey) -> Option<Point> {
        self.positions.remove(&key)
    }

    /// Effective timeline points; `base[i]` belongs to `events[i]`.
    pub fn compose_events(&self, events: &[CareerEvent], base: &[Point]) -> Vec<Point> {
        events
            .iter()
            .zip(base)
            .map(|(event, point)| self.resolve(NodeKey::Event(event.id), *point))
            .collect()
    }

    /// Effective objective points; index 0 always keeps the base anchor.
    pub fn compose_objective(&self, objective: ObjectiveId, base: &[Point]) -> Vec<Point> {
        base.iter()
            .enumerate()
            .map(|(step, point)| self.resolve(NodeKey::objective_step(objective, step), *point))
            .collect()
    }

    /// Drops the override of one event. Returns removed count.
    pub fn prune_event(&mut self, id: EventId) -> usize {
        self.prune(|key| matches!(key, NodeKey::Event(event) if *event == id))
    }

    /// Drops all step overrides of one objective. Returns removed count.
    pub fn prune_objective(&mut self, id: ObjectiveId) -> usize {
        self.prune(|key| {
            matches!(key, NodeKey::ObjectiveStep { objective, .. } if *objective == id)
        })
    }

    /// Drops step overrides of `id` past `step_count`. Returns removed count.
    pub fn prune_steps_beyond(&mut self, id: ObjectiveId, step_count: usize) -> usize {
        self.prune(|key| {
            matches!(key, NodeKey::ObjectiveStep { objective, step } if *objective == id && *step > step_count)
        })
    }

    /// Drops overrides whose node no longer exists in `state`.
    pub fn retain_live(&mut self, state: &CareerState) -> usize {
        self.prune(|key| match key {
            NodeKey::Event(id) => state.event(*id).is_none(),
            NodeKey::ObjectiveStep { objective, step } => state
                .objective(*objective)
                .map_or(true, |live| *step > live.step_count()),
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    fn prune(&mut self, mut doomed: impl FnMut(&NodeKey) -> bool) -> usize {
        let before = self.positions.len();
        self.positions.retain(|key, _| !doomed(key));
        before - self.positions.len()
    }
}
