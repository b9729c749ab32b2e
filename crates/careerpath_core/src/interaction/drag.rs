//! Pointer-driven drag state machine.
//!
//! # Responsibility
//! - Acquire a node on pointer-down inside its (enlarged) hit region.
//! - Translate pointer moves into absolute override writes, live.
//! - Release on pointer-up or pointer-leave, keeping the last position.
//!
//! # Invariants
//! - At most one drag is active; pointer-downs while dragging are ignored
//!   without hit testing.
//! - Pointer-up and pointer-leave commit identically; there is no revert.
//! - Anchors are never targets (scenes expose no anchor hit regions).

use crate::interaction::canvas::CanvasSizer;
use crate::layout::overrides::{NodeKey, OverrideLayer};
use crate::layout::scene::Scene;
use crate::model::geometry::Point;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        target: NodeKey,
        start_screen: Point,
        start_canvas: Point,
        /// Last position written to the override layer.
        current: Point,
    },
}

/// Final position of a released drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragCommit {
    pub target: NodeKey,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragController {
    state: DragState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn target(&self) -> Option<NodeKey> {
        match self.state {
            DragState::Dragging { target, .. } => Some(target),
            DragState::Idle => None,
        }
    }

    /// Starts a drag when `screen` falls inside a node hit region.
    ///
    /// The node's current effective position is pinned as its override, so
    /// the node stops following synthesized layout from this point on.
    /// Returns the acquired node, or `None` when idle-miss or already dragging.
    pub fn pointer_down(
        &mut self,
        screen: Point,
        scene: &Scene,
        canvas: &CanvasSizer,
        overrides: &mut OverrideLayer,
    ) -> Option<NodeKey> {
        if self.is_dragging() {
            return None;
        }

        let hit = scene.hit_test(canvas.to_canvas(screen))?;
        if !overrides.set(hit.key, hit.position) {
            return None;
        }
        self.state = DragState::Dragging {
            target: hit.key,
            start_screen: screen,
            start_canvas: hit.position,
            current: hit.position,
        };
        debug!(
            "event=drag_start module=interaction status=ok target={}",
            describe_key(hit.key)
        );
        Some(hit.key)
    }

    /// Moves the dragged node; returns the position written, if any.
    pub fn pointer_move(
        &mut self,
        screen: Point,
        canvas: &CanvasSizer,
        overrides: &mut OverrideLayer,
    ) -> Option<Point> {
        let DragState::Dragging {
            target,
            start_screen,
            start_canvas,
            current,
        } = &mut self.state
        else {
            return None;
        };

        let delta = canvas.to_canvas(screen) - canvas.to_canvas(*start_screen);
        let next = *start_canvas + delta;
        if !overrides.set(*target, next) {
            return None;
        }
        *current = next;
        Some(next)
    }

    pub fn pointer_up(&mut self) -> Option<DragCommit> {
        self.release()
    }

    /// Pointer left the canvas bounds; commits like a pointer-up.
    pub fn pointer_leave(&mut self) -> Option<DragCommit> {
        self.release()
    }

    /// Returns to `Idle`, reporting the last written position.
    pub fn release(&mut self) -> Option<DragCommit> {
        let DragState::Dragging {
            target, current, ..
        } = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return None;
        };
        debug!(
            "event=drag_end module=interaction status=ok target={} x={} y={}",
            describe_key(target),
            current.x,
            current.y
        );
        Some(DragCommit {
            target,
            position: current,
        })
    }
}

fn describe_key(key: NodeKey) -> String {
    match key {
        NodeKey::Event(id) => format!("event:{id}"),
        NodeKey::ObjectiveStep { objective, step } => format!("objective:{objective}:{step}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{DragController, DragState};

    #[test]
    fn release_while_idle_reports_nothing() {
        let mut drag = DragController::new();
        assert!(drag.pointer_up().is_none());
        assert!(drag.pointer_leave().is_none());
        assert_eq!(drag.state(), DragState::Idle);
        assert!(drag.target().is_none());
    }
}
