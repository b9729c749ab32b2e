//! Session board: state, overrides, drag and canvas owned together.
//!
//! # Responsibility
//! - Route data mutations through the career state and keep the override
//!   layer and active drag consistent with them.
//! - Feed pointer and resize input to the interaction components.
//! - Produce the scene for the current frame.
//!
//! # Invariants
//! - Deleting an event or objective prunes its overrides immediately.
//! - A drag whose target disappears is released.
//! - Replacing a path drops overrides of steps past its new length.
//! - Resizes never touch overrides.

use crate::config::LayoutConfig;
use crate::interaction::canvas::{CanvasSizer, ContainerRect, ResizeOutcome};
use crate::interaction::drag::{DragCommit, DragController};
use crate::layout::overrides::{NodeKey, OverrideLayer};
use crate::layout::scene::{compose_scene, Scene};
use crate::model::event::{CareerEvent, EventId, EventPatch, NewEvent};
use crate::model::geometry::Point;
use crate::model::insight::MarketInsight;
use crate::model::objective::{CareerPath, Objective, ObjectiveId};
use crate::store::{CareerState, StoreResult};
use log::debug;

#[derive(Debug, Clone)]
pub struct CareerBoard {
    config: LayoutConfig,
    state: CareerState,
    overrides: OverrideLayer,
    drag: DragController,
    canvas: CanvasSizer,
}

impl CareerBoard {
    pub fn new(config: LayoutConfig) -> Self {
        let state = CareerState::new(&config);
        Self::with_state(state, config)
    }

    pub fn with_state(state: CareerState, config: LayoutConfig) -> Self {
        let canvas = CanvasSizer::new(config.initial_canvas_width);
        Self {
            config,
            state,
            overrides: OverrideLayer::new(),
            drag: DragController::new(),
            canvas,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn state(&self) -> &CareerState {
        &self.state
    }

    pub fn overrides(&self) -> &OverrideLayer {
        &self.overrides
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn canvas(&self) -> &CanvasSizer {
        &self.canvas
    }

    /// Swaps in a freshly loaded state, dropping overrides of vanished nodes.
    pub fn replace_state(&mut self, state: CareerState) {
        self.state = state;
        let pruned = self.overrides.retain_live(&self.state);
        self.release_if_orphaned();
        debug!("event=board_replace_state module=board status=ok pruned_overrides={pruned}");
    }

    /// Composes the frame for the current state, overrides and width.
    pub fn scene(&self) -> Scene {
        compose_scene(&self.state, &self.overrides, self.canvas.width(), &self.config)
    }

    /// Drops every override, restoring the synthesized layout.
    pub fn reset_layout(&mut self) {
        self.drag.release();
        self.overrides.clear();
    }

    // ---- host input ----

    pub fn resize(&mut self, rect: ContainerRect) -> ResizeOutcome {
        self.canvas.observe(rect)
    }

    pub fn pointer_down(&mut self, screen: Point) -> Option<NodeKey> {
        if self.drag.is_dragging() {
            return None;
        }
        let scene = self.scene();
        self.drag
            .pointer_down(screen, &scene, &self.canvas, &mut self.overrides)
    }

    pub fn pointer_move(&mut self, screen: Point) -> Option<Point> {
        self.drag
            .pointer_move(screen, &self.canvas, &mut self.overrides)
    }

    pub fn pointer_up(&mut self) -> Option<DragCommit> {
        self.drag.pointer_up()
    }

    pub fn pointer_leave(&mut self) -> Option<DragCommit> {
        self.drag.pointer_leave()
    }

    // ---- data mutations ----

    pub fn add_event(&mut self, draft: NewEvent) -> StoreResult<EventId> {
        self.state.add_event(draft)
    }

    pub fn update_event(&mut self, id: EventId, patch: &EventPatch) -> StoreResult<()> {
        self.state.update_event(id, patch)
    }

    pub fn remove_event(&mut self, id: EventId) -> StoreResult<CareerEvent> {
        let removed = self.state.remove_event(id)?;
        self.overrides.prune_event(id);
        self.release_if_orphaned();
        Ok(removed)
    }

    pub fn add_objective(&mut self, title: &str, location: &str) -> StoreResult<ObjectiveId> {
        self.state.add_objective(title, location)
    }

    pub fn remove_objective(&mut self, id: ObjectiveId) -> StoreResult<Objective> {
        let removed = self.state.remove_objective(id)?;
        self.overrides.prune_objective(id);
        self.release_if_orphaned();
        Ok(removed)
    }

    /// Replaces the generated path, dropping overrides of steps that vanished.
    pub fn set_objective_path(&mut self, id: ObjectiveId, path: CareerPath) -> StoreResult<()> {
        let step_count = path.steps.len();
        self.state.set_objective_path(id, path)?;
        let pruned = self.overrides.prune_steps_beyond(id, step_count);
        self.release_if_orphaned();
        if pruned > 0 {
            debug!(
                "event=objective_path_set module=board status=ok objective_id={id} pruned_overrides={pruned}"
            );
        }
        Ok(())
    }

    pub fn set_objective_loading(&mut self, id: ObjectiveId, loading: bool) -> StoreResult<()> {
        self.state.set_objective_loading(id, loading)
    }

    pub fn toggle_objective_visibility(&mut self, id: ObjectiveId) -> StoreResult<bool> {
        let visible = self.state.toggle_objective_visibility(id)?;
        if !visible {
            if let Some(NodeKey::ObjectiveStep { objective, .. }) = self.drag.target() {
                if objective == id {
                    self.drag.release();
                }
            }
        }
        Ok(visible)
    }

    pub fn set_market_insight(&mut self, insight: Option<MarketInsight>) {
        self.state.set_market_insight(insight);
    }

    pub fn set_market_loading(&mut self, loading: bool) {
        self.state.set_market_loading(loading);
    }

    fn release_if_orphaned(&mut self) {
        let orphaned = match self.drag.target() {
            Some(NodeKey::Event(id)) => self.state.event(id).is_none(),
            Some(NodeKey::ObjectiveStep { objective, step }) => self
                .state
                .objective(objective)
                .map_or(true, |live| step > live.step_count()),
            None => false,
        };
        if orphaned {
            self.drag.release();
        }
    }
}
