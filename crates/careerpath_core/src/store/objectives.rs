//! Bounded set of objectives.
//!
//! # Invariants
//! - At most `cap` objectives exist at once; extra adds are rejected.
//! - Colors cycle through the palette by creation serial, which only grows.

use crate::model::objective::{CareerPath, Objective, ObjectiveId, ObjectiveValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveSet {
    objectives: Vec<Objective>,
    created: u64,
    cap: usize,
}

/// Outcome of an add attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AddObjective {
    Added(ObjectiveId),
    CapReached,
}

impl ObjectiveSet {
    pub fn new(cap: usize) -> Self {
        Self {
            objectives: Vec::new(),
            created: 0,
            cap,
        }
    }

    /// Rebuilds a set from persisted parts.
    ///
    /// The serial is raised to at least the objective count so colors of new
    /// objectives keep cycling forward.
    pub fn restore(objectives: Vec<Objective>, created: u64, cap: usize) -> Self {
        let created = created.max(objectives.len() as u64);
        Self {
            objectives,
            created,
            cap,
        }
    }

    pub fn add(
        &mut self,
        title: &str,
        location: &str,
        palette_color: impl FnOnce(u64) -> String,
    ) -> Result<AddObjective, ObjectiveValidationError> {
        if self.objectives.len() >= self.cap {
            return Ok(AddObjective::CapReached);
        }
        let color = palette_color(self.created);
        let objective = Objective::new(title, location, color)?;
        let id = objective.id;
        self.objectives.push(objective);
        self.created += 1;
        Ok(AddObjective::Added(id))
    }

    pub fn remove(&mut self, id: ObjectiveId) -> Option<Objective> {
        let index = self.position(id)?;
        Some(self.objectives.remove(index))
    }

    /// Replaces the generated path. Returns `false` when `id` is unknown.
    pub fn set_path(&mut self, id: ObjectiveId, path: Option<CareerPath>) -> bool {
        self.with_objective(id, |objective| objective.path = path)
    }

    pub fn set_loading(&mut self, id: ObjectiveId, loading: bool) -> bool {
        self.with_objective(id, |objective| objective.is_loading = loading)
    }

    /// Flips visibility; returns the new value.
    pub fn toggle_visibility(&mut self, id: ObjectiveId) -> Option<bool> {
        let objective = self.objectives.iter_mut().find(|objective| objective.id == id)?;
        objective.is_visible = !objective.is_visible;
        Some(objective.is_visible)
    }

    pub fn get(&self, id: ObjectiveId) -> Option<&Objective> {
        self.objectives.iter().find(|objective| objective.id == id)
    }

    /// Position in creation order; also the lane/phase index for layout.
    pub fn position(&self, id: ObjectiveId) -> Option<usize> {
        self.objectives.iter().position(|objective| objective.id == id)
    }

    pub fn contains(&self, id: ObjectiveId) -> bool {
        self.position(id).is_some()
    }

    pub fn as_slice(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn iter(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.iter()
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn created_serial(&self) -> u64 {
        self.created
    }

    fn with_objective(&mut self, id: ObjectiveId, apply: impl FnOnce(&mut Objective)) -> bool {
        match self.objectives.iter_mut().find(|objective| objective.id == id) {
            Some(objective) => {
                apply(objective);
                true
            }
            None => false,
        }
    }
}
