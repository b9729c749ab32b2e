//! Explicitly owned application state.
//!
//! # Responsibility
//! - Own timeline events, objectives and session-only market insight state.
//! - Expose every mutation through an explicit read/mutate interface so
//!   independent instances can coexist (tests, multi-session hosts).
//! - Convert to and from the persisted snapshot shape.
//!
//! # Invariants
//! - Events stay sorted by `start_year` (stable on ties).
//! - The objective count never exceeds the configured cap.
//! - Snapshots never carry loading flags, market insight or layout overrides.

pub mod events;
pub mod objectives;

use crate::config::{cycle_color, LayoutConfig};
use crate::model::event::{CareerEvent, EventId, EventPatch, EventValidationError, NewEvent};
use crate::model::insight::MarketInsight;
use crate::model::objective::{CareerPath, Objective, ObjectiveId, ObjectiveValidationError};
use events::EventSequence;
use log::{debug, info, warn};
use objectives::{AddObjective, ObjectiveSet};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Version tag embedded in persisted snapshots.
pub const SNAPSHOT_VERSION: u32 = 1;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    InvalidEvent(EventValidationError),
    InvalidObjective(ObjectiveValidationError),
    EventNotFound(EventId),
    ObjectiveNotFound(ObjectiveId),
    ObjectiveCapReached { cap: usize },
    UnsupportedSnapshotVersion(u32),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEvent(err) => write!(f, "{err}"),
            Self::InvalidObjective(err) => write!(f, "{err}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::ObjectiveNotFound(id) => write!(f, "objective not found: {id}"),
            Self::ObjectiveCapReached { cap } => {
                write!(f, "at most {cap} objectives can exist at once")
            }
            Self::UnsupportedSnapshotVersion(version) => {
                write!(f, "snapshot version {version} is newer than supported {SNAPSHOT_VERSION}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEvent(err) => Some(err),
            Self::InvalidObjective(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EventValidationError> for StoreError {
    fn from(value: EventValidationError) -> Self {
        Self::InvalidEvent(value)
    }
}

impl From<ObjectiveValidationError> for StoreError {
    fn from(value: ObjectiveValidationError) -> Self {
        Self::InvalidObjective(value)
    }
}

/// Persisted shape of the career state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub version: u32,
    pub events: Vec<CareerEvent>,
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub objective_serial: u64,
}

/// End of the timeline span shown next to the canvas title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanEnd {
    Now,
    Year(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineSpan {
    pub first_year: i32,
    pub end: SpanEnd,
}

/// Career state owned by one host session.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerState {
    events: EventSequence,
    objectives: ObjectiveSet,
    palette: Vec<String>,
    market_insight: Option<MarketInsight>,
    is_market_loading: bool,
}

impl Default for CareerState {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl CareerState {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            events: EventSequence::new(),
            objectives: ObjectiveSet::new(config.max_objectives),
            palette: config.palette.clone(),
            market_insight: None,
            is_market_loading: false,
        }
    }

    /// Rebuilds state from a persisted snapshot.
    ///
    /// # Errors
    /// - Snapshot version newer than supported.
    /// - Any event or objective failing record validation.
    /// - More objectives than the configured cap.
    pub fn from_snapshot(snapshot: StateSnapshot, config: &LayoutConfig) -> StoreResult<Self> {
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedSnapshotVersion(snapshot.version));
        }
        for event in &snapshot.events {
            event.validate()?;
        }
        for objective in &snapshot.objectives {
            objective.validate()?;
        }
        if snapshot.objectives.len() > config.max_objectives {
            return Err(StoreError::ObjectiveCapReached {
                cap: config.max_objectives,
            });
        }

        let mut objectives = snapshot.objectives;
        for objective in &mut objectives {
            objective.is_loading = false;
        }

        Ok(Self {
            events: EventSequence::from_events(snapshot.events),
            objectives: ObjectiveSet::restore(
                objectives,
                snapshot.objective_serial,
                config.max_objectives,
            ),
            palette: config.palette.clone(),
            market_insight: None,
            is_market_loading: false,
        })
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            version: SNAPSHOT_VERSION,
            events: self.events.as_slice().to_vec(),
            objectives: self.objectives.as_slice().to_vec(),
            objective_serial: self.objectives.created_serial(),
        }
    }

    // ---- events ----

    pub fn events(&self) -> &[CareerEvent] {
        self.events.as_slice()
    }

    pub fn event(&self, id: EventId) -> Option<&CareerEvent> {
        self.events.get(id)
    }

    pub fn event_position(&self, id: EventId) -> Option<usize> {
        self.events.position(id)
    }

    pub fn tail_event(&self) -> Option<&CareerEvent> {
        self.events.tail()
    }

    pub fn add_event(&mut self, draft: NewEvent) -> StoreResult<EventId> {
        let id = self.events.add(draft)?;
        info!(
            "event=event_add module=store status=ok event_id={} count={}",
            id,
            self.events.len()
        );
        Ok(id)
    }

    pub fn remove_event(&mut self, id: EventId) -> StoreResult<CareerEvent> {
        let removed = self.events.remove(id).ok_or(StoreError::EventNotFound(id))?;
        info!(
            "event=event_remove module=store status=ok event_id={} count={}",
            id,
            self.events.len()
        );
        Ok(removed)
    }

    pub fn update_event(&mut self, id: EventId, patch: &EventPatch) -> StoreResult<()> {
        if patch.is_empty() {
            return if self.events.contains(id) {
                Ok(())
            } else {
                Err(StoreError::EventNotFound(id))
            };
        }
        match self.events.update(id, patch)? {
            Some(_) => {
                debug!("event=event_update module=store status=ok event_id={id}");
                Ok(())
            }
            None => Err(StoreError::EventNotFound(id)),
        }
    }

    /// First start year through "now" (current tail) or the tail's last year.
    pub fn timeline_span(&self) -> Option<TimelineSpan> {
        let first = self.events.as_slice().first()?;
        let tail = self.events.tail()?;
        let end = if tail.is_current {
            SpanEnd::Now
        } else {
            SpanEnd::Year(tail.end_year.unwrap_or(tail.start_year))
        };
        Some(TimelineSpan {
            first_year: first.start_year,
            end,
        })
    }

    // ---- objectives ----

    pub fn objectives(&self) -> &[Objective] {
        self.objectives.as_slice()
    }

    pub fn objective(&self, id: ObjectiveId) -> Option<&Objective> {
        self.objectives.get(id)
    }

    pub fn objective_position(&self, id: ObjectiveId) -> Option<usize> {
        self.objectives.position(id)
    }

    pub fn objective_cap(&self) -> usize {
        self.objectives.cap()
    }

    /// Adds a visible objective, coloring it by creation serial.
    ///
    /// # Errors
    /// - `ObjectiveCapReached` when the cap is already met; state unchanged.
    pub fn add_objective(&mut self, title: &str, location: &str) -> StoreResult<ObjectiveId> {
        let palette = &self.palette;
        let outcome = self
            .objectives
            .add(title, location, |serial| cycle_color(palette, serial))?;
        match outcome {
            AddObjective::Added(id) => {
                info!(
                    "event=objective_add module=store status=ok objective_id={} count={}",
                    id,
                    self.objectives.len()
                );
                Ok(id)
            }
            AddObjective::CapReached => {
                warn!(
                    "event=objective_add module=store status=rejected reason=cap_reached cap={}",
                    self.objectives.cap()
                );
                Err(StoreError::ObjectiveCapReached {
                    cap: self.objectives.cap(),
                })
            }
        }
    }

    pub fn remove_objective(&mut self, id: ObjectiveId) -> StoreResult<Objective> {
        let removed = self
            .objectives
            .remove(id)
            .ok_or(StoreError::ObjectiveNotFound(id))?;
        info!(
            "event=objective_remove module=store status=ok objective_id={} count={}",
            id,
            self.objectives.len()
        );
        Ok(removed)
    }

    pub fn set_objective_path(&mut self, id: ObjectiveId, path: CareerPath) -> StoreResult<()> {
        path.validate()?;
        let steps = path.steps.len();
        if !self.objectives.set_path(id, Some(path)) {
            return Err(StoreError::ObjectiveNotFound(id));
        }
        info!("event=objective_path_set module=store status=ok objective_id={id} steps={steps}");
        Ok(())
    }

    pub fn set_objective_loading(&mut self, id: ObjectiveId, loading: bool) -> StoreResult<()> {
        if !self.objectives.set_loading(id, loading) {
            return Err(StoreError::ObjectiveNotFound(id));
        }
        Ok(())
    }

    /// Flips visibility and returns the new value.
    pub fn toggle_objective_visibility(&mut self, id: ObjectiveId) -> StoreResult<bool> {
        self.objectives
            .toggle_visibility(id)
            .ok_or(StoreError::ObjectiveNotFound(id))
    }

    /// Number of objectives whose path has been generated.
    pub fn generated_path_count(&self) -> usize {
        self.objectives
            .iter()
            .filter(|objective| objective.path.is_some())
            .count()
    }

    // ---- market insight ----

    pub fn market_insight(&self) -> Option<&MarketInsight> {
        self.market_insight.as_ref()
    }

    pub fn set_market_insight(&mut self, insight: Option<MarketInsight>) {
        self.market_insight = insight;
    }

    pub fn is_market_loading(&self) -> bool {
        self.is_market_loading
    }

    pub fn set_market_loading(&mut self, loading: bool) {
        self.is_market_loading = loading;
    }
}
