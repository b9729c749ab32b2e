//! Core layout and interaction engine for the career timeline canvas.
//! This crate owns career state, path synthesis, overrides and dragging;
//! hosts only paint the scene and forward input.

pub mod board;
pub mod config;
pub mod db;
pub mod interaction;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use board::CareerBoard;
pub use config::{ConfigError, LayoutConfig};
pub use interaction::canvas::{CanvasSizer, ContainerRect, ResizeOutcome};
pub use interaction::drag::{DragCommit, DragController, DragState};
pub use layout::curve::{approximate_path_length, build_sinuous_path, CurveDescriptor};
pub use layout::overrides::{NodeKey, OverrideLayer};
pub use layout::scene::{compose_scene, Scene};
pub use layout::waypoints::{compute_event_waypoints, compute_objective_waypoints};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{CareerEvent, EventId, EventKind, EventPatch, NewEvent};
pub use model::geometry::Point;
pub use model::objective::{CareerPath, Objective, ObjectiveId, PathStep, StepKind};
pub use repo::state_repo::{
    RepoError, RepoResult, SqliteStateRepository, StateRepository, DEFAULT_NAMESPACE,
};
pub use service::planner::{CareerService, ServiceError, ServiceResult};
pub use store::{CareerState, StoreError, StoreResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
