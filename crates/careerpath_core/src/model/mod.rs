//! Domain model for timeline events, objectives and canvas geometry.
//!
//! # Responsibility
//! - Define the canonical records owned by the career state.
//! - Keep wire naming aligned with the host and the generation services.
//!
//! # Invariants
//! - Every event and objective is identified by a stable UUID.
//! - `Point` values are never persisted; they are produced by layout or drag.

pub mod event;
pub mod geometry;
pub mod insight;
pub mod objective;
