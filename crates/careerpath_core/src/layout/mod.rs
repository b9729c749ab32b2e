//! Layout engine: synthesis, curves, overrides and scene composition.
//!
//! # Responsibility
//! - Turn the career state and a canvas size into drawable geometry.
//! - Keep synthesized layouts and user overrides separate until render.
//!
//! # Invariants
//! - Synthesis and curve building are pure and never fail.
//! - Overrides are composed at render time, never merged into base layouts.

pub mod curve;
pub mod overrides;
pub mod scene;
pub mod waypoints;
