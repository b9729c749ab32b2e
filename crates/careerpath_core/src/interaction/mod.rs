//! Host-facing interaction: canvas measurement and node dragging.

pub mod canvas;
pub mod drag;
