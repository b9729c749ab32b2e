//! Persistence boundary for the career record.
//!
//! # Responsibility
//! - Define the load/save contract the host invokes at lifecycle points.
//! - Keep SQL and JSON encoding details inside the core.
//!
//! # Invariants
//! - One namespaced record holds events and objectives; nothing else.
//! - Reads reject undecodable payloads instead of masking them.

pub mod state_repo;
