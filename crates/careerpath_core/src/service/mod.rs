//! Use-case services over the career board.
//!
//! # Responsibility
//! - Bridge host lifecycle points (load, save) to the repository.
//! - Drive the asynchronous path generation and market analysis flows.

pub mod contracts;
pub mod planner;
