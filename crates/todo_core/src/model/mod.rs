//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Tasks live only in memory for the lifetime of one session.

pub mod task;
