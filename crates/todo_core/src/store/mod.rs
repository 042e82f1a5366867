//! Task store abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define the positional mutation contract used by services.
//! - Keep list bookkeeping out of service/front-end code.
//!
//! # Invariants
//! - Store APIs return semantic errors (`InvalidInput`, `NotFound`).
//! - Nothing is persisted; the list dies with the process.

pub mod task_store;
