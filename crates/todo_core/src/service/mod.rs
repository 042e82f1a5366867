//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and reminder scheduling into use-case APIs.
//! - Keep front-ends decoupled from store and notification details.

pub mod task_service;
