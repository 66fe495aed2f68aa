//! Shiftcert - trainee certification tracking for restaurant floor staff
//!
//! This library provides the core functionality for the shiftcert CLI, including:
//! - Schema definitions for trainees, shift slots, checklists, tests and rosters
//! - A pure workflow engine for scheduling, claims, sign-off and certification
//! - Trainer effectiveness scoring
//! - Persistence traits with in-memory and JSON file implementations

pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod store;

// Re-export commonly used types
pub use domain::TransitionResult;
pub use errors::{Result, ShiftcertError};
pub use schemas::{Config, RecordSet, ShiftKey, ShiftSlot, TraineeRecord};
