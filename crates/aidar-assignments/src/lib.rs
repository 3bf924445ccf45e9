//! aidar-assignments
//!
//! Assigning saved surveys to patients and collecting their responses.

pub mod diff;
pub mod error;
pub mod lifecycle;
pub mod service;
pub mod views;

pub use diff::{compute_diff, AssignmentDiff, AssignmentTarget, PatientSelection};
pub use lifecycle::{check_update, new_pending, open_draft, reset_draft, submit_response};
pub use service::{AssignmentService, DiffOutcome};
