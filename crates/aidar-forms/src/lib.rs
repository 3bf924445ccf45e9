//! aidar-forms
//!
//! Question field definitions and response validation. Pure data, no I/O.
//! Describes the shape and required-field rules of each field type, checks a
//! patient's answers against a survey's questions, and tracks in-progress
//! answers while a survey is being filled.

pub mod draft;
pub mod error;
pub mod registry;
pub mod validation;

pub use registry::{describe, palette};
pub use validation::{validate_responses, RequiredPolicy, ResponseErrors};
