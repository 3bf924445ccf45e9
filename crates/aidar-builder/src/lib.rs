//! aidar-builder
//!
//! Survey authoring: draft creation, question editing, validation before
//! save, persistence, and survey deletion.

pub mod deletion;
pub mod engine;
pub mod error;
pub mod events;
pub mod palette;
pub mod session;
pub mod validate;

pub use engine::{EditOutcome, QuestionPatch};
pub use session::BuilderSession;
pub use validate::{validate, SurveyProblem};
