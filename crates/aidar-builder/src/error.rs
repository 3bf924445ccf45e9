use aidar_core::models::question::FieldType;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("position {index} is outside 0..={max}")]
    InvalidPosition { index: usize, max: usize },

    #[error("question not found: {0}")]
    QuestionNotFound(String),

    #[error("{field_type} questions have no options")]
    OptionsNotSupported { field_type: FieldType },

    #[error("{field_type} questions cannot be required")]
    RequiredNotSupported { field_type: FieldType },

    #[error("survey title cannot be empty")]
    EmptyTitle,

    #[error("{0}")]
    ValidationFailed(String),

    #[error("survey {survey_id} has {completed} completed assignment(s)")]
    HasCompletedAssignments { survey_id: Uuid, completed: usize },

    #[error("saved survey came back without an id")]
    MissingId,

    #[error("storage error: {0}")]
    Storage(#[from] aidar_storage::error::StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
