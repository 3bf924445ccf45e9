use aidar_forms::ResponseErrors;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("assignment is already completed")]
    AlreadyCompleted,

    #[error("assignment is for survey {expected}, got survey {actual:?}")]
    SurveyMismatch { expected: Uuid, actual: Option<Uuid> },

    #[error("{0} is managed by the assignment lifecycle and cannot be updated")]
    ProtectedField(String),

    #[error("patient {0} has a completed assignment and cannot be unassigned")]
    Locked(Uuid),

    #[error(transparent)]
    Validation(#[from] ResponseErrors),

    #[error("storage error: {0}")]
    Storage(#[from] aidar_storage::error::StorageError),
}
