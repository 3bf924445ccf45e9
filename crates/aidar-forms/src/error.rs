use thiserror::Error;

use crate::validation::ResponseErrors;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("survey is open in view-only mode")]
    ViewOnly,

    #[error(transparent)]
    Validation(#[from] ResponseErrors),

    #[error("unknown required-field policy: {0}")]
    UnknownPolicy(String),
}
