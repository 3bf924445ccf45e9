//! Survey editing operations.
//!
//! Every operation takes the current survey by reference and returns a new
//! one; the input is never modified. A caller holding the survey replaces
//! its copy wholesale, so an edit either lands completely or not at all.

use aidar_core::models::question::{Field, FieldType};
use aidar_core::models::survey::{Survey, UNTITLED_SURVEY};
use aidar_forms::describe;
use aidar_storage::Store;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BuilderError;
use crate::palette;
use crate::validate::validate;

/// Partial question edit. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl QuestionPatch {
    pub fn is_empty(&self) -> bool {
        self.question_text.is_none() && self.required.is_none() && self.options.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Changed(Survey),
    /// The patch matched the question field for field.
    Unchanged,
}

/// A fresh unsaved survey owned by `owner_id`.
pub fn create_draft(owner_id: Uuid) -> Survey {
    Survey {
        id: None,
        owner_id,
        title: UNTITLED_SURVEY.to_string(),
        questions: Vec::new(),
        created_at: None,
        modified_at: None,
    }
}

pub fn rename(survey: &Survey, title: &str) -> Result<Survey, BuilderError> {
    if title.trim().is_empty() {
        return Err(BuilderError::EmptyTitle);
    }
    let mut next = survey.clone();
    next.title = title.to_string();
    Ok(next)
}

/// Insert a new question of `field_type` at `at`, anywhere in `0..=len`.
pub fn add_question(
    survey: &Survey,
    field_type: FieldType,
    at: usize,
    now: jiff::Timestamp,
) -> Result<Survey, BuilderError> {
    let len = survey.questions.len();
    if at > len {
        return Err(BuilderError::InvalidPosition { index: at, max: len });
    }
    let question = palette::new_question(survey, field_type, now);
    let mut next = survey.clone();
    next.questions.insert(at, question);
    Ok(next)
}

pub fn remove_question(survey: &Survey, question_id: &str) -> Result<Survey, BuilderError> {
    let index = survey
        .position(question_id)
        .ok_or_else(|| BuilderError::QuestionNotFound(question_id.to_string()))?;
    let mut next = survey.clone();
    next.questions.remove(index);
    Ok(next)
}

/// Move the question at `from` so it ends up at `to`.
pub fn reorder_question(survey: &Survey, from: usize, to: usize) -> Result<Survey, BuilderError> {
    let len = survey.questions.len();
    for index in [from, to] {
        if index >= len {
            return Err(BuilderError::InvalidPosition {
                index,
                max: len.saturating_sub(1),
            });
        }
    }
    let mut next = survey.clone();
    let moved = next.questions.remove(from);
    next.questions.insert(to, moved);
    Ok(next)
}

pub fn edit_question(
    survey: &Survey,
    question_id: &str,
    patch: &QuestionPatch,
) -> Result<EditOutcome, BuilderError> {
    let index = survey
        .position(question_id)
        .ok_or_else(|| BuilderError::QuestionNotFound(question_id.to_string()))?;
    let current = &survey.questions[index];
    let field_type = current.field_type();
    let descriptor = describe(field_type);

    if patch.options.is_some() && !descriptor.has_options {
        return Err(BuilderError::OptionsNotSupported { field_type });
    }
    if patch.required.is_some() && !descriptor.participates_in_required {
        return Err(BuilderError::RequiredNotSupported { field_type });
    }

    let mut edited = current.clone();
    if let Some(text) = &patch.question_text {
        edited.question_text.clone_from(text);
    }
    match &mut edited.field {
        Field::Text => {}
        Field::Input { required } | Field::Rating { required } => {
            if let Some(value) = patch.required {
                *required = value;
            }
        }
        Field::Radio { required, options } | Field::Checkbox { required, options } => {
            if let Some(value) = patch.required {
                *required = value;
            }
            if let Some(values) = &patch.options {
                options.clone_from(values);
            }
        }
    }

    if edited == *current {
        return Ok(EditOutcome::Unchanged);
    }
    let mut next = survey.clone();
    next.questions[index] = edited;
    Ok(EditOutcome::Changed(next))
}

/// Validate and persist. Creates the record when the survey has no id yet,
/// otherwise updates it in place. Returns the survey as stored.
pub async fn save<S: Store>(
    store: &S,
    survey: &Survey,
    now: jiff::Timestamp,
) -> Result<Survey, BuilderError> {
    validate(survey).map_err(|problem| BuilderError::ValidationFailed(problem.to_string()))?;

    let mut next = survey.clone();
    let first_stamp = next.created_at.is_none();
    next.created_at.get_or_insert(now);
    next.modified_at = Some(now);

    let saved = match next.id {
        None => store.create(next).await?,
        Some(id) => {
            let mut patch = serde_json::json!({
                "title": next.title,
                "questions": next.questions,
                "modifiedAt": next.modified_at,
            });
            if first_stamp {
                patch["createdAt"] = serde_json::to_value(next.created_at)?;
            }
            store.update::<Survey>(id, patch).await?
        }
    };

    tracing::info!(
        survey_id = ?saved.id,
        questions = saved.questions.len(),
        "survey saved"
    );
    Ok(saved)
}

/// Validate and create several new surveys at once. Nothing is written
/// unless every survey passes; the first failure is reported.
pub async fn save_all<S: Store>(
    store: &S,
    surveys: Vec<Survey>,
    now: jiff::Timestamp,
) -> Result<Vec<Survey>, BuilderError> {
    let mut fresh = Vec::with_capacity(surveys.len());
    for mut survey in surveys {
        validate(&survey).map_err(|problem| BuilderError::ValidationFailed(problem.to_string()))?;
        survey.id = None;
        survey.created_at = Some(now);
        survey.modified_at = Some(now);
        fresh.push(survey);
    }

    let saved = store.create_bulk(fresh).await?;
    tracing::info!(count = saved.len(), "surveys saved");
    Ok(saved)
}
