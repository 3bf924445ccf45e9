use std::collections::BTreeMap;
use std::str::FromStr;

use aidar_core::models::answer::{Answer, Responses};
use aidar_core::models::question::{Field, Question};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::error::FormError;
use crate::registry::describe;

pub const SELECT_AT_LEAST_ONE: &str = "Please select at least one option.";
pub const PROVIDE_RATING: &str = "Please provide a rating.";
pub const FIELD_REQUIRED: &str = "This field is required.";
pub const SHAPE_MISMATCH: &str = "Answer does not match the question type.";
pub const UNKNOWN_OPTION: &str = "Please select a valid option.";
pub const RATING_OUT_OF_RANGE: &str = "Rating must be between 1 and 5.";

pub const MAX_RATING: i64 = 5;

/// How `required` is enforced for `input` and `radio` questions.
///
/// `Compatible` leaves them to the form renderer, as the patient portal
/// always has; only `checkbox` and `rating` are checked here. `Strict`
/// checks every answerable field type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RequiredPolicy {
    #[default]
    Compatible,
    Strict,
}

impl FromStr for RequiredPolicy {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compatible" => Ok(RequiredPolicy::Compatible),
            "strict" => Ok(RequiredPolicy::Strict),
            other => Err(FormError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Validation messages keyed by `questionId`. Empty means the responses are
/// acceptable. Serialized, and exported to TypeScript, as the bare map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{} question(s) failed validation", .0.len())]
pub struct ResponseErrors(pub BTreeMap<String, String>);

impl ResponseErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Check `responses` against `questions`. Each question is judged on its
/// own and every failing question is reported.
pub fn validate_responses(
    questions: &[Question],
    responses: &Responses,
    policy: RequiredPolicy,
) -> ResponseErrors {
    let mut errors = BTreeMap::new();
    for question in questions {
        let answer = responses.get(&question.question_id);
        if let Some(message) = check_question(question, answer, policy) {
            errors.insert(question.question_id.clone(), message.to_string());
        }
    }
    ResponseErrors(errors)
}

fn check_question(
    question: &Question,
    answer: Option<&Answer>,
    policy: RequiredPolicy,
) -> Option<&'static str> {
    let descriptor = describe(question.field_type());

    if let Some(answer) = answer
        && descriptor.has_answer()
        && !descriptor.answer_shape.accepts(answer)
    {
        return Some(SHAPE_MISMATCH);
    }

    let missing = answer.is_none_or(Answer::is_blank);
    match &question.field {
        Field::Text => None,
        Field::Checkbox { required, options } => {
            if *required && missing {
                return Some(SELECT_AT_LEAST_ONE);
            }
            match answer {
                Some(Answer::Choices(chosen)) if chosen.iter().any(|c| !options.contains(c)) => {
                    Some(UNKNOWN_OPTION)
                }
                _ => None,
            }
        }
        Field::Rating { required } => {
            if *required && missing {
                return Some(PROVIDE_RATING);
            }
            match answer {
                // Zero is "no rating" and only matters when required.
                Some(Answer::Rating(value)) if !(0..=MAX_RATING).contains(value) => {
                    Some(RATING_OUT_OF_RANGE)
                }
                _ => None,
            }
        }
        Field::Radio { required, options } => {
            if *required && missing && policy == RequiredPolicy::Strict {
                return Some(FIELD_REQUIRED);
            }
            match answer {
                Some(Answer::Text(choice)) if !choice.is_empty() && !options.contains(choice) => {
                    Some(UNKNOWN_OPTION)
                }
                _ => None,
            }
        }
        Field::Input { required } => {
            if *required && missing && policy == RequiredPolicy::Strict {
                return Some(FIELD_REQUIRED);
            }
            None
        }
    }
}
