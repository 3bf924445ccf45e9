use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A patient's answer to one question. The shape depends on the question's
/// field type: free text or a radio choice is a string, checkbox selections
/// are an ordered list of option strings, and a star rating is an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
    /// Any integer is accepted here; the 1 to 5 range is checked by the
    /// response validator so it can be reported per question.
    Rating(i64),
}

impl Answer {
    /// True when the answer carries nothing: an empty string, no selected
    /// options, or a zero rating.
    pub fn is_blank(&self) -> bool {
        match self {
            Answer::Text(text) => text.trim().is_empty(),
            Answer::Choices(choices) => choices.is_empty(),
            Answer::Rating(value) => *value == 0,
        }
    }
}

/// Answers keyed by `questionId`.
pub type Responses = BTreeMap<String, Answer>;
