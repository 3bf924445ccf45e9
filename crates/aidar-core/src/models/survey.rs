use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::question::Question;

/// Title given to a fresh draft.
pub const UNTITLED_SURVEY: &str = "Untitled Survey";

/// A named, ordered collection of questions authored by a physician.
///
/// `id` is absent until the first save. Question order is presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Survey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Authoring physician. Stored as `physicianId` so surveys share the
    /// physician filter key with assignments.
    #[serde(rename = "physicianId")]
    pub owner_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<jiff::Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<jiff::Timestamp>,
}

impl Survey {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.question_id == question_id)
    }

    pub fn position(&self, question_id: &str) -> Option<usize> {
        self.questions
            .iter()
            .position(|q| q.question_id == question_id)
    }
}
