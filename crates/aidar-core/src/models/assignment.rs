use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::answer::Responses;

/// Fill status of an assignment. Moves from pending to completed once and
/// never back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AssignmentStatus {
    #[default]
    Pending,
    Completed,
}

/// The binding of one survey to one patient under one physician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Assignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub physician_id: Uuid,
    pub survey_id: Uuid,
    pub patient_id: Uuid,
    #[serde(default)]
    pub status: AssignmentStatus,
    #[serde(default)]
    pub responses: Responses,
    pub assigned_at: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<jiff::Timestamp>,
}

impl Assignment {
    /// A fresh pending assignment with no responses.
    pub fn pending(
        physician_id: Uuid,
        survey_id: Uuid,
        patient_id: Uuid,
        assigned_at: jiff::Timestamp,
    ) -> Self {
        Self {
            id: None,
            physician_id,
            survey_id,
            patient_id,
            status: AssignmentStatus::Pending,
            responses: Responses::new(),
            assigned_at,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == AssignmentStatus::Completed
    }
}
