use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exact-match filter over the reference fields shared by the record kinds.
/// Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physician_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Uuid>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn survey(mut self, id: Uuid) -> Self {
        self.survey_id = Some(id);
        self
    }

    pub fn physician(mut self, id: Uuid) -> Self {
        self.physician_id = Some(id);
        self
    }

    pub fn patient(mut self, id: Uuid) -> Self {
        self.patient_id = Some(id);
        self
    }

    /// Test a stored JSON document against every set field.
    pub fn matches(&self, doc: &serde_json::Value) -> bool {
        [
            ("surveyId", self.survey_id),
            ("physicianId", self.physician_id),
            ("patientId", self.patient_id),
        ]
        .into_iter()
        .all(|(field, wanted)| match wanted {
            None => true,
            Some(id) => doc.get(field).and_then(|v| v.as_str()) == Some(id.to_string().as_str()),
        })
    }
}
