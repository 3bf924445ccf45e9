use aidar_core::models::assignment::Assignment;
use aidar_core::models::patient::Patient;
use aidar_core::models::physician::Physician;
use aidar_core::models::survey::Survey;
use serde::Serialize;

/// An assignment with the survey it refers to, as a patient sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedSurvey {
    pub assignment: Assignment,
    pub survey: Survey,
    pub physician: Option<Physician>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientSurveys {
    pub pending: Vec<AssignedSurvey>,
    pub completed: Vec<AssignedSurvey>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAssignment {
    pub assignment: Assignment,
    pub patient: Option<Patient>,
}

/// One of a physician's surveys with everyone it is assigned to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyOverview {
    pub survey: Survey,
    pub assignments: Vec<PatientAssignment>,
}
