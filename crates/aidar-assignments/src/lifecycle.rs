use aidar_core::models::answer::Responses;
use aidar_core::models::assignment::{Assignment, AssignmentStatus};
use aidar_core::models::survey::Survey;
use aidar_forms::draft::ResponseDraft;
use aidar_forms::{validate_responses, RequiredPolicy};

use crate::error::AssignmentError;

/// Complete a pending assignment with `responses`.
///
/// Returns the completed assignment, or the per-question validation errors.
/// The input assignment is never modified, so a rejected submission leaves
/// it pending.
pub fn submit_response(
    assignment: &Assignment,
    survey: &Survey,
    responses: Responses,
    policy: RequiredPolicy,
    now: jiff::Timestamp,
) -> Result<Assignment, AssignmentError> {
    if assignment.is_completed() {
        return Err(AssignmentError::AlreadyCompleted);
    }
    if survey.id != Some(assignment.survey_id) {
        return Err(AssignmentError::SurveyMismatch {
            expected: assignment.survey_id,
            actual: survey.id,
        });
    }

    let errors = validate_responses(&survey.questions, &responses, policy);
    if !errors.is_valid() {
        return Err(AssignmentError::Validation(errors));
    }

    let mut completed = assignment.clone();
    completed.status = AssignmentStatus::Completed;
    completed.responses = responses;
    completed.completed_at = Some(now);
    Ok(completed)
}

/// Fields written only by assignment, submission and diffing. Direct updates
/// may not touch them.
pub const PROTECTED_FIELDS: [&str; 6] = [
    "status",
    "responses",
    "completedAt",
    "physicianId",
    "surveyId",
    "patientId",
];

/// The pending form of an incoming assignment. Whatever status, responses or
/// completion time it arrived with is dropped.
pub fn new_pending(assignment: Assignment) -> Assignment {
    Assignment::pending(
        assignment.physician_id,
        assignment.survey_id,
        assignment.patient_id,
        assignment.assigned_at,
    )
}

/// Reject a partial update that would touch a protected field.
pub fn check_update(patch: &serde_json::Value) -> Result<(), AssignmentError> {
    let Some(fields) = patch.as_object() else {
        return Ok(());
    };
    match PROTECTED_FIELDS.iter().find(|f| fields.contains_key(**f)) {
        Some(field) => Err(AssignmentError::ProtectedField(field.to_string())),
        None => Ok(()),
    }
}

/// Start a fill (pending) or a read-only review (completed) of an assignment.
pub fn open_draft(assignment: &Assignment) -> ResponseDraft {
    if assignment.is_completed() {
        ResponseDraft::view_only(assignment.responses.clone())
    } else {
        ResponseDraft::new(assignment.responses.clone())
    }
}

/// Throw away unsaved answers. The stored assignment is untouched.
pub fn reset_draft(draft: &mut ResponseDraft) {
    draft.reset();
}
