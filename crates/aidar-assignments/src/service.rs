use std::collections::HashMap;
use std::sync::Arc;

use aidar_core::models::answer::Responses;
use aidar_core::models::assignment::Assignment;
use aidar_core::models::patient::Patient;
use aidar_core::models::physician::Physician;
use aidar_core::models::survey::Survey;
use aidar_forms::RequiredPolicy;
use aidar_storage::{Filter, Store};
use serde::Serialize;
use uuid::Uuid;

use crate::diff::{compute_diff, AssignmentDiff, AssignmentTarget};
use crate::error::AssignmentError;
use crate::lifecycle::{check_update, new_pending, submit_response};
use crate::views::{AssignedSurvey, PatientAssignment, PatientSurveys, SurveyOverview};

/// Result of persisting an [`AssignmentDiff`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffOutcome {
    pub created: Vec<Assignment>,
    pub removed: Vec<Uuid>,
}

impl DiffOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }
}

/// Assignment operations against a record store.
pub struct AssignmentService<S> {
    store: Arc<S>,
    policy: RequiredPolicy,
}

impl<S: Store> AssignmentService<S> {
    pub fn new(store: Arc<S>, policy: RequiredPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> RequiredPolicy {
        self.policy
    }

    /// Every patient, regardless of assignment state.
    pub async fn list_candidate_patients(&self) -> Result<Vec<Patient>, AssignmentError> {
        Ok(self.store.list(Filter::new()).await?)
    }

    pub async fn load_assignments(
        &self,
        survey_id: Uuid,
        physician_id: Uuid,
    ) -> Result<Vec<Assignment>, AssignmentError> {
        let filter = Filter::new().survey(survey_id).physician(physician_id);
        Ok(self.store.list(filter).await?)
    }

    /// Store new assignments. They always start pending.
    pub async fn create(
        &self,
        assignments: Vec<Assignment>,
    ) -> Result<Vec<Assignment>, AssignmentError> {
        let pending = assignments.into_iter().map(new_pending).collect();
        Ok(self.store.create_bulk(pending).await?)
    }

    /// Partial update of the fields outside the lifecycle.
    pub async fn update(
        &self,
        assignment_id: Uuid,
        patch: serde_json::Value,
    ) -> Result<Assignment, AssignmentError> {
        check_update(&patch)?;
        Ok(self.store.update(assignment_id, patch).await?)
    }

    /// Create, then remove. Each side is a single bulk call and is skipped
    /// when empty.
    pub async fn apply_diff(&self, diff: AssignmentDiff) -> Result<DiffOutcome, AssignmentError> {
        let created = if diff.to_create.is_empty() {
            Vec::new()
        } else {
            self.store.create_bulk(diff.to_create).await?
        };
        if !diff.to_remove.is_empty() {
            self.store
                .remove_bulk::<Assignment>(&diff.to_remove)
                .await?;
        }

        tracing::info!(
            created = created.len(),
            removed = diff.to_remove.len(),
            "assignments changed"
        );
        Ok(DiffOutcome {
            created,
            removed: diff.to_remove,
        })
    }

    /// Make the survey's assignments match `selected`.
    pub async fn assign(
        &self,
        target: AssignmentTarget,
        selected: &[Uuid],
    ) -> Result<DiffOutcome, AssignmentError> {
        let previous = self
            .load_assignments(target.survey_id, target.physician_id)
            .await?;
        let diff = compute_diff(selected, &previous, target, jiff::Timestamp::now());
        self.apply_diff(diff).await
    }

    /// Validate and store a patient's responses, completing the assignment.
    ///
    /// Checks against the stored assignment, so a second submission of the
    /// same assignment fails with `AlreadyCompleted`.
    pub async fn submit(
        &self,
        assignment_id: Uuid,
        responses: Responses,
    ) -> Result<Assignment, AssignmentError> {
        let assignment: Assignment = self.store.get(assignment_id).await?;
        let survey: Survey = self.store.get(assignment.survey_id).await?;

        let completed = submit_response(
            &assignment,
            &survey,
            responses,
            self.policy,
            jiff::Timestamp::now(),
        )?;

        let patch = serde_json::json!({
            "status": completed.status,
            "responses": completed.responses,
            "completedAt": completed.completed_at,
        });
        let stored: Assignment = self.store.update(assignment_id, patch).await?;

        tracing::info!(%assignment_id, survey_id = %stored.survey_id, "responses submitted");
        Ok(stored)
    }

    /// A patient's assignments with their surveys, split by status.
    ///
    /// Assignments whose survey no longer exists are left out.
    pub async fn load_for_patient(&self, patient_id: Uuid) -> Result<PatientSurveys, AssignmentError> {
        let mut assignments: Vec<Assignment> =
            self.store.list(Filter::new().patient(patient_id)).await?;
        assignments.sort_by_key(|a| a.assigned_at);

        let physicians: HashMap<Uuid, Physician> = self
            .store
            .list::<Physician>(Filter::new())
            .await?
            .into_iter()
            .filter_map(|p| Some((p.id?, p)))
            .collect();

        let mut view = PatientSurveys::default();
        for assignment in assignments {
            let survey: Survey = match self.store.get(assignment.survey_id).await {
                Ok(survey) => survey,
                Err(e) if e.is_not_found() => {
                    tracing::warn!(
                        assignment_id = ?assignment.id,
                        survey_id = %assignment.survey_id,
                        "assignment refers to a missing survey"
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let physician = physicians.get(&assignment.physician_id).cloned();
            let completed = assignment.is_completed();
            let entry = AssignedSurvey {
                assignment,
                survey,
                physician,
            };
            if completed {
                view.completed.push(entry);
            } else {
                view.pending.push(entry);
            }
        }
        Ok(view)
    }

    /// A physician's surveys, each with its assignments and patients.
    pub async fn survey_overview(
        &self,
        physician_id: Uuid,
    ) -> Result<Vec<SurveyOverview>, AssignmentError> {
        let filter = Filter::new().physician(physician_id);
        let mut surveys: Vec<Survey> = self.store.list(filter).await?;
        surveys.sort_by_key(|s| s.created_at);
        let mut assignments: Vec<Assignment> = self.store.list(filter).await?;
        assignments.sort_by_key(|a| a.assigned_at);

        let patients: HashMap<Uuid, Patient> = self
            .store
            .list::<Patient>(Filter::new())
            .await?
            .into_iter()
            .filter_map(|p| Some((p.id?, p)))
            .collect();

        Ok(surveys
            .into_iter()
            .map(|survey| {
                let assignments = assignments
                    .iter()
                    .filter(|a| Some(a.survey_id) == survey.id)
                    .map(|a| PatientAssignment {
                        assignment: a.clone(),
                        patient: patients.get(&a.patient_id).cloned(),
                    })
                    .collect();
                SurveyOverview {
                    survey,
                    assignments,
                }
            })
            .collect())
    }
}
