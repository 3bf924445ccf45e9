use std::collections::HashSet;

use aidar_core::models::assignment::Assignment;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AssignmentError;

/// The survey and physician new assignments are created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentTarget {
    pub physician_id: Uuid,
    pub survey_id: Uuid,
}

/// What to persist after the physician changes the patient selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDiff {
    pub to_create: Vec<Assignment>,
    /// Assignment ids, not patient ids.
    pub to_remove: Vec<Uuid>,
}

impl AssignmentDiff {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_remove.is_empty()
    }
}

/// Symmetric difference between the selected patients and the existing
/// assignments. Newly selected patients get a pending assignment; existing
/// assignments whose patient was deselected are removed, except completed
/// ones, which are always kept.
pub fn compute_diff(
    selected: &[Uuid],
    previous: &[Assignment],
    target: AssignmentTarget,
    now: jiff::Timestamp,
) -> AssignmentDiff {
    let assigned: HashSet<Uuid> = previous.iter().map(|a| a.patient_id).collect();
    let wanted: HashSet<Uuid> = selected.iter().copied().collect();

    let mut seen = HashSet::new();
    let to_create = selected
        .iter()
        .filter(|patient| !assigned.contains(*patient) && seen.insert(**patient))
        .map(|patient| Assignment::pending(target.physician_id, target.survey_id, *patient, now))
        .collect();

    let to_remove = previous
        .iter()
        .filter(|a| !wanted.contains(&a.patient_id) && !a.is_completed())
        .filter_map(|a| a.id)
        .collect();

    AssignmentDiff {
        to_create,
        to_remove,
    }
}

/// Checkbox state of the patient picker.
///
/// Starts from the existing assignments. Patients whose assignment is
/// completed are locked in and cannot be toggled off.
#[derive(Debug, Clone, Default)]
pub struct PatientSelection {
    selected: Vec<Uuid>,
    locked: HashSet<Uuid>,
}

impl PatientSelection {
    pub fn from_assignments(previous: &[Assignment]) -> Self {
        let mut selection = Self::default();
        for assignment in previous {
            if !selection.selected.contains(&assignment.patient_id) {
                selection.selected.push(assignment.patient_id);
            }
            if assignment.is_completed() {
                selection.locked.insert(assignment.patient_id);
            }
        }
        selection
    }

    pub fn is_selected(&self, patient_id: Uuid) -> bool {
        self.selected.contains(&patient_id)
    }

    pub fn is_locked(&self, patient_id: Uuid) -> bool {
        self.locked.contains(&patient_id)
    }

    /// Flip one patient. Returns whether the patient is now selected.
    pub fn toggle(&mut self, patient_id: Uuid) -> Result<bool, AssignmentError> {
        if self.is_locked(patient_id) {
            return Err(AssignmentError::Locked(patient_id));
        }
        if let Some(index) = self.selected.iter().position(|p| *p == patient_id) {
            self.selected.remove(index);
            Ok(false)
        } else {
            self.selected.push(patient_id);
            Ok(true)
        }
    }

    pub fn selected(&self) -> &[Uuid] {
        &self.selected
    }
}
