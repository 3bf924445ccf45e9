use aidar_core::models::assignment::Assignment;
use aidar_core::models::survey::Survey;
use aidar_storage::{Filter, Store};
use uuid::Uuid;

use crate::error::BuilderError;
use crate::events::{SurveyEvent, SurveyEvents};

/// Delete a survey together with its pending assignments.
///
/// Refused while any completed assignment references the survey, since that
/// would orphan submitted responses. Returns the number of pending
/// assignments removed.
pub async fn delete_survey<S: Store>(
    store: &S,
    events: &SurveyEvents,
    survey_id: Uuid,
) -> Result<usize, BuilderError> {
    store.get::<Survey>(survey_id).await?;

    let assignments: Vec<Assignment> = store.list(Filter::new().survey(survey_id)).await?;
    let completed = assignments.iter().filter(|a| a.is_completed()).count();
    if completed > 0 {
        return Err(BuilderError::HasCompletedAssignments {
            survey_id,
            completed,
        });
    }

    let pending: Vec<Uuid> = assignments.iter().filter_map(|a| a.id).collect();
    if !pending.is_empty() {
        store.remove_bulk::<Assignment>(&pending).await?;
    }
    store.remove::<Survey>(survey_id).await?;
    events.publish(SurveyEvent::Deleted(survey_id));

    tracing::info!(%survey_id, removed_assignments = pending.len(), "survey deleted");
    Ok(pending.len())
}
