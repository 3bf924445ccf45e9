use aidar_assignments::views::{PatientSurveys, SurveyOverview};
use aidar_core::models::patient::Patient;
use aidar_core::models::physician::Physician;
use aidar_storage::Store;
use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use super::records::Data;
use crate::error::ApiError;
use crate::state::AppState;

/// A patient's pending and completed surveys.
pub async fn patient_surveys<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Data<PatientSurveys>>, ApiError> {
    state.store.get::<Patient>(id).await?;
    let data = state.assignments().load_for_patient(id).await?;
    Ok(Json(Data { data }))
}

/// A physician's surveys with their assignments.
pub async fn physician_overview<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Data<Vec<SurveyOverview>>>, ApiError> {
    state.store.get::<Physician>(id).await?;
    let data = state.assignments().survey_overview(id).await?;
    Ok(Json(Data { data }))
}
