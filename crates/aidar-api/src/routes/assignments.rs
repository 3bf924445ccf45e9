use aidar_assignments::{AssignmentTarget, DiffOutcome};
use aidar_core::models::answer::Responses;
use aidar_core::models::assignment::Assignment;
use aidar_core::models::survey::Survey;
use aidar_storage::Store;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::records::{self, Items};
use crate::error::ApiError;
use crate::state::AppState;

/// Assignment routes. Reads and deletes are the generic ones; writes keep
/// status, responses and references under the lifecycle's control.
pub fn routes<S: Store + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/",
            get(records::list::<S, Assignment>).post(create_assignment::<S>),
        )
        .route(
            "/bulk",
            post(create_assignments::<S>).delete(records::remove_bulk::<S, Assignment>),
        )
        .route(
            "/{id}",
            get(records::get_one::<S, Assignment>)
                .put(update_assignment::<S>)
                .delete(records::remove::<S, Assignment>),
        )
        .route("/{id}/submit", post(submit::<S>))
}

pub async fn create_assignment<S: Store>(
    State(state): State<AppState<S>>,
    Json(assignment): Json<Assignment>,
) -> Result<(StatusCode, Json<Assignment>), ApiError> {
    let mut created = state.assignments().create(vec![assignment]).await?;
    let created = created
        .pop()
        .ok_or_else(|| ApiError::Internal("assignment was not created".to_string()))?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_assignments<S: Store>(
    State(state): State<AppState<S>>,
    Json(body): Json<Items<Assignment>>,
) -> Result<(StatusCode, Json<Vec<Assignment>>), ApiError> {
    let created = state.assignments().create(body.items).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update. Completion goes through `/submit` instead.
pub async fn update_assignment<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<Assignment>, ApiError> {
    Ok(Json(state.assignments().update(id, patch).await?))
}

#[derive(Debug, Deserialize)]
pub struct SubmitBody {
    #[serde(default)]
    pub responses: Responses,
}

/// Validate and store a patient's responses.
pub async fn submit<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SubmitBody>,
) -> Result<Json<Assignment>, ApiError> {
    let completed = state.assignments().submit(id, body.responses).await?;
    Ok(Json(completed))
}

/// The full patient selection for one survey.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionBody {
    pub patient_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AssignReply {
    #[serde(flatten)]
    pub outcome: DiffOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub const NOTHING_TO_CHANGE: &str = "No new assignments to add.";

/// Replace the survey's patient selection. Completed assignments are kept
/// whatever the selection says.
pub async fn assign<S: Store>(
    State(state): State<AppState<S>>,
    Path(survey_id): Path<Uuid>,
    Json(body): Json<SelectionBody>,
) -> Result<Json<AssignReply>, ApiError> {
    let survey: Survey = state.store.get(survey_id).await?;
    let target = AssignmentTarget {
        physician_id: survey.owner_id,
        survey_id,
    };

    let outcome = state.assignments().assign(target, &body.patient_ids).await?;
    let message = outcome.is_unchanged().then_some(NOTHING_TO_CHANGE);
    Ok(Json(AssignReply { outcome, message }))
}
