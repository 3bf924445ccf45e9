//! Survey routes. Reads are the generic ones; every write goes through the
//! builder's validate-and-save, and deletion applies the
//! completed-assignment guard.

use aidar_builder::deletion::delete_survey;
use aidar_builder::engine;
use aidar_builder::error::BuilderError;
use aidar_builder::events::SurveyEvent;
use aidar_core::models::question::Question;
use aidar_core::models::survey::Survey;
use aidar_storage::Store;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::records::{self, Items, Message};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes<S: Store + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/",
            get(records::list::<S, Survey>).post(create_survey::<S>),
        )
        .route(
            "/bulk",
            post(create_surveys::<S>).delete(delete_surveys::<S>),
        )
        .route(
            "/{id}",
            get(records::get_one::<S, Survey>)
                .put(update_survey::<S>)
                .delete(delete_one::<S>),
        )
}

/// Fields a builder sends when saving an existing survey. Absent fields
/// keep their stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyEdit {
    pub title: Option<String>,
    pub questions: Option<Vec<Question>>,
}

async fn save_and_announce<S: Store>(
    state: &AppState<S>,
    survey: &Survey,
) -> Result<Survey, ApiError> {
    let saved = engine::save(state.store.as_ref(), survey, jiff::Timestamp::now()).await?;
    let id = saved.id.ok_or(BuilderError::MissingId)?;
    state.events.publish(SurveyEvent::Saved(id));
    Ok(saved)
}

pub async fn create_survey<S: Store>(
    State(state): State<AppState<S>>,
    Json(mut survey): Json<Survey>,
) -> Result<(StatusCode, Json<Survey>), ApiError> {
    survey.id = None;
    survey.created_at = None;
    let saved = save_and_announce(&state, &survey).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// All or nothing: one invalid survey rejects the batch.
pub async fn create_surveys<S: Store>(
    State(state): State<AppState<S>>,
    Json(body): Json<Items<Survey>>,
) -> Result<(StatusCode, Json<Vec<Survey>>), ApiError> {
    let saved = engine::save_all(state.store.as_ref(), body.items, jiff::Timestamp::now()).await?;
    for id in saved.iter().filter_map(|s| s.id) {
        state.events.publish(SurveyEvent::Saved(id));
    }
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn update_survey<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    Json(edit): Json<SurveyEdit>,
) -> Result<Json<Survey>, ApiError> {
    let mut survey: Survey = state.store.get(id).await?;
    if let Some(title) = edit.title {
        survey.title = title;
    }
    if let Some(questions) = edit.questions {
        survey.questions = questions;
    }
    Ok(Json(save_and_announce(&state, &survey).await?))
}

pub async fn delete_one<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    delete_survey(state.store.as_ref(), &state.events, id).await?;
    Ok(Message::deleted::<Survey>())
}

/// Deletes in order and stops at the first survey that cannot go. Unknown
/// ids are skipped.
pub async fn delete_surveys<S: Store>(
    State(state): State<AppState<S>>,
    Json(body): Json<Items<Uuid>>,
) -> Result<Json<Message>, ApiError> {
    for id in body.items {
        match delete_survey(state.store.as_ref(), &state.events, id).await {
            Ok(_) => {}
            Err(BuilderError::Storage(e)) if e.is_not_found() => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(Message::deleted::<Survey>())
}
