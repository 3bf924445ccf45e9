//! CRUD handlers shared by every record kind.

use aidar_core::record::Record;
use aidar_storage::{Filter, Store};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// `{"data": ...}` envelope used by reads.
#[derive(Debug, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

/// `{"items": [...]}` body of the bulk endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn deleted<R: Record>() -> Json<Self> {
        Json(Self {
            message: format!("{} deleted successfully", R::KIND.name()),
        })
    }
}

/// The full CRUD surface for one record kind, to be nested under its
/// collection path.
pub fn routes<S: Store + 'static, R: Record>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(list::<S, R>).post(create::<S, R>))
        .route("/bulk", post(create_bulk::<S, R>).delete(remove_bulk::<S, R>))
        .route(
            "/{id}",
            get(get_one::<S, R>).put(update::<S, R>).delete(remove::<S, R>),
        )
}

pub async fn list<S: Store, R: Record>(
    State(state): State<AppState<S>>,
    Query(filter): Query<Filter>,
) -> Result<Json<Data<Vec<R>>>, ApiError> {
    let data = state.store.list(filter).await?;
    Ok(Json(Data { data }))
}

pub async fn get_one<S: Store, R: Record>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Data<R>>, ApiError> {
    let data = state.store.get(id).await?;
    Ok(Json(Data { data }))
}

pub async fn create<S: Store, R: Record>(
    State(state): State<AppState<S>>,
    Json(record): Json<R>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    let created = state.store.create(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_bulk<S: Store, R: Record>(
    State(state): State<AppState<S>>,
    Json(body): Json<Items<R>>,
) -> Result<(StatusCode, Json<Vec<R>>), ApiError> {
    let created = state.store.create_bulk(body.items).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update: top-level fields of the body replace the stored ones.
pub async fn update<S: Store, R: Record>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<R>, ApiError> {
    let updated = state.store.update(id, patch).await?;
    Ok(Json(updated))
}

pub async fn remove<S: Store, R: Record>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    state.store.remove::<R>(id).await?;
    Ok(Message::deleted::<R>())
}

pub async fn remove_bulk<S: Store, R: Record>(
    State(state): State<AppState<S>>,
    Json(body): Json<Items<Uuid>>,
) -> Result<Json<Message>, ApiError> {
    state.store.remove_bulk::<R>(&body.items).await?;
    Ok(Message::deleted::<R>())
}
