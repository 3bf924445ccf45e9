//! aidar-api
//!
//! HTTP surface over the record store: generic CRUD for every record kind
//! plus the survey builder and assignment endpoints.

use aidar_core::models::patient::Patient;
use aidar_core::models::physician::Physician;
use aidar_storage::Store;
use axum::middleware as axum_mw;
use axum::routing::{get, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use state::AppState;

/// Build the application router over `state`.
pub fn router<S: Store + 'static>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let surveys = routes::surveys::routes::<S>()
        .route("/{id}/assignments", put(routes::assignments::assign::<S>));
    let physicians = routes::records::routes::<S, Physician>()
        .route("/{id}/surveys", get(routes::views::physician_overview::<S>));
    let patients = routes::records::routes::<S, Patient>()
        .route("/{id}/surveys", get(routes::views::patient_surveys::<S>));
    let assignments = routes::assignments::routes::<S>();

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api/surveys", surveys)
        .nest("/api/physicians", physicians)
        .nest("/api/patients", patients)
        .nest("/api/assignments", assignments)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::audit::audit_log)),
        )
        .with_state(state)
}
