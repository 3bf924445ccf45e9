use std::sync::Arc;

use aidar_assignments::AssignmentService;
use aidar_builder::events::SurveyEvents;
use aidar_forms::RequiredPolicy;
use aidar_storage::Store;

/// Shared application state, injected into all route handlers via Axum state.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub events: SurveyEvents,
    pub policy: RequiredPolicy,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            events: self.events.clone(),
            policy: self.policy,
        }
    }
}

impl<S: Store> AppState<S> {
    pub fn new(store: S, policy: RequiredPolicy) -> Self {
        Self {
            store: Arc::new(store),
            events: SurveyEvents::new(),
            policy,
        }
    }

    pub fn assignments(&self) -> AssignmentService<S> {
        AssignmentService::new(self.store.clone(), self.policy)
    }
}
