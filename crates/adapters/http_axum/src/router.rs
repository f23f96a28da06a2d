//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use acrules_app::ports::{AcActuator, Clock, RuleRepository, TemperatureSensor};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the JSON API under `/api` and adds a [`TraceLayer`] that logs each
/// HTTP request/response through `tracing`.
pub fn build<R, S, C, A>(state: AppState<R, S, C, A>) -> Router
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
