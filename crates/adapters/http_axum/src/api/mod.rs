//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod active;
pub mod debug;
#[allow(clippy::missing_errors_doc)]
pub mod rules;
pub mod status;
pub mod wire;

use axum::Router;
use axum::routing::get;

use acrules_app::ports::{AcActuator, Clock, RuleRepository, TemperatureSensor};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R, S, C, A>() -> Router<AppState<R, S, C, A>>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    Router::new()
        // Rules
        .route(
            "/rules",
            get(rules::list::<R, S, C, A>)
                .post(rules::create::<R, S, C, A>)
                .put(rules::patch_form::<R, S, C, A>)
                .delete(rules::delete_by_query::<R, S, C, A>),
        )
        .route("/rules/active", get(active::get::<R, S, C, A>))
        .route(
            "/rules/{id}",
            get(rules::get::<R, S, C, A>)
                .put(rules::update::<R, S, C, A>)
                .patch(rules::patch::<R, S, C, A>)
                .delete(rules::delete::<R, S, C, A>),
        )
        // Controller
        .route(
            "/debug",
            get(debug::get::<R, S, C, A>).put(debug::set::<R, S, C, A>),
        )
        .route("/status", get(status::get::<R, S, C, A>))
}
