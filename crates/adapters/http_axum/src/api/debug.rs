//! Debug mode toggle.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use acrules_app::ports::{AcActuator, Clock, RuleRepository, TemperatureSensor};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct DebugBody {
    pub enabled: bool,
}

/// `GET /api/debug`
pub async fn get<R, S, C, A>(State(state): State<AppState<R, S, C, A>>) -> Json<DebugBody>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    Json(DebugBody {
        enabled: state.controller.debug_mode(),
    })
}

/// `PUT /api/debug`: when enabled, every control cycle re-transmits.
pub async fn set<R, S, C, A>(
    State(state): State<AppState<R, S, C, A>>,
    Json(body): Json<DebugBody>,
) -> Json<DebugBody>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    state.controller.set_debug_mode(body.enabled);
    Json(DebugBody {
        enabled: state.controller.debug_mode(),
    })
}
