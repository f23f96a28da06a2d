//! Snapshot of the last control cycle.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use acrules_app::controller::{ControllerStatus, CycleOutcome};
use acrules_app::ports::{AcActuator, Clock, RuleRepository, TemperatureSensor};
use acrules_domain::time::Timestamp;

use crate::api::wire::{WireAcState, WireRule};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub current_temp: Option<f32>,
    pub current_hour: Option<u8>,
    pub active_rule_id: i64,
    pub active_rule: Option<WireRule>,
    pub ac_state: WireAcState,
    pub debug_mode: bool,
    pub last_cycle: Option<Timestamp>,
    pub last_outcome: Option<CycleOutcome>,
}

impl From<ControllerStatus> for StatusResponse {
    fn from(status: ControllerStatus) -> Self {
        Self {
            current_temp: status.current_temp,
            current_hour: status.current_hour,
            active_rule_id: status
                .active_rule
                .as_ref()
                .map_or(-1, |rule| i64::from(rule.id.get())),
            active_rule: status.active_rule.as_ref().map(WireRule::from),
            ac_state: status.ac_state.into(),
            debug_mode: status.debug_mode,
            last_cycle: status.last_cycle,
            last_outcome: status.last_outcome,
        }
    }
}

/// `GET /api/status`
pub async fn get<R, S, C, A>(State(state): State<AppState<R, S, C, A>>) -> Json<StatusResponse>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    Json(state.controller.status().await.into())
}
