//! Live evaluation of the active rule.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use acrules_app::ports::{AcActuator, Clock, RuleRepository, TemperatureSensor};
use acrules_domain::sentinel::HOUR_UNSET;

use crate::api::wire::WireRule;
use crate::error::ApiError;
use crate::state::AppState;

/// Wire value of `activeRuleId` when no rule is active.
const NO_ACTIVE_RULE: i64 = -1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveResponse {
    /// `null` when the sensor has no usable reading.
    pub current_temp: Option<f32>,
    pub current_hour: i32,
    pub active_rule_id: i64,
    pub active_rule: Option<WireRule>,
}

/// `GET /api/rules/active`: evaluate the rules against the sensor and clock
/// right now, without touching the AC.
pub async fn get<R, S, C, A>(
    State(state): State<AppState<R, S, C, A>>,
) -> Result<Json<ActiveResponse>, ApiError>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    let response = match state.controller.evaluate_now().await? {
        Some(evaluation) => ActiveResponse {
            current_temp: Some(evaluation.temperature),
            current_hour: i32::from(evaluation.hour),
            active_rule_id: evaluation
                .active_id()
                .map_or(NO_ACTIVE_RULE, |id| i64::from(id.get())),
            active_rule: evaluation.active.as_ref().map(WireRule::from),
        },
        None => ActiveResponse {
            current_temp: None,
            current_hour: HOUR_UNSET,
            active_rule_id: NO_ACTIVE_RULE,
            active_rule: None,
        },
    };
    Ok(Json(response))
}
