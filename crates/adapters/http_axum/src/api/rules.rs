//! JSON REST handlers for rules.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::{Form, Json};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use acrules_app::ports::{AcActuator, Clock, RuleRepository, TemperatureSensor};
use acrules_domain::id::RuleId;
use acrules_domain::rule::{NewRule, RulePatch};

use crate::api::wire::{WireRule, WireRuleForm, WireRulePatch};
use crate::error::ApiError;
use crate::state::AppState;

/// Body returned after creating a rule.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBody {
    pub rule_id: u32,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<WireRule>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, update and patch endpoints.
pub enum GetResponse {
    Ok(Json<WireRule>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<CreatedBody>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `?id=N` query used by the form-style delete.
#[derive(Deserialize)]
pub struct IdQuery {
    pub id: String,
}

fn parse_id(raw: &str) -> Result<RuleId, ApiError> {
    RuleId::from_str(raw).map_err(ApiError::from)
}

/// `GET /api/rules`: list all rules in priority order.
pub async fn list<R, S, C, A>(
    State(state): State<AppState<R, S, C, A>>,
) -> Result<ListResponse, ApiError>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    let rules = state.rule_service.list_rules().await?;
    Ok(ListResponse::Ok(Json(rules.iter().map(WireRule::from).collect())))
}

/// `GET /api/rules/:id`: get rule by id.
pub async fn get<R, S, C, A>(
    State(state): State<AppState<R, S, C, A>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    let rule = state.rule_service.get_rule(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(WireRule::from(&rule))))
}

/// `POST /api/rules`: create a disabled "New Rule" for the editor.
pub async fn create<R, S, C, A>(
    State(state): State<AppState<R, S, C, A>>,
) -> Result<CreateResponse, ApiError>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    let created = state.rule_service.create_from_template().await?;
    Ok(CreateResponse::Created(Json(CreatedBody {
        rule_id: created.id.get(),
    })))
}

/// `PUT /api/rules/:id`: replace a rule.
pub async fn update<R, S, C, A>(
    State(state): State<AppState<R, S, C, A>>,
    Path(id): Path<String>,
    Json(req): Json<WireRule>,
) -> Result<GetResponse, ApiError>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    let rule_id = parse_id(&id)?;
    let rule = NewRule::try_from(req)?.with_id(rule_id);
    let saved = state.rule_service.update_rule(rule).await?;
    Ok(GetResponse::Ok(Json(WireRule::from(&saved))))
}

/// `PATCH /api/rules/:id`: update some fields of a rule.
pub async fn patch<R, S, C, A>(
    State(state): State<AppState<R, S, C, A>>,
    Path(id): Path<String>,
    Json(req): Json<WireRulePatch>,
) -> Result<GetResponse, ApiError>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    let rule_id = parse_id(&id)?;
    let patch = RulePatch::try_from(req)?;
    let saved = state.rule_service.patch_rule(rule_id, patch).await?;
    Ok(GetResponse::Ok(Json(WireRule::from(&saved))))
}

/// `PUT /api/rules`: form-encoded partial update keyed by the `id` field.
pub async fn patch_form<R, S, C, A>(
    State(state): State<AppState<R, S, C, A>>,
    Form(form): Form<WireRuleForm>,
) -> Result<GetResponse, ApiError>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    let (id, req) = form.into_parts();
    let rule_id = parse_id(&id)?;
    let patch = RulePatch::try_from(req)?;
    let saved = state.rule_service.patch_rule(rule_id, patch).await?;
    Ok(GetResponse::Ok(Json(WireRule::from(&saved))))
}

/// `DELETE /api/rules?id=N`: delete a rule named in the query string.
pub async fn delete_by_query<R, S, C, A>(
    State(state): State<AppState<R, S, C, A>>,
    Query(query): Query<IdQuery>,
) -> Result<DeleteResponse, ApiError>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    state.rule_service.delete_rule(parse_id(&query.id)?).await?;
    Ok(DeleteResponse::NoContent)
}

/// `DELETE /api/rules/:id`: delete a rule.
pub async fn delete<R, S, C, A>(
    State(state): State<AppState<R, S, C, A>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: RuleRepository + Send + Sync + 'static,
    S: TemperatureSensor + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
    A: AcActuator + Send + Sync + 'static,
{
    state.rule_service.delete_rule(parse_id(&id)?).await?;
    Ok(DeleteResponse::NoContent)
}
