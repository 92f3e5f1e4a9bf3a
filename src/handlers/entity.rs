//! Entity CRUD handlers: list, read, create, replace, delete.

use crate::error::AppError;
use crate::response::empty_object;
use crate::service::CrudService;
use crate::state::AppState;
use crate::store::Record;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

/// Fixed entity from the options, or the `:entity` URL parameter when the
/// group was mounted with a placeholder.
pub(crate) fn entity_from(
    state: &AppState,
    params: &HashMap<String, String>,
) -> Result<String, AppError> {
    match &state.options.entity {
        Some(fixed) => Ok(fixed.clone()),
        None => params
            .get("entity")
            .cloned()
            .ok_or_else(|| AppError::BadRequest("missing entity segment".into())),
    }
}

pub(crate) fn parse_id(params: &HashMap<String, String>) -> Result<i64, AppError> {
    params
        .get("id")
        .ok_or_else(|| AppError::BadRequest("missing id segment".into()))?
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

fn body_to_record(value: Value) -> Result<Record, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// GET list: page envelope `{total, limit, offset, data}`. Unknown query
/// params act as equality filters.
pub async fn list(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = entity_from(&state, &params)?;
    let page = CrudService::list(&state.store, &entity, &query).await?;
    Ok(Json(page))
}

/// GET single: the record, or `{}` when the id matches nothing.
pub async fn read(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = entity_from(&state, &params)?;
    let id = parse_id(&params)?;
    let record = CrudService::get_by_id(&state.store, &entity, id).await?;
    Ok(Json(record.map(Value::Object).unwrap_or_else(empty_object)))
}

/// POST list: validate and create; responds with the stored record (id
/// assigned) or the validation error list.
pub async fn create(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = entity_from(&state, &params)?;
    let candidate = body_to_record(body)?;
    let created =
        CrudService::create(&state.store, &entity, &state.options.validation, candidate).await?;
    Ok(Json(Value::Object(created)))
}

/// PUT single: full replacement, no validation, body echoed back. A miss
/// still echoes the body (see `CrudService::replace_by_id`).
pub async fn update(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = entity_from(&state, &params)?;
    let id = parse_id(&params)?;
    let replacement = body_to_record(body)?;
    let stored = CrudService::replace_by_id(&state.store, &entity, id, replacement).await?;
    Ok(Json(Value::Object(stored)))
}

/// DELETE single (and its POST `/delete` alias): always responds `{}`,
/// whether or not a record was removed.
pub async fn remove(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = entity_from(&state, &params)?;
    let id = parse_id(&params)?;
    CrudService::delete_by_id(&state.store, &entity, id).await?;
    Ok(Json(empty_object()))
}
