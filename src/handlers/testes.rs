//! `testes` handlers: validate the request, call the service, pick the status.

use crate::error::{AppError, ErrorBody};
use crate::model::{CreateTeste, Teste, UpdateTeste};
use crate::response::{created, ok, ok_many};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

#[utoipa::path(
    post,
    path = "/testes",
    tag = "testes",
    request_body = CreateTeste,
    responses(
        (status = 201, description = "Record created", body = Teste),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 409, description = "uniqueValue already exists", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let payload = RequestValidator::validate_create(body)?;
    let record = state.testes.create(payload).await?;
    Ok(created(record))
}

#[utoipa::path(
    get,
    path = "/testes",
    tag = "testes",
    responses(
        (status = 200, description = "All records", body = [Teste]),
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records = state.testes.find_all().await?;
    Ok(ok_many(records))
}

#[utoipa::path(
    get,
    path = "/testes/{uniqueValue}",
    tag = "testes",
    params(("uniqueValue" = String, Path, description = "Record key")),
    responses(
        (status = 200, description = "Record found", body = Teste),
        (status = 404, description = "Not found", body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(unique_value): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.testes.find_one(&unique_value).await?;
    Ok(ok(record))
}

#[utoipa::path(
    patch,
    path = "/testes/{uniqueValue}",
    tag = "testes",
    params(("uniqueValue" = String, Path, description = "Record key")),
    request_body = UpdateTeste,
    responses(
        (status = 200, description = "Record after the update", body = Teste),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(unique_value): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let patch = RequestValidator::validate_update(body)?;
    let record = state.testes.update(&unique_value, patch).await?;
    Ok(ok(record))
}

#[utoipa::path(
    delete,
    path = "/testes/{uniqueValue}",
    tag = "testes",
    params(("uniqueValue" = String, Path, description = "Record key")),
    responses(
        (status = 200, description = "Record as it was before deletion", body = Teste),
        (status = 404, description = "Not found", body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(unique_value): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.testes.remove(&unique_value).await?;
    Ok(ok(record))
}
