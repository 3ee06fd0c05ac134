use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::pagination::PageQuery,
    dto::service_dto::{CreateServicePayload, ServiceResponse, UpdateServicePayload},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .service_service
        .list(query.page(), query.limit())
        .await?
        .map(ServiceResponse::from);
    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let service = state.service_service.get_by_id(id).await?;
    Ok(Json(ServiceResponse::from(service)))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateServicePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let service = state.service_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ServiceResponse::from(service))))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServicePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let service = state.service_service.update(id, payload).await?;
    Ok(Json(ServiceResponse::from(service)))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.service_service.delete(id).await?;
    Ok(Json(json!({ "message": "Service deleted" })))
}
