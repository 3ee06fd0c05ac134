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
    dto::contact_dto::{ContactResponse, CreateContactPayload, UpdateContactPayload},
    dto::pagination::PageQuery,
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .contact_service
        .list(query.page(), query.limit())
        .await?
        .map(ContactResponse::from);
    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let contact = state.contact_service.get_by_id(id).await?;
    Ok(Json(ContactResponse::from(contact)))
}

#[axum::debug_handler]
pub async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<CreateContactPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let contact = state.contact_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ContactResponse::from(contact))))
}

#[axum::debug_handler]
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let contact = state.contact_service.update(id, payload).await?;
    Ok(Json(ContactResponse::from(contact)))
}

#[axum::debug_handler]
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.contact_service.delete(id).await?;
    Ok(Json(json!({ "message": "Message deleted" })))
}
