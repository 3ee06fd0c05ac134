use axum::{
    extract::{Host, Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::pagination::PageQuery,
    dto::project_dto::{ProjectForm, ProjectResponse, UploadResponse},
    error::{Error, Result},
    utils::upload,
    AppState,
};

/// Create/update bodies are multipart: text parts for the scalar fields and
/// an `image` part that is either a binary upload or a plain URL.
async fn collect_form(mut multipart: Multipart) -> Result<ProjectForm> {
    let config = crate::config::get_config();
    let mut form = ProjectForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "link" => form.link = Some(field.text().await?),
            "image" => {
                if let Some(filename) = field.file_name().map(ToString::to_string) {
                    let data = field.bytes().await?;
                    form.image =
                        Some(upload::save_project_image(&config.uploads_dir, &filename, &data).await?);
                } else {
                    let value = field.text().await?;
                    if !value.trim().is_empty() {
                        form.image = Some(value);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn request_scheme(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http")
}

#[axum::debug_handler]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .project_service
        .list(query.page(), query.limit())
        .await?
        .map(ProjectResponse::from);
    Ok(Json(page))
}

#[axum::debug_handler]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let project = state.project_service.get_by_id(id).await?;
    Ok(Json(ProjectResponse::from(project)))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    responses(
        (status = 201, description = "Project created", body = Json<ProjectResponse>),
        (status = 400, description = "Missing required fields or bad image")
    )
)]
#[axum::debug_handler]
pub async fn create_project(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = collect_form(multipart).await?;
    let project = state.project_service.create(form).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

#[axum::debug_handler]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = collect_form(multipart).await?;
    let project = state.project_service.update(id, form).await?;
    Ok(Json(ProjectResponse::from(project)))
}

#[axum::debug_handler]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.project_service.delete(id).await?;
    Ok(Json(json!({ "message": "Project deleted" })))
}

/// Standalone upload. The stored path is relative, so the response rebuilds
/// an absolute URL from the scheme and host this request arrived on.
#[utoipa::path(
    post,
    path = "/api/projects/upload",
    responses(
        (status = 200, description = "Image stored", body = Json<UploadResponse>),
        (status = 400, description = "Missing, oversized or non-image payload")
    )
)]
#[axum::debug_handler]
pub async fn upload_image(
    Host(host): Host,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let config = crate::config::get_config();

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("image") {
            let filename = field
                .file_name()
                .ok_or_else(|| Error::BadRequest("No image file provided".to_string()))?
                .to_string();
            let data = field.bytes().await?;
            let relative =
                upload::save_project_image(&config.uploads_dir, &filename, &data).await?;
            let image_url = upload::absolute_url(request_scheme(&headers), &host, &relative);
            return Ok(Json(UploadResponse { image_url }));
        }
    }

    Err(Error::BadRequest("No image file provided".to_string()))
}
