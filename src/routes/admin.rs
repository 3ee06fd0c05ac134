use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::admin_dto::{
        AdminListResponse, AdminResponse, AuthResponse, CreateAdminPayload, LoginPayload,
        SetupAdminPayload, UpdateAdminPayload,
    },
    error::{Error, Result},
    middleware::auth::SESSION_COOKIE,
    models::admin::Admin,
    utils::{crypto, jwt},
    AppState,
};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub admin: AdminResponse,
}

#[derive(Debug, Serialize)]
pub struct AdminMutationResponse {
    pub message: String,
    pub admin: AdminResponse,
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[utoipa::path(
    post,
    path = "/api/admin/setup",
    request_body = SetupAdminPayload,
    responses(
        (status = 201, description = "Bootstrap admin created", body = Json<AuthResponse>),
        (status = 400, description = "Setup already completed or invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn setup_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SetupAdminPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let admin = state.admin_service.setup(payload).await?;

    let config = crate::config::get_config();
    let token = jwt::sign_token(admin.id, &admin.email, admin.role, &config.jwt_secret)?;
    let jar = jar.add(session_cookie(token.clone()));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            message: "Admin user created successfully".to_string(),
            token,
            admin: AdminResponse::from(admin),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login successful", body = Json<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    // Same response for unknown email and wrong password.
    let admin = state
        .admin_service
        .find_active_by_email(&payload.email)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

    if !crypto::verify_password(&payload.password, &admin.password_hash) {
        return Err(Error::Unauthorized("Invalid credentials".to_string()));
    }

    let admin = state.admin_service.touch_last_login(admin.id).await?;

    let config = crate::config::get_config();
    let token = jwt::sign_token(admin.id, &admin.email, admin.role, &config.jwt_secret)?;
    let jar = jar.add(session_cookie(token.clone()));

    Ok((
        jar,
        Json(AuthResponse {
            message: "Login successful".to_string(),
            token,
            admin: AdminResponse::from(admin),
        }),
    ))
}

#[axum::debug_handler]
pub async fn logout_admin(jar: CookieJar) -> Result<impl IntoResponse> {
    let jar = jar.remove(session_cookie(String::new()));
    Ok((jar, Json(json!({ "message": "Logged out successfully" }))))
}

#[axum::debug_handler]
pub async fn get_profile(Extension(admin): Extension<Admin>) -> Result<impl IntoResponse> {
    Ok(Json(ProfileResponse {
        admin: AdminResponse::from(admin),
    }))
}

#[axum::debug_handler]
pub async fn list_admins(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let admins: Vec<AdminResponse> = state
        .admin_service
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(AdminListResponse {
        count: admins.len(),
        admins,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/create",
    request_body = CreateAdminPayload,
    responses(
        (status = 201, description = "Admin created", body = Json<AdminMutationResponse>),
        (status = 400, description = "Invalid payload or duplicate admin"),
        (status = 403, description = "Caller is not a superadmin")
    )
)]
#[axum::debug_handler]
pub async fn create_admin(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdminPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let admin = state.admin_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(AdminMutationResponse {
            message: "Admin user created successfully".to_string(),
            admin: AdminResponse::from(admin),
        }),
    ))
}

#[axum::debug_handler]
pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAdminPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let admin = state.admin_service.update(id, payload).await?;
    Ok(Json(AdminMutationResponse {
        message: "Admin updated successfully".to_string(),
        admin: AdminResponse::from(admin),
    }))
}

#[axum::debug_handler]
pub async fn delete_admin(
    State(state): State<AppState>,
    Extension(current): Extension<Admin>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.admin_service.delete(id, current.id).await?;
    Ok(Json(json!({ "message": "Admin deleted successfully" })))
}
