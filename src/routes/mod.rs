use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::{middleware::auth, AppState};

pub mod admin;
pub mod applications;
pub mod contacts;
pub mod dashboard;
pub mod health;
pub mod jobs;
pub mod projects;
pub mod services;

/// Full API router. Public reads and form submissions are open; every
/// mutation of site content requires an authenticated admin, and admin
/// account management additionally requires the superadmin role.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api/admin/setup", post(admin::setup_admin))
        .route("/api/admin/login", post(admin::login_admin))
        .route("/api/jobs", get(jobs::list_jobs))
        .route("/api/jobs/:id", get(jobs::get_job))
        .route("/api/projects", get(projects::list_projects))
        .route("/api/projects/:id", get(projects::get_project))
        .route("/api/services", get(services::list_services))
        .route("/api/services/:id", get(services::get_service))
        .route("/api/applications", post(applications::create_application))
        .route("/api/contacts", post(contacts::create_contact));

    let protected = Router::new()
        .route("/api/admin/logout", post(admin::logout_admin))
        .route("/api/admin/profile", get(admin::get_profile))
        .route("/api/jobs", post(jobs::create_job))
        .route(
            "/api/jobs/:id",
            put(jobs::update_job).delete(jobs::delete_job),
        )
        .route("/api/applications", get(applications::list_applications))
        .route(
            "/api/applications/:id",
            get(applications::get_application).delete(applications::delete_application),
        )
        .route(
            "/api/applications/:id/status",
            put(applications::update_application_status),
        )
        .route("/api/projects", post(projects::create_project))
        .route(
            "/api/projects/:id",
            put(projects::update_project).delete(projects::delete_project),
        )
        .route("/api/projects/upload", post(projects::upload_image))
        .route("/api/services", post(services::create_service))
        .route(
            "/api/services/:id",
            put(services::update_service).delete(services::delete_service),
        )
        .route("/api/contacts", get(contacts::list_contacts))
        .route(
            "/api/contacts/:id",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .route("/api/dashboard/stats", get(dashboard::get_stats))
        .layer(from_fn_with_state(state.clone(), auth::require_auth));

    let superadmin = Router::new()
        .route("/api/admin/all", get(admin::list_admins))
        .route("/api/admin/create", post(admin::create_admin))
        .route(
            "/api/admin/:id",
            put(admin::update_admin).delete(admin::delete_admin),
        )
        .layer(from_fn_with_state(state.clone(), auth::require_superadmin));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(superadmin)
        .with_state(state)
}
