pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    admin_service::AdminService, application_service::ApplicationService,
    contact_service::ContactService, dashboard_service::DashboardService, job_service::JobService,
    project_service::ProjectService, service_service::ServiceService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub admin_service: AdminService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub project_service: ProjectService,
    pub service_service: ServiceService,
    pub contact_service: ContactService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let admin_service = AdminService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let project_service = ProjectService::new(pool.clone());
        let service_service = ServiceService::new(pool.clone());
        let contact_service = ContactService::new(pool.clone());
        let dashboard_service = DashboardService::new(pool.clone());

        Self {
            pool,
            admin_service,
            job_service,
            application_service,
            project_service,
            service_service,
            contact_service,
            dashboard_service,
        }
    }
}
