pub mod admin_service;
pub mod application_service;
pub mod contact_service;
pub mod dashboard_service;
pub mod job_service;
pub mod project_service;
pub mod service_service;
