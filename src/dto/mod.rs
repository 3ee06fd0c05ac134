pub mod admin_dto;
pub mod application_dto;
pub mod contact_dto;
pub mod dashboard_dto;
pub mod job_dto;
pub mod pagination;
pub mod project_dto;
pub mod service_dto;
