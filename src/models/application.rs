use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub job_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application row joined with the title of its parent job. The join is a
/// LEFT JOIN so a row still decodes while its job is being deleted out from
/// under it.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub job_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_title: Option<String>,
}
