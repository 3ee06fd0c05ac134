use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::application::{Application, ApplicationStatus, ApplicationWithJob};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub job_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusPayload {
    pub status: ApplicationStatus,
}

/// Parent job reference embedded in application reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRef {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub job_id: Uuid,
    pub status: ApplicationStatus,
    pub job: Option<JobRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            resume: value.resume,
            cover_letter: value.cover_letter,
            job_id: value.job_id,
            status: value.status,
            job: None,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<ApplicationWithJob> for ApplicationResponse {
    fn from(value: ApplicationWithJob) -> Self {
        let job = value.job_title.map(|title| JobRef {
            id: value.job_id,
            title,
        });
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            resume: value.resume,
            cover_letter: value.cover_letter,
            job_id: value.job_id,
            status: value.status,
            job,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_uses_camel_case_field_names() {
        let payload: CreateApplicationPayload = serde_json::from_str(
            r#"{
                "name": "Alice",
                "email": "alice@example.com",
                "phone": "+1 555 0100",
                "coverLetter": "Hello",
                "jobId": "2cd84131-6e83-4c98-91ba-f9b9a5f0a06c"
            }"#,
        )
        .unwrap();
        assert_eq!(payload.cover_letter.as_deref(), Some("Hello"));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn status_payload_only_accepts_the_closed_enumeration() {
        let ok: UpdateApplicationStatusPayload =
            serde_json::from_str(r#"{"status":"Accepted"}"#).unwrap();
        assert_eq!(ok.status, ApplicationStatus::Accepted);

        let bad: Result<UpdateApplicationStatusPayload, _> =
            serde_json::from_str(r#"{"status":"OnHold"}"#);
        assert!(bad.is_err());
    }
}
