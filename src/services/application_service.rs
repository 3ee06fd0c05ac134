use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application_dto::CreateApplicationPayload;
use crate::dto::pagination::Paginated;
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, ApplicationWithJob};

const APPLICATION_COLUMNS: &str =
    "id, name, email, phone, resume, cover_letter, job_id, status, created_at, updated_at";

const JOINED_COLUMNS: &str = "a.id, a.name, a.email, a.phone, a.resume, a.cover_letter, \
     a.job_id, a.status, a.created_at, a.updated_at, j.title AS job_title";

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: i64, limit: i64) -> Result<Paginated<ApplicationWithJob>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, ApplicationWithJob>(&format!(
            "SELECT {} FROM applications a
             LEFT JOIN jobs j ON j.id = a.job_id
             ORDER BY a.created_at, a.id
             LIMIT $1 OFFSET $2",
            JOINED_COLUMNS
        ))
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(Paginated::new(items, total, page, limit))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ApplicationWithJob> {
        sqlx::query_as::<_, ApplicationWithJob>(&format!(
            "SELECT {} FROM applications a
             LEFT JOIN jobs j ON j.id = a.job_id
             WHERE a.id = $1",
            JOINED_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    pub async fn create(&self, payload: CreateApplicationPayload) -> Result<Application> {
        // An application must point at a resolvable job; an unknown id is a
        // validation failure, not a missing resource.
        let job_exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
            .bind(payload.job_id)
            .fetch_one(&self.pool)
            .await?;
        if !job_exists {
            return Err(Error::BadRequest(
                "Job not found for this application".to_string(),
            ));
        }

        let application = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (name, email, phone, resume, cover_letter, job_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            APPLICATION_COLUMNS
        ))
        .bind(payload.name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.resume)
        .bind(payload.cover_letter)
        .bind(payload.job_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(application)
    }

    /// Narrow status-only update; no other column is touched.
    pub async fn update_status(&self, id: Uuid, status: ApplicationStatus) -> Result<Application> {
        sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Application not found".to_string()));
        }
        Ok(())
    }
}
