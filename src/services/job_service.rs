use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::dto::pagination::Paginated;
use crate::error::{Error, Result};
use crate::models::job::{Job, JobStatus};

const JOB_COLUMNS: &str =
    r#"id, title, "type", location, description, status, created_at, updated_at"#;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: i64, limit: i64) -> Result<Paginated<Job>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs ORDER BY created_at, id LIMIT $1 OFFSET $2",
            JOB_COLUMNS
        ))
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(Paginated::new(items, total, page, limit))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let status = payload.status.unwrap_or(JobStatus::Open);
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"INSERT INTO jobs (title, "type", location, description, status)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {}"#,
            JOB_COLUMNS
        ))
        .bind(payload.title)
        .bind(payload.job_type)
        .bind(payload.location)
        .bind(payload.description)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"UPDATE jobs
               SET title = COALESCE($2, title),
                   "type" = COALESCE($3, "type"),
                   location = COALESCE($4, location),
                   description = COALESCE($5, description),
                   status = COALESCE($6, status),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {}"#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(payload.title)
        .bind(payload.job_type)
        .bind(payload.location)
        .bind(payload.description)
        .bind(payload.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        Ok(job)
    }

    /// Deleting a job also removes its applications (ON DELETE CASCADE).
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        Ok(())
    }
}
