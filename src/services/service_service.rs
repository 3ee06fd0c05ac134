use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::pagination::Paginated;
use crate::dto::service_dto::{CreateServicePayload, UpdateServicePayload};
use crate::error::{Error, Result};
use crate::models::service::{Service, DEFAULT_ICON};

const SERVICE_COLUMNS: &str = "id, title, description, icon, created_at, updated_at";

#[derive(Clone)]
pub struct ServiceService {
    pool: PgPool,
}

impl ServiceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: i64, limit: i64) -> Result<Paginated<Service>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Service>(&format!(
            "SELECT {} FROM services ORDER BY created_at, id LIMIT $1 OFFSET $2",
            SERVICE_COLUMNS
        ))
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(Paginated::new(items, total, page, limit))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Service> {
        sqlx::query_as::<_, Service>(&format!(
            "SELECT {} FROM services WHERE id = $1",
            SERVICE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Service not found".to_string()))
    }

    pub async fn create(&self, payload: CreateServicePayload) -> Result<Service> {
        let icon = payload
            .icon
            .filter(|icon| !icon.is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_string());

        let service = sqlx::query_as::<_, Service>(&format!(
            "INSERT INTO services (title, description, icon)
             VALUES ($1, $2, $3)
             RETURNING {}",
            SERVICE_COLUMNS
        ))
        .bind(payload.title)
        .bind(payload.description)
        .bind(icon)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateServicePayload) -> Result<Service> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "UPDATE services
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 icon = COALESCE($4, icon),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            SERVICE_COLUMNS
        ))
        .bind(id)
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.icon)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Service not found".to_string()))?;
        Ok(service)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Service not found".to_string()));
        }
        Ok(())
    }
}
