use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::contact_dto::{CreateContactPayload, UpdateContactPayload};
use crate::dto::pagination::Paginated;
use crate::error::{Error, Result};
use crate::models::contact::Contact;

const CONTACT_COLUMNS: &str = "id, name, email, phone, message, created_at, updated_at";

#[derive(Clone)]
pub struct ContactService {
    pool: PgPool,
}

impl ContactService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: i64, limit: i64) -> Result<Paginated<Contact>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {} FROM contacts ORDER BY created_at, id LIMIT $1 OFFSET $2",
            CONTACT_COLUMNS
        ))
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(Paginated::new(items, total, page, limit))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Contact> {
        sqlx::query_as::<_, Contact>(&format!(
            "SELECT {} FROM contacts WHERE id = $1",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Message not found".to_string()))
    }

    pub async fn create(&self, payload: CreateContactPayload) -> Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "INSERT INTO contacts (name, email, phone, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(payload.name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(contact)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateContactPayload) -> Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "UPDATE contacts
             SET name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 phone = COALESCE($4, phone),
                 message = COALESCE($5, message),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .bind(payload.name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.message)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Message not found".to_string()))?;
        Ok(contact)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Message not found".to_string()));
        }
        Ok(())
    }
}
