use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::admin_dto::{CreateAdminPayload, SetupAdminPayload, UpdateAdminPayload};
use crate::error::{Error, Result};
use crate::models::admin::{Admin, AdminRole};
use crate::utils::crypto;

const ADMIN_COLUMNS: &str =
    "id, username, email, password_hash, role, is_active, last_login, created_at, updated_at";

#[derive(Clone)]
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins WHERE id = $1",
            ADMIN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    pub async fn find_active_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins WHERE email = $1 AND is_active = TRUE",
            ADMIN_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    /// One-time bootstrap. Permanently refused once any admin row exists.
    pub async fn setup(&self, payload: SetupAdminPayload) -> Result<Admin> {
        if self.count().await? > 0 {
            return Err(Error::BadRequest(
                "Admin setup already completed. Admin users already exist.".to_string(),
            ));
        }
        self.insert(
            &payload.username,
            &payload.email,
            &payload.password,
            AdminRole::Superadmin,
        )
        .await
    }

    pub async fn create(&self, payload: CreateAdminPayload) -> Result<Admin> {
        let role = payload.role.unwrap_or(AdminRole::Admin);
        self.insert(&payload.username, &payload.email, &payload.password, role)
            .await
    }

    async fn insert(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: AdminRole,
    ) -> Result<Admin> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM admins WHERE email = $1 OR username = $2)",
        )
        .bind(email)
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        if exists {
            return Err(Error::BadRequest(
                "Admin with this email or username already exists".to_string(),
            ));
        }

        let password_hash = crypto::hash_password(password)?;
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "INSERT INTO admins (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            ADMIN_COLUMNS
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }

    pub async fn touch_last_login(&self, id: Uuid) -> Result<Admin> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "UPDATE admins SET last_login = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            ADMIN_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(admin)
    }

    pub async fn list_all(&self) -> Result<Vec<Admin>> {
        let admins = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins ORDER BY created_at DESC",
            ADMIN_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(admins)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateAdminPayload) -> Result<Admin> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "UPDATE admins
             SET username = COALESCE($2, username),
                 email = COALESCE($3, email),
                 role = COALESCE($4, role),
                 is_active = COALESCE($5, is_active),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            ADMIN_COLUMNS
        ))
        .bind(id)
        .bind(payload.username)
        .bind(payload.email)
        .bind(payload.role)
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Admin not found".to_string()))?;
        Ok(admin)
    }

    /// An authenticated admin may not delete their own account.
    pub async fn delete(&self, id: Uuid, current_admin_id: Uuid) -> Result<()> {
        if id == current_admin_id {
            return Err(Error::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }
        let res = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Admin not found".to_string()));
        }
        Ok(())
    }
}
