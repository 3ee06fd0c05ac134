use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::pagination::Paginated;
use crate::dto::project_dto::ProjectForm;
use crate::error::{Error, Result};
use crate::models::project::Project;

const PROJECT_COLUMNS: &str = "id, title, description, image, link, created_at, updated_at";

#[derive(Clone)]
pub struct ProjectService {
    pool: PgPool,
}

impl ProjectService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: i64, limit: i64) -> Result<Paginated<Project>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects ORDER BY created_at, id LIMIT $1 OFFSET $2",
            PROJECT_COLUMNS
        ))
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(Paginated::new(items, total, page, limit))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Project> {
        sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE id = $1",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))
    }

    pub async fn create(&self, form: ProjectForm) -> Result<Project> {
        let (Some(title), Some(description), Some(image), Some(link)) =
            (form.title, form.description, form.image, form.link)
        else {
            return Err(Error::BadRequest(
                "Please provide title, description, image and link".to_string(),
            ));
        };

        let project = sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects (title, description, image, link)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            PROJECT_COLUMNS
        ))
        .bind(title)
        .bind(description)
        .bind(image)
        .bind(link)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    pub async fn update(&self, id: Uuid, form: ProjectForm) -> Result<Project> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 image = COALESCE($4, image),
                 link = COALESCE($5, link),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .bind(form.title)
        .bind(form.description)
        .bind(form.image)
        .bind(form.link)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;
        Ok(project)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Project not found".to_string()));
        }
        Ok(())
    }
}
