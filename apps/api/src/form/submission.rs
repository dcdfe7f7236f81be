use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeRow};

/// Stores a validated resume and returns the inserted row.
pub async fn save_resume(pool: &PgPool, resume: &Resume) -> Result<ResumeRow, AppError> {
    let data = serde_json::to_value(resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))?;

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, candidate_name, data)
        VALUES ($1, $2, $3)
        RETURNING id, candidate_name, data, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&resume.personal_info.name)
    .bind(&data)
    .fetch_one(pool)
    .await?;

    info!("Stored resume {} for {}", row.id, row.candidate_name);
    Ok(row)
}

pub async fn load_resume(pool: &PgPool, id: Uuid) -> Result<(ResumeRow, Resume), AppError> {
    let row = sqlx::query_as::<_, ResumeRow>(
        "SELECT id, candidate_name, data, created_at, updated_at FROM resumes WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let resume: Resume = serde_json::from_value(row.data.clone())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored resume {id} is corrupt: {e}")))?;

    Ok((row, resume))
}
