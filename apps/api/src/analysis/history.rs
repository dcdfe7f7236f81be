use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::AnalysisResult;
use crate::errors::AppError;
use crate::models::resume::AnalysisRow;

/// Stores an analysis, optionally linked to a stored resume.
pub async fn record_analysis(
    pool: &PgPool,
    resume_id: Option<Uuid>,
    analysis: &AnalysisResult,
) -> Result<AnalysisRow, AppError> {
    let result = serde_json::to_value(analysis)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize analysis: {e}")))?;

    let row = sqlx::query_as::<_, AnalysisRow>(
        r#"
        INSERT INTO analyses (id, resume_id, ats_score, result)
        VALUES ($1, $2, $3, $4)
        RETURNING id, resume_id, ats_score, result, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(resume_id)
    .bind(analysis.ats_score)
    .bind(&result)
    .fetch_one(pool)
    .await?;

    info!("Recorded analysis {} (ATS {})", row.id, analysis.ats_score);
    Ok(row)
}

/// Analyses for a stored resume, newest first.
pub async fn list_analyses(pool: &PgPool, resume_id: Uuid) -> Result<Vec<AnalysisRow>, AppError> {
    let rows = sqlx::query_as::<_, AnalysisRow>(
        r#"
        SELECT id, resume_id, ats_score, result, created_at
        FROM analyses
        WHERE resume_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
