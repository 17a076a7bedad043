use sqlx::{PgPool, Result};

use crate::db::models::ActionLog;

/// A log entry as reported by the frontend, before it has a row id.
#[derive(Debug, Clone)]
pub struct NewActionLog {
    pub user_id: String,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub action_type: String,
    pub entity: Option<String>,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub details: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
}

pub async fn insert_log(pool: &PgPool, log: &NewActionLog) -> Result<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO reports (user_id, user_name, user_image, action_type, entity, old_data, new_data, details, day, time)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(&log.user_id)
    .bind(&log.user_name)
    .bind(&log.user_image)
    .bind(&log.action_type)
    .bind(&log.entity)
    .bind(&log.old_data)
    .bind(&log.new_data)
    .bind(&log.details)
    .bind(&log.day)
    .bind(&log.time)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn list_logs(pool: &PgPool) -> Result<Vec<ActionLog>> {
    sqlx::query_as::<_, ActionLog>("SELECT * FROM reports")
        .fetch_all(pool)
        .await
}
