use sqlx::{PgPool, Result};

use crate::db::models::Branch;

pub async fn insert(pool: &PgPool, business_name: &str) -> Result<u64> {
    let result = sqlx::query("INSERT INTO puntos_venta (business_name) VALUES ($1)")
        .bind(business_name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list(pool: &PgPool) -> Result<Vec<Branch>> {
    sqlx::query_as::<_, Branch>("SELECT * FROM puntos_venta")
        .fetch_all(pool)
        .await
}

pub async fn rename(pool: &PgPool, id: i32, business_name: &str) -> Result<u64> {
    let result = sqlx::query("UPDATE puntos_venta SET business_name = $1 WHERE id = $2")
        .bind(business_name)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM puntos_venta WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
