use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Result, Transaction};

use crate::db::models::Delivery;

/// Inserts a delivery inside the caller's transaction. Recording a delivery
/// is never standalone; it always travels with the debt-state flip.
pub async fn insert_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    cliente_id: i32,
    detalle_entrega: &serde_json::Value,
) -> Result<u64> {
    let result = sqlx::query(
        "INSERT INTO entregas (detalle_entrega, id_entrega_cliente) VALUES ($1, $2)",
    )
    .bind(detalle_entrega)
    .bind(cliente_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

pub async fn update(pool: &PgPool, id: i32, detalle_entrega: &serde_json::Value) -> Result<u64> {
    let result = sqlx::query("UPDATE entregas SET detalle_entrega = $1 WHERE id = $2")
        .bind(detalle_entrega)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM entregas WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list_by_client(pool: &PgPool, cliente_id: i32) -> Result<Vec<Delivery>> {
    sqlx::query_as::<_, Delivery>("SELECT * FROM entregas WHERE id_entrega_cliente = $1")
        .bind(cliente_id)
        .fetch_all(pool)
        .await
}

/// Deliveries created inside the given window, for the dashboard.
pub async fn list_in_window(pool: &PgPool, from: NaiveDate, to: NaiveDate) -> Result<Vec<Delivery>> {
    sqlx::query_as::<_, Delivery>(
        "SELECT * FROM entregas WHERE create_date >= $1 AND create_date <= $2",
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

/// Reads the client's deliveries inside the caller's transaction; see
/// `debts::snapshot_by_client`.
pub async fn snapshot_by_client(
    tx: &mut Transaction<'_, Postgres>,
    cliente_id: i32,
) -> Result<Vec<Delivery>> {
    sqlx::query_as::<_, Delivery>("SELECT * FROM entregas WHERE id_entrega_cliente = $1")
        .bind(cliente_id)
        .fetch_all(&mut **tx)
        .await
}

pub async fn purge_by_client(tx: &mut Transaction<'_, Postgres>, cliente_id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM entregas WHERE id_entrega_cliente = $1")
        .bind(cliente_id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}
