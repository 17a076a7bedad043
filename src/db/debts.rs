use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Result, Transaction};
use uuid::Uuid;

use crate::db::models::Debt;

/// Inserts a debt. `estado` defaults to outstanding (TRUE) at the schema
/// level; the row carries the caller-supplied stable `deuda_uuid`.
pub async fn insert(
    pool: &PgPool,
    cliente_id: i32,
    detalles: &serde_json::Value,
    deuda_uuid: Uuid,
    fecha_compra: NaiveDate,
    fecha_vencimiento: NaiveDate,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO deudas (cliente_id, detalles, deuda_uuid, fecha_compra, fecha_vencimiento)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(cliente_id)
    .bind(detalles)
    .bind(deuda_uuid)
    .bind(fecha_compra)
    .bind(fecha_vencimiento)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Updates a debt by its stable uuid. Zero rows means the uuid is unknown;
/// the caller decides whether that is a 404.
pub async fn update_by_uuid(
    pool: &PgPool,
    deuda_uuid: Uuid,
    detalles: &serde_json::Value,
    fecha_compra: NaiveDate,
    fecha_vencimiento: NaiveDate,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE deudas SET fecha_compra = $1, fecha_vencimiento = $2, detalles = $3
        WHERE deuda_uuid = $4
        "#,
    )
    .bind(fecha_compra)
    .bind(fecha_vencimiento)
    .bind(detalles)
    .bind(deuda_uuid)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_by_uuid(pool: &PgPool, deuda_uuid: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM deudas WHERE deuda_uuid = $1")
        .bind(deuda_uuid)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list_by_client(pool: &PgPool, cliente_id: i32) -> Result<Vec<Debt>> {
    sqlx::query_as::<_, Debt>("SELECT * FROM deudas WHERE cliente_id = $1")
        .bind(cliente_id)
        .fetch_all(pool)
        .await
}

/// All debts that are no longer outstanding, for the expirations report.
pub async fn list_inactive(pool: &PgPool) -> Result<Vec<Debt>> {
    sqlx::query_as::<_, Debt>("SELECT * FROM deudas WHERE estado = FALSE ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Outstanding debts whose expiration falls inside the given window, for the
/// dashboard.
pub async fn list_due_in_window(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Debt>> {
    sqlx::query_as::<_, Debt>(
        r#"
        SELECT * FROM deudas
        WHERE fecha_vencimiento >= $1 AND fecha_vencimiento <= $2 AND estado = TRUE
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

/// Reads the client's debts inside the caller's transaction, so the rows
/// archived by cancel-and-archive are exactly the rows later purged.
pub async fn snapshot_by_client(
    tx: &mut Transaction<'_, Postgres>,
    cliente_id: i32,
) -> Result<Vec<Debt>> {
    sqlx::query_as::<_, Debt>("SELECT * FROM deudas WHERE cliente_id = $1")
        .bind(cliente_id)
        .fetch_all(&mut **tx)
        .await
}

/// Flips every debt of the client to inactive. One delivery closes out all of
/// the client's outstanding debts, not a specific one.
pub async fn settle_all_for_client(
    tx: &mut Transaction<'_, Postgres>,
    cliente_id: i32,
) -> Result<u64> {
    let result = sqlx::query("UPDATE deudas SET estado = FALSE WHERE cliente_id = $1")
        .bind(cliente_id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}

pub async fn purge_by_client(tx: &mut Transaction<'_, Postgres>, cliente_id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM deudas WHERE cliente_id = $1")
        .bind(cliente_id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}

/// Marks every outstanding debt due on or before `today` as inactive and
/// returns how many rows changed. Re-running with the same `today` is a
/// no-op.
pub async fn expire_due(pool: &PgPool, today: NaiveDate) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE deudas SET estado = FALSE WHERE fecha_vencimiento <= $1 AND estado = TRUE",
    )
    .bind(today)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
