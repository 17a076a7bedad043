use chrono::{DateTime, Utc};
use sqlx::{Postgres, Result, Transaction};

/// Appends one archival row: the serialized debts and deliveries of a client
/// at cancellation time. Rows here are never updated or deleted by the
/// lifecycle (only the full client cascade removes them).
pub async fn insert_snapshot(
    tx: &mut Transaction<'_, Postgres>,
    cliente_id: i32,
    detalle_deudas: &serde_json::Value,
    detalle_entregas: &serde_json::Value,
    fecha_cancelacion: DateTime<Utc>,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO historial_deudas (historial_cliente_id, detalle_deudas, detalle_entregas, fecha_cancelacion)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(cliente_id)
    .bind(detalle_deudas)
    .bind(detalle_entregas)
    .bind(fecha_cancelacion)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

pub async fn purge_by_client(tx: &mut Transaction<'_, Postgres>, cliente_id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM historial_deudas WHERE historial_cliente_id = $1")
        .bind(cliente_id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}
