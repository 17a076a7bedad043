use sqlx::{PgPool, Postgres, Result, Transaction};

use crate::db::models::Client;

pub async fn insert(
    pool: &PgPool,
    nombre_completo: &str,
    dni: &str,
    telefono: Option<&str>,
    email: Option<&str>,
) -> Result<u64> {
    let result = sqlx::query(
        "INSERT INTO clientes (nombre_completo, dni, telefono, email) VALUES ($1, $2, $3, $4)",
    )
    .bind(nombre_completo.to_lowercase())
    .bind(dni)
    .bind(telefono)
    .bind(email)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn list(pool: &PgPool) -> Result<Vec<Client>> {
    sqlx::query_as::<_, Client>("SELECT * FROM clientes")
        .fetch_all(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    nombre_completo: &str,
    dni: &str,
    telefono: Option<&str>,
    email: Option<&str>,
) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE clientes SET nombre_completo = $1, dni = $2, telefono = $3, email = $4 WHERE id = $5",
    )
    .bind(nombre_completo.to_lowercase())
    .bind(dni)
    .bind(telefono)
    .bind(email)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn name_by_id(pool: &PgPool, id: i32) -> Result<Option<String>> {
    sqlx::query_scalar::<_, String>("SELECT nombre_completo FROM clientes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Short (id, name) pairs for report views that label debts per client.
pub async fn list_names(pool: &PgPool) -> Result<Vec<(i32, String)>> {
    sqlx::query_as::<_, (i32, String)>("SELECT id, nombre_completo FROM clientes")
        .fetch_all(pool)
        .await
}

/// Final step of the client cascade; runs inside the caller's transaction.
pub async fn delete_in_tx(tx: &mut Transaction<'_, Postgres>, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}
