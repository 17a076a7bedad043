use sqlx::{PgPool, Result};

use crate::db::models::AllowedUser;

pub async fn find_by_email(pool: &PgPool, user_email: &str) -> Result<Option<AllowedUser>> {
    sqlx::query_as::<_, AllowedUser>("SELECT * FROM usuarios_permitidos WHERE user_email = $1")
        .bind(user_email)
        .fetch_optional(pool)
        .await
}

/// Registers an identity-provider user with the given authorization flags and
/// returns the stored row.
pub async fn insert(
    pool: &PgPool,
    user_name: &str,
    user_email: &str,
    user_id: &str,
    user_image: Option<&str>,
    autorizado: bool,
    administrador: bool,
) -> Result<AllowedUser> {
    sqlx::query_as::<_, AllowedUser>(
        r#"
        INSERT INTO usuarios_permitidos (user_name, user_email, user_id, user_image, autorizado, administrador)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user_name)
    .bind(user_email)
    .bind(user_id)
    .bind(user_image)
    .bind(autorizado)
    .bind(administrador)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<AllowedUser>> {
    sqlx::query_as::<_, AllowedUser>("SELECT * FROM usuarios_permitidos")
        .fetch_all(pool)
        .await
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM usuarios_permitidos WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Flips the authorization flag; an authorized user loses access and vice
/// versa.
pub async fn toggle_access(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("UPDATE usuarios_permitidos SET autorizado = NOT autorizado WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Assigns a branch to a user by the external identity id (not the row id).
pub async fn assign_branch(pool: &PgPool, branch_id: i32, user_id: &str) -> Result<u64> {
    let result = sqlx::query("UPDATE usuarios_permitidos SET id_punto_venta = $1 WHERE user_id = $2")
        .bind(branch_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
