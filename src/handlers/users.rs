use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::users;
use crate::error::AppError;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNewUser {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_id: Option<String>,
    pub user_image: Option<String>,
}

/// Sign-in hook for the identity provider. Unknown users are registered on
/// the spot; the response tells the frontend whether the caller may enter.
/// Profile fields are trusted as given.
pub async fn save_new_user(
    State(state): State<AppState>,
    Json(body): Json<SaveNewUser>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (user_name, user_email, user_id, user_image) = match (
        body.user_name,
        body.user_email,
        body.user_id,
        body.user_image,
    ) {
        (Some(name), Some(email), Some(id), Some(image)) => (name, email, id, image),
        _ => {
            return Err(AppError::Validation(
                "Could not authenticate the user, required data is missing".to_string(),
            ))
        }
    };

    let is_admin_email = state
        .admin_email
        .as_deref()
        .map_or(false, |admin| admin == user_email);

    match users::find_by_email(&state.db, &user_email).await? {
        None if is_admin_email => {
            let created = users::insert(
                &state.db,
                &user_name,
                &user_email,
                &user_id,
                Some(&user_image),
                true,
                true,
            )
            .await?;
            tracing::info!(%user_email, "administrator account created");

            Ok((
                StatusCode::OK,
                Json(json!({
                    "message": "Welcome back!",
                    "autorizado": true,
                    "administrador": true,
                    "currentUser": created,
                })),
            ))
        }
        None => {
            // Stored unauthorized so an administrator can grant access later.
            users::insert(
                &state.db,
                &user_name,
                &user_email,
                &user_id,
                Some(&user_image),
                false,
                false,
            )
            .await?;

            Ok((
                StatusCode::NOT_FOUND,
                Json(json!({
                    "message": "New user saved, contact the administrator to enable access"
                })),
            ))
        }
        Some(user) if is_admin_email || user.autorizado => {
            let message = if user.autorizado {
                "Welcome back!"
            } else {
                "User authorized"
            };

            Ok((
                StatusCode::OK,
                Json(json!({
                    "message": message,
                    "autorizado": user.autorizado,
                    "administrador": user.administrador,
                    "currentUser": user,
                })),
            ))
        }
        Some(user) => Ok((
            StatusCode::FORBIDDEN,
            Json(json!({
                "message": "User not authorized",
                "autorizado": user.autorizado,
            })),
        )),
    }
}

pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let usuarios = users::list(&state.db).await?;
    Ok(Json(json!({ "usuarios": usuarios })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let deleted = users::delete(&state.db, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({ "message": "User deleted successfully!" })))
}

pub async fn grant_access(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let updated = users::toggle_access(&state.db, id).await?;
    if updated == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({ "message": "Access updated" })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchAssignment {
    pub user_id: Option<String>,
}

/// Assigns a branch to a user. The path carries the branch id; the user is
/// addressed by its external identity-provider id in the query string.
pub async fn change_branch_user(
    State(state): State<AppState>,
    Path(branch_id): Path<i32>,
    Query(query): Query<BranchAssignment>,
) -> Result<Json<Value>, AppError> {
    let user_id = query
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation("Could not assign the branch, the user id is missing".to_string())
        })?;

    let updated = users::assign_branch(&state.db, branch_id, &user_id).await?;
    if updated == 0 {
        return Err(AppError::NotFound("Branch or user not found".to_string()));
    }

    Ok(Json(json!({ "message": "Branch assigned successfully" })))
}
