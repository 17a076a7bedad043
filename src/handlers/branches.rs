use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::branches;
use crate::error::AppError;
use crate::AppState;

/// The body is the branch name as plain text, not JSON.
pub async fn save_branch(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<Value>, AppError> {
    let name = body.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "The new branch name was not provided".to_string(),
        ));
    }

    branches::insert(&state.db, name).await?;

    Ok(Json(json!({ "message": "Branch saved!" })))
}

pub async fn get_branches(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let sucursales = branches::list(&state.db).await?;
    if sucursales.is_empty() {
        return Err(AppError::NotFound(
            "No branches registered yet, you can save one now".to_string(),
        ));
    }

    Ok(Json(json!({ "sucursales": sucursales })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRename {
    pub branch_id: Option<i32>,
    pub branch_name: Option<String>,
}

pub async fn edit_branch_name(
    State(state): State<AppState>,
    Json(body): Json<BranchRename>,
) -> Result<Json<Value>, AppError> {
    let (id, name) = match (body.branch_id, body.branch_name.as_deref()) {
        (Some(id), Some(name)) if !name.trim().is_empty() => (id, name.trim()),
        _ => {
            return Err(AppError::Validation(
                "The branch name or id was not provided".to_string(),
            ))
        }
    };

    let updated = branches::rename(&state.db, id, name).await?;
    if updated == 0 {
        return Err(AppError::NotFound(
            "The selected branch was not found".to_string(),
        ));
    }

    Ok(Json(json!({ "message": "Branch updated!" })))
}

pub async fn delete_branch(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let deleted = branches::delete(&state.db, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("No branch found with that id".to_string()));
    }

    Ok(Json(json!({ "message": "Branch deleted" })))
}
