use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::{clients, debts, deliveries};
use crate::error::AppError;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    pub user_name: Option<String>,
    pub user_dni: Option<String>,
    pub user_phone: Option<String>,
    pub user_email: Option<String>,
}

impl ClientPayload {
    /// Name and DNI are mandatory; phone and email may be blank.
    fn name_and_dni(&self) -> Option<(&str, &str)> {
        let name = self.user_name.as_deref().filter(|s| !s.trim().is_empty())?;
        let dni = self.user_dni.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((name, dni))
    }
}

pub async fn save_client(
    State(state): State<AppState>,
    Json(body): Json<ClientPayload>,
) -> Result<Json<Value>, AppError> {
    let (name, dni) = body.name_and_dni().ok_or_else(|| {
        AppError::Validation("Cannot create the client, required data is missing".to_string())
    })?;

    clients::insert(
        &state.db,
        name,
        dni,
        body.user_phone.as_deref(),
        body.user_email.as_deref(),
    )
    .await?;

    Ok(Json(json!({ "message": "Client saved successfully!" })))
}

pub async fn get_all_clients(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let clientes = clients::list(&state.db).await?;
    Ok(Json(json!({ "clientes": clientes })))
}

pub async fn edit_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ClientPayload>,
) -> Result<Json<Value>, AppError> {
    let (name, dni) = body.name_and_dni().ok_or_else(|| {
        AppError::Validation(
            "Required data is missing, check that the DNI and full name are present".to_string(),
        )
    })?;

    let updated = clients::update(
        &state.db,
        id,
        name,
        dni,
        body.user_phone.as_deref(),
        body.user_email.as_deref(),
    )
    .await?;
    if updated == 0 {
        return Err(AppError::NotFound(format!("Client {id} not found")));
    }

    Ok(Json(json!({ "message": "Client updated" })))
}

/// Removing a client takes its debts, deliveries and history with it, all or
/// nothing.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    state.lifecycle.delete_client_cascade(id).await?;
    Ok(Json(json!({ "message": "Client deleted successfully!" })))
}

/// Full view of one client: name plus every live debt and delivery.
pub async fn get_client_file(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let nombre_cliente = clients::name_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {id} not found")))?;

    let deudas = debts::list_by_client(&state.db, id).await?;
    let entregas = deliveries::list_by_client(&state.db, id).await?;

    Ok(Json(json!({
        "nombre_cliente": nombre_cliente,
        "deudas": deudas,
        "entregas": entregas,
    })))
}
