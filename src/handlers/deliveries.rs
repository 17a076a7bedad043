use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::deliveries;
use crate::error::AppError;
use crate::services::lifecycle::is_empty_detail;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPayload {
    pub delivers_data: Option<Value>,
}

impl DeliveryPayload {
    fn detail(self, missing: &str) -> Result<Value, AppError> {
        self.delivers_data
            .filter(|v| !is_empty_detail(v))
            .ok_or_else(|| AppError::Validation(missing.to_string()))
    }
}

/// Recording a delivery also settles every outstanding debt of the client;
/// both writes happen in one transaction inside the lifecycle service.
pub async fn save_client_deliver(
    State(state): State<AppState>,
    Path(cliente_id): Path<i32>,
    Json(body): Json<DeliveryPayload>,
) -> Result<Json<Value>, AppError> {
    let detalle = body.detail("Cannot save the delivery, required data is missing")?;

    state.lifecycle.record_delivery(cliente_id, &detalle).await?;

    Ok(Json(json!({ "message": "Delivery saved and debt state updated!" })))
}

pub async fn update_client_deliver(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<DeliveryPayload>,
) -> Result<Json<Value>, AppError> {
    let detalle = body.detail("Cannot update the delivery, required data is missing")?;

    let updated = deliveries::update(&state.db, id, &detalle).await?;
    if updated == 0 {
        return Err(AppError::NotFound(format!("Delivery {id} not found")));
    }

    Ok(Json(json!({ "message": "Delivery updated!" })))
}

pub async fn delete_client_deliver(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    let deleted = deliveries::delete(&state.db, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Delivery {id} not found")));
    }

    Ok(Json(json!({ "message": "Delivery deleted successfully" })))
}
