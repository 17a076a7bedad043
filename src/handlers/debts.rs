use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::db::debts;
use crate::error::AppError;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayload {
    pub productos: Option<Value>,
    pub buy_date: Option<String>,
    pub exp_date: Option<String>,
    pub client_debt_id: Option<String>,
}

impl DebtPayload {
    /// All four fields are mandatory. Dates arrive as `YYYY-MM-DD` strings
    /// and the debt id as a uuid; both are parsed here so malformed input is
    /// a 400, not a database error.
    fn into_parts(self, missing: &str) -> Result<(Value, NaiveDate, NaiveDate, Uuid), AppError> {
        let productos = self
            .productos
            .filter(|v| !v.is_null())
            .ok_or_else(|| AppError::Validation(missing.to_string()))?;
        let buy_date = self
            .buy_date
            .ok_or_else(|| AppError::Validation(missing.to_string()))?;
        let exp_date = self
            .exp_date
            .ok_or_else(|| AppError::Validation(missing.to_string()))?;
        let debt_id = self
            .client_debt_id
            .ok_or_else(|| AppError::Validation(missing.to_string()))?;

        let buy_date = parse_date(&buy_date, "buyDate")?;
        let exp_date = parse_date(&exp_date, "expDate")?;
        let debt_id = Uuid::parse_str(&debt_id)
            .map_err(|_| AppError::Validation("clientDebtId must be a valid uuid".to_string()))?;

        Ok((productos, buy_date, exp_date, debt_id))
    }
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{field} must be a YYYY-MM-DD date")))
}

pub async fn save_client_debt(
    State(state): State<AppState>,
    Path(cliente_id): Path<i32>,
    Json(body): Json<DebtPayload>,
) -> Result<Json<Value>, AppError> {
    let (productos, buy_date, exp_date, debt_id) =
        body.into_parts("Cannot save the debt, required data is missing")?;

    debts::insert(&state.db, cliente_id, &productos, debt_id, buy_date, exp_date).await?;

    Ok(Json(json!({
        "message": format!("Debt saved successfully! Your debt ID is: {debt_id}")
    })))
}

/// The path still carries the client id for compatibility with existing
/// callers; the debt itself is matched by its stable uuid.
pub async fn update_client_debt(
    State(state): State<AppState>,
    Path(_cliente_id): Path<i32>,
    Json(body): Json<DebtPayload>,
) -> Result<Json<Value>, AppError> {
    let (productos, buy_date, exp_date, debt_id) =
        body.into_parts("Cannot update the debt, required data is missing")?;

    let updated = debts::update_by_uuid(&state.db, debt_id, &productos, buy_date, exp_date).await?;
    if updated == 0 {
        return Err(AppError::NotFound(format!("Debt {debt_id} not found")));
    }

    Ok(Json(json!({ "message": "Debt updated" })))
}

pub async fn delete_client_debt(
    State(state): State<AppState>,
    Path(debt_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = debts::delete_by_uuid(&state.db, debt_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Debt {debt_id} not found")));
    }

    Ok(Json(json!({ "message": "Debt deleted successfully" })))
}

/// Closes a client's debt cycle: archives the current debts and deliveries
/// into history and purges the live rows.
pub async fn cancel_client_debts(
    State(state): State<AppState>,
    Path(cliente_id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    state.lifecycle.cancel_and_archive(cliente_id).await?;
    Ok(Json(json!({ "message": "Debt cancelled successfully!" })))
}
