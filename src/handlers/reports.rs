use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::db::reports::{self, NewActionLog};
use crate::db::{clients, debts, deliveries};
use crate::error::AppError;
use crate::services::sweep;
use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpirationSummary {
    client_id: i32,
    cliente: String,
    deudas_vencidas: i64,
    fecha_vencimiento: Vec<String>,
}

/// Inactive debts grouped per client, with due dates rendered `DD/MM/YYYY`.
/// A debt whose client row has since disappeared is still reported, under a
/// placeholder name.
pub async fn get_all_expirations(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let inactive = debts::list_inactive(&state.db).await?;
    if inactive.is_empty() {
        return Ok(Json(json!({ "message": "No expired debts found" })));
    }

    let names: HashMap<i32, String> = clients::list_names(&state.db).await?.into_iter().collect();

    let mut vencimientos: Vec<ExpirationSummary> = Vec::new();
    for debt in &inactive {
        let due = debt.fecha_vencimiento.format("%d/%m/%Y").to_string();
        match vencimientos
            .iter_mut()
            .find(|entry| entry.client_id == debt.cliente_id)
        {
            Some(entry) => {
                entry.deudas_vencidas += 1;
                entry.fecha_vencimiento.push(due);
            }
            None => vencimientos.push(ExpirationSummary {
                client_id: debt.cliente_id,
                cliente: names
                    .get(&debt.cliente_id)
                    .cloned()
                    .unwrap_or_else(|| "unknown client".to_string()),
                deudas_vencidas: 1,
                fecha_vencimiento: vec![due],
            }),
        }
    }
    vencimientos.sort_by_key(|entry| entry.client_id);

    Ok(Json(json!({ "vencimientos": vencimientos })))
}

/// First and last day of the month containing `today`.
fn month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.with_day(1).unwrap_or(today);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .unwrap_or(today);
    (start, end)
}

/// Month-to-date view in the business timezone: deliveries created this
/// month (`pagos`) and outstanding debts expiring this month
/// (`vencimientos`).
pub async fn get_dashboard_data(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let (start, end) = month_window(sweep::business_today());

    let pagos = deliveries::list_in_window(&state.db, start, end).await?;
    let vencimientos = debts::list_due_in_window(&state.db, start, end).await?;

    Ok(Json(json!({ "pagos": pagos, "vencimientos": vencimientos })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLogPayload {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub action_type: Option<String>,
    pub entity: Option<String>,
    pub old_data: Option<Value>,
    pub new_data: Option<Value>,
    pub details: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
}

pub async fn save_action_logs(
    State(state): State<AppState>,
    Json(body): Json<ActionLogPayload>,
) -> Result<Json<Value>, AppError> {
    let (user_id, action_type) = match (body.user_id, body.action_type) {
        (Some(user), Some(action)) if !user.trim().is_empty() && !action.trim().is_empty() => {
            (user, action)
        }
        _ => {
            return Err(AppError::Validation(
                "Cannot save the log, actor and action type are required".to_string(),
            ))
        }
    };

    let log = NewActionLog {
        user_id,
        user_name: body.user_name,
        user_image: body.user_image,
        action_type,
        entity: body.entity,
        old_data: body.old_data,
        new_data: body.new_data,
        details: body.details,
        day: body.day,
        time: body.time,
    };

    reports::insert_log(&state.db, &log).await?;

    Ok(Json(json!({ "message": "Action log saved" })))
}

pub async fn get_logs(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let logs = reports::list_logs(&state.db).await?;
    if logs.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No reports found.", "reports": [] })),
        ));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Reports retrieved!", "reports": logs })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_window_covers_whole_month() {
        let (start, end) = month_window(date(2024, 6, 15));
        assert_eq!(start, date(2024, 6, 1));
        assert_eq!(end, date(2024, 6, 30));
    }

    #[test]
    fn test_month_window_handles_december() {
        let (start, end) = month_window(date(2024, 12, 31));
        assert_eq!(start, date(2024, 12, 1));
        assert_eq!(end, date(2024, 12, 31));
    }

    #[test]
    fn test_month_window_handles_leap_february() {
        let (_, end) = month_window(date(2024, 2, 10));
        assert_eq!(end, date(2024, 2, 29));
    }
}
