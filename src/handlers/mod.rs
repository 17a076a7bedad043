pub mod branches;
pub mod clients;
pub mod debts;
pub mod deliveries;
pub mod reports;
pub mod users;

use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Liveness plus one database round trip. 503 when the pool cannot serve a
/// `SELECT 1`.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let start = Instant::now();
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "latency_ms": start.elapsed().as_millis() as u64,
                "pool": {
                    "connections": state.db.size(),
                    "idle": state.db.num_idle(),
                },
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check could not reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "error": "database unreachable" })),
            )
        }
    }
}
