//! Debt lifecycle orchestration: the only component that spans multiple
//! tables in one transaction. Everything here either commits completely or
//! rolls back completely; a dropped transaction rolls back on its own, so
//! every early exit leaves the database untouched.

use chrono::Utc;
use sqlx::PgPool;

use crate::db::{clients, debts, deliveries, history};
use crate::error::AppError;

#[derive(Clone)]
pub struct DebtLifecycleService {
    pool: PgPool,
}

impl DebtLifecycleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a delivery for the client and closes out all of the client's
    /// debts in the same transaction.
    ///
    /// A delivery with no debts to settle (or vice versa) is not a valid
    /// outcome, so a zero-rows result at either step aborts the whole
    /// operation.
    pub async fn record_delivery(
        &self,
        cliente_id: i32,
        detalle_entrega: &serde_json::Value,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let inserted = deliveries::insert_in_tx(&mut tx, cliente_id, detalle_entrega).await?;
        if inserted == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict("delivery not recorded".to_string()));
        }

        let settled = debts::settle_all_for_client(&mut tx, cliente_id).await?;
        if settled == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict("debt state not updated".to_string()));
        }

        tx.commit().await?;

        tracing::info!(cliente_id, debts_settled = settled, "delivery recorded");
        Ok(())
    }

    /// Archives the client's current debts and deliveries into one history
    /// row, then purges the live rows, all inside one transaction.
    ///
    /// The history row never exists without the purge and the purge never
    /// happens without the history row. A concurrent delete between the
    /// snapshot and the purge makes the purge count zero and fails the whole
    /// cancellation.
    pub async fn cancel_and_archive(&self, cliente_id: i32) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let debts = debts::snapshot_by_client(&mut tx, cliente_id).await?;
        let deliveries = deliveries::snapshot_by_client(&mut tx, cliente_id).await?;

        // A client with no debts or no deliveries has no cycle to close.
        if debts.is_empty() || deliveries.is_empty() {
            tx.rollback().await?;
            return Err(AppError::Conflict("nothing to cancel".to_string()));
        }

        let debts_snapshot = serde_json::to_value(&debts)
            .map_err(|e| AppError::Internal(format!("failed to serialize debts: {e}")))?;
        let deliveries_snapshot = serde_json::to_value(&deliveries)
            .map_err(|e| AppError::Internal(format!("failed to serialize deliveries: {e}")))?;

        let archived = history::insert_snapshot(
            &mut tx,
            cliente_id,
            &debts_snapshot,
            &deliveries_snapshot,
            Utc::now(),
        )
        .await?;
        if archived == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict("archive failed".to_string()));
        }

        let debts_purged = debts::purge_by_client(&mut tx, cliente_id).await?;
        let deliveries_purged = deliveries::purge_by_client(&mut tx, cliente_id).await?;
        if debts_purged == 0 || deliveries_purged == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict("cancel failed".to_string()));
        }

        tx.commit().await?;

        tracing::info!(
            cliente_id,
            debts = debts_purged,
            deliveries = deliveries_purged,
            "debt cycle cancelled and archived"
        );
        Ok(())
    }

    /// Deletes a client and everything it owns: history entries, deliveries,
    /// debts, then the client row itself, in one transaction. The dependent
    /// deletes may legitimately affect zero rows; only a missing client row
    /// aborts.
    pub async fn delete_client_cascade(&self, cliente_id: i32) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        history::purge_by_client(&mut tx, cliente_id).await?;
        deliveries::purge_by_client(&mut tx, cliente_id).await?;
        debts::purge_by_client(&mut tx, cliente_id).await?;

        let deleted = clients::delete_in_tx(&mut tx, cliente_id).await?;
        if deleted == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("Client {cliente_id} not found")));
        }

        tx.commit().await?;

        tracing::info!(cliente_id, "client and dependents deleted");
        Ok(())
    }
}

/// True when a delivery-detail payload carries nothing worth storing: JSON
/// null or an empty string/array/object.
pub fn is_empty_detail(detail: &serde_json::Value) -> bool {
    match detail {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.trim().is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_and_blank_containers_are_empty() {
        assert!(is_empty_detail(&serde_json::Value::Null));
        assert!(is_empty_detail(&json!("")));
        assert!(is_empty_detail(&json!("   ")));
        assert!(is_empty_detail(&json!([])));
        assert!(is_empty_detail(&json!({})));
    }

    #[test]
    fn test_real_payloads_are_not_empty() {
        assert!(!is_empty_detail(&json!("entrega parcial")));
        assert!(!is_empty_detail(&json!([{ "producto": "harina", "monto": 1500 }])));
        assert!(!is_empty_detail(&json!({ "monto": 200 })));
        assert!(!is_empty_detail(&json!(0)));
    }
}
