use std::time::Duration;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use sqlx::PgPool;

use crate::db::debts;

/// How often the expiration sweep wakes up.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(45 * 60);

/// The business runs on Buenos Aires local time; "due today" is decided
/// against this zone, not UTC.
pub const BUSINESS_TZ: Tz = chrono_tz::America::Buenos_Aires;

/// Today's date in the business timezone.
pub fn business_today() -> NaiveDate {
    Utc::now().with_timezone(&BUSINESS_TZ).date_naive()
}

/// Background loop: on every tick, mark each outstanding debt whose due date
/// has passed as inactive. A failed pass is logged and retried on the next
/// tick; the loop itself never exits.
pub async fn run(pool: PgPool) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "expiration sweep started"
    );

    loop {
        let today = business_today();
        match sweep_once(&pool, today).await {
            Ok(0) => tracing::debug!(%today, "expiration sweep found nothing due"),
            Ok(expired) => {
                tracing::info!(%today, expired, "expiration sweep marked debts inactive")
            }
            Err(e) => tracing::error!(%today, error = %e, "expiration sweep failed"),
        }

        tokio::time::sleep(SWEEP_INTERVAL).await;
    }
}

/// A single sweep pass. Marking a debt inactive is one-directional, so
/// running this twice with the same date is a no-op the second time.
pub async fn sweep_once(pool: &PgPool, today: NaiveDate) -> Result<u64, sqlx::Error> {
    debts::expire_due(pool, today).await
}
