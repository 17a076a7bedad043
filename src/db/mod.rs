use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;

pub mod branches;
pub mod clients;
pub mod debts;
pub mod deliveries;
pub mod history;
pub mod models;
pub mod reports;
pub mod users;

/// Upper bound on any single statement. Nothing in this service should run
/// longer; a wedged transaction would otherwise pin a pooled connection.
const STATEMENT_TIMEOUT: &str = "30s";

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.database_url)?
        .options([("statement_timeout", STATEMENT_TIMEOUT)]);

    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}
