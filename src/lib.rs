pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use crate::services::DebtLifecycleService;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub lifecycle: DebtLifecycleService,
    /// Email that is auto-promoted to administrator on first sign-in.
    pub admin_email: Option<String>,
}

impl AppState {
    pub fn new(db: PgPool, admin_email: Option<String>) -> Self {
        let lifecycle = DebtLifecycleService::new(db.clone());
        Self {
            db,
            lifecycle,
            admin_email,
        }
    }
}

/// Builds the full route table around the shared state.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // identity and permissions
        .route("/save-new-user", post(handlers::users::save_new_user))
        .route("/get-all-users", get(handlers::users::get_all_users))
        .route("/delete-user/:id", delete(handlers::users::delete_user))
        .route("/grant-access/:id", put(handlers::users::grant_access))
        .route(
            "/change-branch-user/:id",
            put(handlers::users::change_branch_user),
        )
        // clients
        .route("/save-client", post(handlers::clients::save_client))
        .route("/get-all-clients", get(handlers::clients::get_all_clients))
        .route("/edit-client/:id", put(handlers::clients::edit_client))
        .route("/delete-client/:id", delete(handlers::clients::delete_client))
        .route(
            "/get-client-file/:id",
            get(handlers::clients::get_client_file),
        )
        // debts
        .route(
            "/save-client-debt/:id",
            post(handlers::debts::save_client_debt),
        )
        .route(
            "/update-client-debt/:clientId",
            put(handlers::debts::update_client_debt),
        )
        .route(
            "/delete-client-debt/:debtId",
            delete(handlers::debts::delete_client_debt),
        )
        .route(
            "/cancel-client-debts/:clientId",
            post(handlers::debts::cancel_client_debts),
        )
        // deliveries
        .route(
            "/save-client-deliver/:id",
            post(handlers::deliveries::save_client_deliver),
        )
        .route(
            "/update-client-deliver/:id",
            put(handlers::deliveries::update_client_deliver),
        )
        .route(
            "/delete-client-deliver/:id",
            delete(handlers::deliveries::delete_client_deliver),
        )
        // reporting and audit
        .route(
            "/get-all-expirations",
            get(handlers::reports::get_all_expirations),
        )
        .route(
            "/get-dashboard-data",
            get(handlers::reports::get_dashboard_data),
        )
        .route("/save-action-logs", post(handlers::reports::save_action_logs))
        .route("/get-logs", get(handlers::reports::get_logs))
        // branches
        .route("/save-branch", post(handlers::branches::save_branch))
        .route("/get-branches", get(handlers::branches::get_branches))
        .route(
            "/edit-branch-name",
            put(handlers::branches::edit_branch_name),
        )
        .route("/delete-branch/:id", delete(handlers::branches::delete_branch))
        .layer(axum::middleware::from_fn(
            middleware::request_logger::request_logger,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
