use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer. `nombre_completo` is always stored lower-cased.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Client {
    pub id: i32,
    pub nombre_completo: String,
    pub dni: String,
    pub telefono: Option<String>,
    pub email: Option<String>,
}

/// An outstanding charge against a client.
///
/// `deuda_uuid` is the externally supplied stable identifier: the frontend
/// mints it so a debt can be referenced before the row id is known. `estado`
/// is true while the debt is outstanding and flips to false when the debt
/// expires or a delivery closes out the client's debts; it never flips back.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Debt {
    pub id: i32,
    pub cliente_id: i32,
    pub detalles: serde_json::Value,
    pub deuda_uuid: Uuid,
    pub fecha_compra: NaiveDate,
    pub fecha_vencimiento: NaiveDate,
    pub estado: bool,
}

/// A payment or goods delivery recorded against a client's debts.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Delivery {
    pub id: i32,
    pub detalle_entrega: serde_json::Value,
    pub id_entrega_cliente: i32,
    pub create_date: DateTime<Utc>,
}

/// Immutable snapshot of a client's debts and deliveries, written by
/// cancel-and-archive. The only durable record of a cancelled debt cycle.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i32,
    pub historial_cliente_id: i32,
    pub detalle_deudas: serde_json::Value,
    pub detalle_entregas: serde_json::Value,
    pub fecha_cancelacion: DateTime<Utc>,
}

/// An identity-provider user with its authorization flags. The profile fields
/// come from the external provider and are stored as given.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct AllowedUser {
    pub id: i32,
    pub user_name: String,
    pub user_email: String,
    pub user_id: String,
    pub user_image: Option<String>,
    pub autorizado: bool,
    pub administrador: bool,
    pub id_punto_venta: Option<i32>,
}

/// A business branch ("punto de venta").
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Branch {
    pub id: i32,
    pub business_name: String,
}

/// One administrative action, as reported by the frontend.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ActionLog {
    pub id: i32,
    pub user_id: String,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub action_type: String,
    pub entity: Option<String>,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub details: Option<String>,
    pub day: Option<String>,
    pub time: Option<String>,
}
