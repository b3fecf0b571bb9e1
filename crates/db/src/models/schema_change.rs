//! Schema-change audit entity model.

use serde::Serialize;
use sqlx::FromRow;
use veriscore_core::types::{DbId, Timestamp};

/// A vendor's reported data-format change. Informational only; never
/// consumed by the scoring engine.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SchemaChange {
    pub id: DbId,
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub change_description: String,
    pub field_affected: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub records_affected: i32,
    pub change_date: Timestamp,
}
