//! Jurisdiction entity model.

use serde::Serialize;
use sqlx::FromRow;
use veriscore_core::types::DbId;

/// A court jurisdiction vendors deliver records from.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Jurisdiction {
    pub id: DbId,
    pub name: String,
    pub state: String,
    pub county: String,
    pub is_active: bool,
}
