//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the write paths that need them
//! - Narrow projection rows for the scoring and analytics queries

pub mod alert;
pub mod coverage;
pub mod jurisdiction;
pub mod metrics;
pub mod record;
pub mod schema_change;
pub mod vendor;
