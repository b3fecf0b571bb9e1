//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod alert_repo;
pub mod coverage_repo;
pub mod jurisdiction_repo;
pub mod metrics_repo;
pub mod record_repo;
pub mod schema_change_repo;
pub mod vendor_repo;

pub use alert_repo::AlertRepo;
pub use coverage_repo::CoverageRepo;
pub use jurisdiction_repo::JurisdictionRepo;
pub use metrics_repo::MetricsRepo;
pub use record_repo::RecordRepo;
pub use schema_change_repo::SchemaChangeRepo;
pub use vendor_repo::VendorRepo;
