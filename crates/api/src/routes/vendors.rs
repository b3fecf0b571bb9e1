//! Route definitions for vendor listing, scoring, and history.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::vendors;
use crate::state::AppState;

/// Vendor routes mounted at `/vendors`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vendors::list_vendors))
        .route("/summary", get(vendors::vendors_summary))
        .route("/benchmark", get(vendors::benchmark_vendors))
        .route("/{id}", get(vendors::vendor_detail))
        .route("/{id}/score", get(vendors::vendor_score))
        .route("/{id}/snapshot", post(vendors::record_snapshot))
        .route("/{id}/history", get(vendors::vendor_history))
        .route("/{id}/jurisdictions", get(vendors::vendor_jurisdictions))
}
