//! Route definitions for comparison and cost analytics.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::comparison;
use crate::state::AppState;

/// Comparison routes mounted at `/comparison`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/compare", post(comparison::compare_vendors))
        .route("/whatif", post(comparison::what_if_analysis))
        .route("/tco", post(comparison::calculate_tco))
        .route("/jurisdictions", get(comparison::list_jurisdictions))
        .route("/benchmarks", get(comparison::market_benchmarks))
        .route("/coverage-heatmap", get(comparison::coverage_heatmap))
}
