//! Route definitions for schema-change auditing and cross-vendor analysis.

use axum::routing::get;
use axum::Router;

use crate::handlers::analysis;
use crate::state::AppState;

/// Analysis routes mounted at `/analysis`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schema-changes", get(analysis::schema_changes))
        .route(
            "/schema-changes/vendor/{vendor_id}",
            get(analysis::vendor_schema_changes),
        )
        .route(
            "/impact-assessment/{change_id}",
            get(analysis::impact_assessment),
        )
        .route("/quality-trends/{vendor_id}", get(analysis::quality_trends))
        .route("/performance-metrics", get(analysis::performance_metrics))
        .route("/recommendations", get(analysis::recommendations))
}
