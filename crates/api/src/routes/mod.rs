pub mod alerts;
pub mod analysis;
pub mod comparison;
pub mod health;
pub mod quick;
pub mod vendors;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /vendors                                 list
/// /vendors/summary                         population summary
/// /vendors/benchmark                       ranked benchmark of active vendors
/// /vendors/{id}                            vendor detail (metrics + trends)
/// /vendors/{id}/score                      compute score, refresh cache
/// /vendors/{id}/snapshot                   append metric snapshot (POST)
/// /vendors/{id}/history                    metric snapshot history
/// /vendors/{id}/jurisdictions              per-jurisdiction performance
///
/// /comparison/compare                      side-by-side comparison (POST)
/// /comparison/whatif                       vendor-switch what-if (POST)
/// /comparison/tco                          total cost of ownership (POST)
/// /comparison/jurisdictions                list active jurisdictions
/// /comparison/benchmarks                   market percentile benchmarks
/// /comparison/coverage-heatmap             vendor x jurisdiction grid
///
/// /alerts                                  recent alerts
/// /alerts/summary                          window summary statistics
/// /alerts/types                            enum values
/// /alerts/vendor/{vendor_id}               alerts for one vendor
/// /alerts/vendor/{vendor_id}/sla-check     evaluate thresholds now
/// /alerts/configure                        replace configurations (POST)
/// /alerts/configurations/{vendor_id}       list configurations
/// /alerts/{id}/acknowledge                 acknowledge (POST)
/// /alerts/{id}/resolve                     resolve (POST)
///
/// /analysis/schema-changes                 change log
/// /analysis/schema-changes/vendor/{id}     change log for one vendor
/// /analysis/impact-assessment/{change_id}  impact detail
/// /analysis/quality-trends/{vendor_id}     per-day quality trend
/// /analysis/performance-metrics            cross-vendor performance
/// /analysis/recommendations                requirements-driven ranking
///
/// /quick/compare                           ad-hoc comparison (POST)
/// /quick/upload                            CSV upload (POST, multipart)
/// /quick/results/{session_id}              replay stored results
/// /quick/demo-data                         sample payload
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/vendors", vendors::router())
        .nest("/comparison", comparison::router())
        .nest("/alerts", alerts::router())
        .nest("/analysis", analysis::router())
        .nest("/quick", quick::router())
}
