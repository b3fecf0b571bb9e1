//! Route definitions for alerts and threshold configuration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Alert routes mounted at `/alerts`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alerts::list_alerts))
        .route("/summary", get(alerts::alert_summary))
        .route("/types", get(alerts::alert_types))
        .route("/vendor/{vendor_id}", get(alerts::vendor_alerts))
        .route("/vendor/{vendor_id}/sla-check", get(alerts::sla_check))
        .route("/configure", post(alerts::configure_thresholds))
        .route("/configurations/{vendor_id}", get(alerts::list_configurations))
        .route("/{id}/acknowledge", post(alerts::acknowledge_alert))
        .route("/{id}/resolve", post(alerts::resolve_alert))
}
