//! Route definitions for the ad-hoc quick-comparison flow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::quick;
use crate::state::AppState;

/// Quick-comparison routes mounted at `/quick`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/compare", post(quick::quick_compare))
        .route("/upload", post(quick::upload_vendor_data))
        .route("/results/{session_id}", get(quick::quick_results))
        .route("/demo-data", get(quick::demo_data))
}
