//! Repository for the `alerts` and `alert_configurations` tables.

use sqlx::PgPool;
use veriscore_core::types::DbId;

use crate::models::alert::{
    Alert, AlertConfigInput, AlertConfiguration, AlertCount, AlertWithVendor, NewAlert,
};

/// Column list for `alerts` SELECT queries.
const ALERT_COLUMNS: &str = "\
    id, vendor_id, alert_type, severity, status, title, description, \
    current_value, threshold_value, variance_percentage, \
    triggered_at, acknowledged_at, resolved_at";

/// Column list for `alert_configurations` SELECT queries.
const CONFIG_COLUMNS: &str = "\
    id, vendor_id, alert_type, threshold_value, is_active, created_at, updated_at";

/// Provides query operations for alerts and their configurations.
pub struct AlertRepo;

impl AlertRepo {
    /// Most recent alerts joined with vendor names, optionally restricted to
    /// one vendor.
    pub async fn recent(
        pool: &PgPool,
        limit: i64,
        vendor_id: Option<DbId>,
    ) -> Result<Vec<AlertWithVendor>, sqlx::Error> {
        let query = "SELECT a.id, a.vendor_id, v.name AS vendor_name, a.alert_type, \
                            a.severity, a.status, a.title, a.description, \
                            a.current_value, a.threshold_value, a.variance_percentage, \
                            a.triggered_at, a.acknowledged_at, a.resolved_at \
                     FROM alerts a \
                     JOIN vendors v ON v.id = a.vendor_id \
                     WHERE ($2::BIGINT IS NULL OR a.vendor_id = $2) \
                     ORDER BY a.triggered_at DESC \
                     LIMIT $1";
        sqlx::query_as::<_, AlertWithVendor>(query)
            .bind(limit)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new alert row (status starts at `active`).
    pub async fn insert(pool: &PgPool, alert: &NewAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts \
                (vendor_id, alert_type, severity, title, description, \
                 current_value, threshold_value, variance_percentage) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {ALERT_COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert.vendor_id)
            .bind(&alert.alert_type)
            .bind(&alert.severity)
            .bind(&alert.title)
            .bind(&alert.description)
            .bind(alert.current_value)
            .bind(alert.threshold_value)
            .bind(alert.variance_percentage)
            .fetch_one(pool)
            .await
    }

    /// Mark an alert acknowledged, stamping `acknowledged_at` with now.
    ///
    /// Restamps on repeat calls; there is deliberately no state guard.
    pub async fn acknowledge(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET status = 'acknowledged', acknowledged_at = NOW() \
             WHERE id = $1 RETURNING {ALERT_COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark an alert resolved, stamping `resolved_at` with now.
    ///
    /// Restamps on repeat calls; there is deliberately no state guard.
    pub async fn resolve(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET status = 'resolved', resolved_at = NOW() \
             WHERE id = $1 RETURNING {ALERT_COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a vendor's alert configurations.
    pub async fn configs_for_vendor(
        pool: &PgPool,
        vendor_id: DbId,
        active_only: bool,
    ) -> Result<Vec<AlertConfiguration>, sqlx::Error> {
        let filter = if active_only {
            "AND is_active = TRUE"
        } else {
            ""
        };
        let query = format!(
            "SELECT {CONFIG_COLUMNS} FROM alert_configurations \
             WHERE vendor_id = $1 {filter} ORDER BY id"
        );
        sqlx::query_as::<_, AlertConfiguration>(&query)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a vendor's configurations wholesale in one transaction
    /// (delete-then-reinsert).
    pub async fn replace_configs(
        pool: &PgPool,
        vendor_id: DbId,
        configs: &[AlertConfigInput],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM alert_configurations WHERE vendor_id = $1")
            .bind(vendor_id)
            .execute(&mut *tx)
            .await?;

        for config in configs {
            sqlx::query(
                "INSERT INTO alert_configurations \
                    (vendor_id, alert_type, threshold_value, is_active) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(vendor_id)
            .bind(&config.alert_type)
            .bind(config.threshold_value)
            .bind(config.is_active)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    // -- Summary queries ----------------------------------------------------

    /// Total alerts triggered within the trailing window.
    pub async fn count_in_window(pool: &PgPool, window_days: i32) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts \
             WHERE triggered_at >= NOW() - make_interval(days => $1)",
        )
        .bind(window_days)
        .fetch_one(pool)
        .await
    }

    /// Resolved alerts triggered within the trailing window.
    pub async fn count_resolved_in_window(
        pool: &PgPool,
        window_days: i32,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM alerts \
             WHERE triggered_at >= NOW() - make_interval(days => $1) \
               AND status = 'resolved'",
        )
        .bind(window_days)
        .fetch_one(pool)
        .await
    }

    /// Alert counts grouped by severity within the trailing window.
    pub async fn counts_by_severity(
        pool: &PgPool,
        window_days: i32,
    ) -> Result<Vec<AlertCount>, sqlx::Error> {
        sqlx::query_as::<_, AlertCount>(
            "SELECT severity AS label, COUNT(*) AS count FROM alerts \
             WHERE triggered_at >= NOW() - make_interval(days => $1) \
             GROUP BY severity",
        )
        .bind(window_days)
        .fetch_all(pool)
        .await
    }

    /// Alert counts grouped by type within the trailing window.
    pub async fn counts_by_type(
        pool: &PgPool,
        window_days: i32,
    ) -> Result<Vec<AlertCount>, sqlx::Error> {
        sqlx::query_as::<_, AlertCount>(
            "SELECT alert_type AS label, COUNT(*) AS count FROM alerts \
             WHERE triggered_at >= NOW() - make_interval(days => $1) \
             GROUP BY alert_type",
        )
        .bind(window_days)
        .fetch_all(pool)
        .await
    }

    /// Alert counts grouped by vendor name within the trailing window,
    /// busiest vendors first.
    pub async fn counts_by_vendor(
        pool: &PgPool,
        window_days: i32,
    ) -> Result<Vec<AlertCount>, sqlx::Error> {
        sqlx::query_as::<_, AlertCount>(
            "SELECT v.name AS label, COUNT(a.id) AS count \
             FROM alerts a \
             JOIN vendors v ON v.id = a.vendor_id \
             WHERE a.triggered_at >= NOW() - make_interval(days => $1) \
             GROUP BY v.id, v.name \
             ORDER BY count DESC",
        )
        .bind(window_days)
        .fetch_all(pool)
        .await
    }
}
