//! Handlers for the ad-hoc quick-comparison flow: CSV upload, comparison
//! without persistence, session replay, and demo data.

use axum::extract::{Multipart, Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use veriscore_core::error::CoreError;
use veriscore_core::ingest::{
    self, effective_quality_score, parse_vendor_csv, VendorInput, MAX_VENDOR_NAME_LENGTH,
};
use veriscore_core::ranking::{recommendation_score, Priority};
use veriscore_core::scoring::calculate_value_index;
use veriscore_core::types::{round1, round2, Timestamp};
use veriscore_core::validation;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::sessions::QuickSession;
use crate::state::AppState;

const SESSION_GONE: &str = "Session expired or not found";

// ---------------------------------------------------------------------------
// Request/response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct QuickComparisonRequest {
    pub vendors: Vec<VendorInput>,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub priority: Priority,
    pub annual_volume: Option<i64>,
}

fn default_mode() -> String {
    "side-by-side".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct RawMetrics {
    pub pii_completeness: Option<f64>,
    pub disposition_accuracy: Option<f64>,
    pub avg_freshness_days: Option<f64>,
    pub coverage_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedVendor {
    pub name: String,
    pub cost_per_record: f64,
    pub quality_score: f64,
    pub value_index: f64,
    pub description: Option<String>,
    pub raw_metrics: RawMetrics,
    pub recommendation_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankEntry {
    pub rank: usize,
    pub name: String,
    pub quality_score: f64,
    pub cost_per_record: f64,
    pub value_index: f64,
    pub recommendation_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostComparisonEntry {
    pub name: String,
    pub annual_cost: f64,
    pub quality_score: f64,
    pub value_index: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickRecommendations {
    pub annual_volume: i64,
    pub cost_comparison: Vec<CostComparisonEntry>,
    pub best_value: Option<String>,
    pub cheapest: String,
    pub highest_quality: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub session_id: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub vendors: Vec<ProcessedVendor>,
    pub rankings: Vec<RankEntry>,
    pub recommendations: Option<QuickRecommendations>,
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

fn validate_vendor_input(input: &VendorInput) -> Result<(), CoreError> {
    if input.name.is_empty() || input.name.len() > MAX_VENDOR_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Vendor name must be 1-{MAX_VENDOR_NAME_LENGTH} characters"
        )));
    }
    if input.cost_per_record <= 0.0 {
        return Err(CoreError::Validation(
            "cost_per_record must be greater than 0".to_string(),
        ));
    }

    let percentage_fields = [
        ("quality_score", input.quality_score),
        ("pii_completeness", input.pii_completeness),
        ("disposition_accuracy", input.disposition_accuracy),
        ("coverage_percentage", input.coverage_percentage),
    ];
    for (name, value) in percentage_fields {
        if let Some(v) = value {
            if !(0.0..=100.0).contains(&v) {
                return Err(CoreError::Validation(format!(
                    "{name} must be between 0 and 100"
                )));
            }
        }
    }
    if let Some(freshness) = input.avg_freshness_days {
        if freshness < 0.0 {
            return Err(CoreError::Validation(
                "avg_freshness_days must be non-negative".to_string(),
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /quick/compare
// ---------------------------------------------------------------------------

/// Compare ad-hoc vendors without touching the database.
///
/// Results are kept in the in-memory session store for 24 hours so a share
/// link can replay them.
pub async fn quick_compare(
    State(state): State<AppState>,
    Json(request): Json<QuickComparisonRequest>,
) -> AppResult<impl IntoResponse> {
    validation::validate_quick_comparison_count(request.vendors.len())?;
    if !matches!(request.mode.as_str(), "side-by-side" | "what-if") {
        return Err(CoreError::Validation(format!("Unknown comparison mode: {}", request.mode)).into());
    }
    if let Some(volume) = request.annual_volume {
        if volume < validation::MIN_ANNUAL_VOLUME {
            return Err(CoreError::Validation(format!(
                "annual_volume must be at least {}",
                validation::MIN_ANNUAL_VOLUME
            ))
            .into());
        }
    }
    for vendor in &request.vendors {
        validate_vendor_input(vendor)?;
    }

    let processed: Vec<ProcessedVendor> = request
        .vendors
        .iter()
        .map(|v| {
            let quality_score = effective_quality_score(v);
            let value_index = calculate_value_index(quality_score, v.cost_per_record);
            ProcessedVendor {
                name: v.name.clone(),
                cost_per_record: round2(v.cost_per_record),
                quality_score: round1(quality_score),
                value_index,
                description: v.description.clone(),
                raw_metrics: RawMetrics {
                    pii_completeness: v.pii_completeness,
                    disposition_accuracy: v.disposition_accuracy,
                    avg_freshness_days: v.avg_freshness_days,
                    coverage_percentage: v.coverage_percentage,
                },
                recommendation_score: recommendation_score(
                    request.priority,
                    quality_score,
                    value_index,
                    v.cost_per_record,
                ),
            }
        })
        .collect();

    let mut ranked = processed.clone();
    ranked.sort_by(|a, b| {
        b.recommendation_score
            .partial_cmp(&a.recommendation_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let rankings: Vec<RankEntry> = ranked
        .iter()
        .enumerate()
        .map(|(i, v)| RankEntry {
            rank: i + 1,
            name: v.name.clone(),
            quality_score: v.quality_score,
            cost_per_record: v.cost_per_record,
            value_index: v.value_index,
            recommendation_score: round1(v.recommendation_score),
        })
        .collect();

    let recommendations = request.annual_volume.map(|volume| {
        let cheapest = processed
            .iter()
            .min_by(|a, b| {
                a.cost_per_record
                    .partial_cmp(&b.cost_per_record)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|v| v.name.clone())
            .unwrap_or_default();
        let highest_quality = processed
            .iter()
            .max_by(|a, b| {
                a.quality_score
                    .partial_cmp(&b.quality_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|v| v.name.clone())
            .unwrap_or_default();

        QuickRecommendations {
            annual_volume: volume,
            cost_comparison: ranked
                .iter()
                .take(3)
                .map(|v| CostComparisonEntry {
                    name: v.name.clone(),
                    annual_cost: round2(v.cost_per_record * volume as f64),
                    quality_score: v.quality_score,
                    value_index: v.value_index,
                })
                .collect(),
            best_value: rankings.first().map(|r| r.name.clone()),
            cheapest,
            highest_quality,
        }
    });

    let session_id = Uuid::new_v4();
    let mut session = QuickSession::new(request.vendors, None);

    let result = ComparisonResult {
        session_id: session_id.to_string(),
        created_at: session.created_at,
        expires_at: session.expires_at,
        vendors: processed,
        rankings,
        recommendations,
    };

    session.results = Some(
        serde_json::to_value(&result)
            .map_err(|e| AppError::InternalError(format!("Failed to serialize results: {e}")))?,
    );
    state.sessions.put(session_id, session).await;

    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// POST /quick/upload
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub session_id: String,
    pub vendors: Vec<VendorInput>,
    pub columns_detected: Vec<String>,
    pub message: String,
}

/// Accept a multipart CSV upload of vendor data and stage it in a session.
pub async fn upload_vendor_data(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file received in upload".to_string()))?;

    if !filename.to_lowercase().ends_with(".csv") {
        return Err(AppError::BadRequest(
            "Only CSV files are supported".to_string(),
        ));
    }

    let parsed = parse_vendor_csv(&bytes)?;
    let vendor_count = parsed.vendors.len();

    let session_id = Uuid::new_v4();
    state
        .sessions
        .put(session_id, QuickSession::new(parsed.vendors.clone(), None))
        .await;

    tracing::info!(
        %session_id,
        vendors = vendor_count,
        "Quick comparison upload staged",
    );

    Ok(Json(DataResponse {
        data: UploadResponse {
            session_id: session_id.to_string(),
            vendors: parsed.vendors,
            columns_detected: parsed.columns_detected,
            message: format!("Successfully uploaded {vendor_count} vendors"),
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /quick/results/{session_id}
// ---------------------------------------------------------------------------

/// Replay stored comparison results by session id.
pub async fn quick_results(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = Uuid::parse_str(&session_id)
        .map_err(|_| AppError::NotFound(SESSION_GONE.to_string()))?;

    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(SESSION_GONE.to_string()))?;

    let results = session
        .results
        .ok_or_else(|| AppError::BadRequest("No results found for this session".to_string()))?;

    Ok(Json(DataResponse { data: results }))
}

// ---------------------------------------------------------------------------
// GET /quick/demo-data
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DemoData {
    pub vendors: Vec<VendorInput>,
    pub message: &'static str,
}

/// Sample vendor data for demo mode.
pub async fn demo_data() -> Json<DataResponse<DemoData>> {
    let vendor = |name: &str,
                  cost: f64,
                  quality: f64,
                  pii: f64,
                  disposition: f64,
                  freshness: f64,
                  coverage: f64,
                  description: &str| {
        ingest::VendorInput {
            name: name.to_string(),
            cost_per_record: cost,
            quality_score: Some(quality),
            pii_completeness: Some(pii),
            disposition_accuracy: Some(disposition),
            avg_freshness_days: Some(freshness),
            coverage_percentage: Some(coverage),
            description: Some(description.to_string()),
        }
    };

    Json(DataResponse {
        data: DemoData {
            vendors: vec![
                vendor(
                    "Acme Records",
                    12.50,
                    88.5,
                    92.0,
                    89.0,
                    3.5,
                    85.0,
                    "Premium provider with excellent accuracy",
                ),
                vendor(
                    "Budget Checks",
                    6.75,
                    74.2,
                    78.0,
                    82.0,
                    5.2,
                    72.0,
                    "Cost-effective option for basic needs",
                ),
                vendor(
                    "FastTrack Data",
                    9.25,
                    82.8,
                    85.0,
                    86.0,
                    2.1,
                    91.0,
                    "Fast turnaround with good coverage",
                ),
                vendor(
                    "Elite Verification",
                    18.00,
                    95.1,
                    98.0,
                    95.0,
                    1.8,
                    96.0,
                    "Enterprise-grade accuracy and coverage",
                ),
            ],
            message: "Sample data loaded. Upload your own CSV for real comparison.",
        },
    })
}
