//! # API REST
//!
//! REST API for the qSOFA dashboard.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, status codes)
//!
//! The browser is the presentation layer: it uploads payload text, picks a patient, and renders
//! the [`DashboardView`] returned here. All scoring and validation is done by `qsofa-core`.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use qsofa_core::{
    classify, sample_patients, score, CoreConfig, DashboardError, DashboardView, Importer,
    Session, SessionEvent, Vitals,
};

type ApiError = (StatusCode, String);

/// Application state shared across REST API handlers
///
/// Holds the single dashboard session and the configuration resolved at startup. The session is
/// behind a mutex so that each request runs its core operation to completion before the next one
/// touches it.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    session: Arc<Mutex<Session>>,
}

impl AppState {
    /// Creates state with the built-in sample patients loaded and the first one selected.
    pub fn new(cfg: CoreConfig) -> Self {
        let mut session = Session::with_samples();
        session.subscribe(|event: &SessionEvent| {
            tracing::info!("session changed: {:?}", event);
        });

        Self {
            cfg: Arc::new(cfg),
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn session(&self) -> Result<MutexGuard<'_, Session>, ApiError> {
        self.session.lock().map_err(|_| {
            tracing::error!("dashboard session lock poisoned");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            )
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PatientSummary {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub score: Option<u8>,
    pub tier: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ListPatientsRes {
    pub patients: Vec<PatientSummary>,
    pub selected: Option<usize>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ImportRes {
    pub imported: usize,
    pub selected: Option<usize>,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SelectReq {
    pub index: Option<usize>,
    pub id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardRes {
    pub index: usize,
    #[schema(value_type = Object)]
    pub dashboard: DashboardView,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ScoreReq {
    pub hr: Option<f64>,
    pub rr: f64,
    pub sbp: f64,
    pub temp: Option<f64>,
    pub ams: bool,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRes {
    pub score: u8,
    pub rr_high: bool,
    pub sbp_low: bool,
    pub ams_positive: bool,
    pub tier: String,
    pub label: String,
    pub advisory: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_patients,
        import_patients,
        load_samples,
        select_patient,
        current_dashboard,
        score_vitals,
    ),
    components(schemas(
        HealthRes,
        PatientSummary,
        ListPatientsRes,
        SkippedRecord,
        ImportRes,
        SelectReq,
        DashboardRes,
        ScoreReq,
        ScoreRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router over `state`, including Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/patients", get(list_patients))
        .route("/patients/import", post(import_patients))
        .route("/patients/samples", post(load_samples))
        .route("/patients/select", post(select_patient))
        .route("/dashboard", get(current_dashboard))
        .route("/score", post(score_vitals))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Maps a core error onto an HTTP status and message.
///
/// Invariant violations are programming errors: they are logged and surface as a bare 500.
fn error_response(err: DashboardError) -> ApiError {
    match err {
        DashboardError::Import(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        DashboardError::IndexOutOfRange { .. } | DashboardError::UnknownPatient(_) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        DashboardError::InvalidVitals { .. } => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        DashboardError::InvalidConfig(_) | DashboardError::InvariantViolation(_) => {
            tracing::error!("dashboard error: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            )
        }
    }
}

fn dashboard_for(session: &Session) -> Result<Json<DashboardRes>, ApiError> {
    let (index, record) = match (session.selected_index(), session.current()) {
        (Some(index), Some(record)) => (index, record),
        _ => {
            return Err((
                StatusCode::NOT_FOUND,
                "no patient selected".to_string(),
            ))
        }
    };
    let dashboard = DashboardView::build(record).map_err(error_response)?;
    Ok(Json(DashboardRes { index, dashboard }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "qSOFA dashboard is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "Loaded patients in selector order", body = ListPatientsRes),
        (status = 500, description = "Internal server error")
    )
)]
/// List the loaded patients with their score and tier
///
/// Drives the patient selector. A record whose vitals cannot be scored is still listed, with
/// `score` and `tier` left empty.
#[axum::debug_handler]
async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<ListPatientsRes>, ApiError> {
    let session = state.session()?;
    let patients = session
        .patients()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let result = score(&record.vitals).ok();
            let tier = result
                .and_then(|r| classify(r.score).ok())
                .map(|t| t.label().to_string());
            PatientSummary {
                index,
                id: record.id().to_string(),
                name: record.info.name.clone(),
                score: result.map(|r| r.score),
                tier,
            }
        })
        .collect();

    Ok(Json(ListPatientsRes {
        patients,
        selected: session.selected_index(),
    }))
}

#[utoipa::path(
    post,
    path = "/patients/import",
    request_body(content = String, description = "Patient payload text", content_type = "application/json"),
    responses(
        (status = 200, description = "Patients imported and adopted", body = ImportRes),
        (status = 400, description = "Payload rejected; session unchanged")
    )
)]
/// Import a patient payload and replace the session's list
///
/// The body is taken as raw text so that malformed JSON reaches the importer and is reported
/// with its reason. On failure the current list and selection are kept.
#[axum::debug_handler]
async fn import_patients(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportRes>, ApiError> {
    let report = Importer::new(&state.cfg)
        .import(&body)
        .map_err(error_response)?;

    let imported = report.patients.len();
    let skipped = report
        .skipped
        .into_iter()
        .map(|issue| SkippedRecord {
            index: issue.index,
            reason: issue.reason,
        })
        .collect();

    let mut session = state.session()?;
    session.load_list(report.patients);

    Ok(Json(ImportRes {
        imported,
        selected: session.selected_index(),
        skipped,
    }))
}

#[utoipa::path(
    post,
    path = "/patients/samples",
    responses(
        (status = 200, description = "Built-in samples loaded", body = ImportRes)
    )
)]
/// Replace the session's list with the built-in sample scenarios
#[axum::debug_handler]
async fn load_samples(State(state): State<AppState>) -> Result<Json<ImportRes>, ApiError> {
    let samples = sample_patients();
    let imported = samples.len();

    let mut session = state.session()?;
    session.load_list(samples);

    Ok(Json(ImportRes {
        imported,
        selected: session.selected_index(),
        skipped: Vec::new(),
    }))
}

#[utoipa::path(
    post,
    path = "/patients/select",
    request_body = SelectReq,
    responses(
        (status = 200, description = "Dashboard for the newly selected patient", body = DashboardRes),
        (status = 400, description = "Neither index nor id given"),
        (status = 404, description = "No patient at that index or with that id")
    )
)]
/// Select a patient by index (preferred) or id
#[axum::debug_handler]
async fn select_patient(
    State(state): State<AppState>,
    Json(req): Json<SelectReq>,
) -> Result<Json<DashboardRes>, ApiError> {
    let mut session = state.session()?;
    let selected = match (req.index, req.id) {
        (Some(index), _) => session.select(index).map(|_| ()),
        (None, Some(id)) => session.select_by_id(&id).map(|_| ()),
        (None, None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                "either index or id is required".to_string(),
            ))
        }
    };
    selected.map_err(error_response)?;

    dashboard_for(&session)
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard for the active patient", body = DashboardRes),
        (status = 404, description = "No patient selected")
    )
)]
/// Dashboard view of the active patient
#[axum::debug_handler]
async fn current_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardRes>, ApiError> {
    let session = state.session()?;
    dashboard_for(&session)
}

#[utoipa::path(
    post,
    path = "/score",
    request_body = ScoreReq,
    responses(
        (status = 200, description = "qSOFA score and tier", body = ScoreRes),
        (status = 422, description = "Vitals cannot be scored")
    )
)]
/// Score ad-hoc vitals without touching the session
#[axum::debug_handler]
async fn score_vitals(
    State(_state): State<AppState>,
    Json(req): Json<ScoreReq>,
) -> Result<Json<ScoreRes>, ApiError> {
    let vitals = Vitals {
        hr: req.hr,
        rr: req.rr,
        sbp: req.sbp,
        temp: req.temp,
        ams: req.ams,
    };
    let result = score(&vitals).map_err(error_response)?;
    let tier = classify(result.score).map_err(error_response)?;

    Ok(Json(ScoreRes {
        score: result.score,
        rr_high: result.rr_high,
        sbp_low: result.sbp_low,
        ams_positive: result.ams_positive,
        tier: format!("{tier:?}"),
        label: tier.label().to_string(),
        advisory: tier.advisory().to_string(),
    }))
}
