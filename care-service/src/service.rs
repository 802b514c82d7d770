use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
};
use care_flow::{AnalyzeRequest, AnalyzeResponse, HospitalsResponse};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    catalog::{CatalogSearch, HospitalCatalog},
    config::ServiceConfig,
    fragment::render_detail_page,
    models::HospitalSearchParams,
    triage::triage,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn not_found_error(message: &str, id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": message,
            "hospital_id": id
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<HospitalCatalog>,
}

impl AppState {
    pub fn new(catalog: HospitalCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

pub fn create_app(config: &ServiceConfig) -> anyhow::Result<Router> {
    let catalog = match config.catalog_path() {
        Some(path) => HospitalCatalog::from_path(path)?,
        None => HospitalCatalog::builtin()?,
    };
    info!(hospitals = catalog.len(), "hospital catalog ready");
    Ok(build_router(AppState::new(catalog)))
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/analyze", post(analyze_symptoms))
        .route("/api/hospitals", get(search_hospitals))
        .route("/hospitals/{id}/", get(hospital_detail))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Care Navigator Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Symptom triage and hospital search with treatment cost estimates",
        "endpoints": {
            "POST /api/analyze": "Analyze free-text symptoms",
            "GET /api/hospitals": "Search hospitals by speciality and city (disease, budget optional)",
            "GET /hospitals/{id}/": "Hospital detail page (HTML)",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn analyze_symptoms(Json(request): Json<AnalyzeRequest>) -> ApiResult<AnalyzeResponse> {
    validate_symptoms(&request.symptoms_text)?;
    info!(location = %request.location, "analyzing symptoms");

    Ok(Json(AnalyzeResponse {
        analysis: triage(&request.symptoms_text),
    }))
}

fn validate_symptoms(symptoms_text: &str) -> Result<(), ApiError> {
    if symptoms_text.trim().is_empty() {
        return Err(bad_request_error("symptoms_text is required"));
    }
    Ok(())
}

async fn search_hospitals(
    State(state): State<AppState>,
    Query(params): Query<HospitalSearchParams>,
) -> ApiResult<HospitalsResponse> {
    let (speciality, city) = match (non_empty(&params.speciality), non_empty(&params.city)) {
        (Some(speciality), Some(city)) => (speciality, city),
        _ => return Err(bad_request_error("speciality and city are required")),
    };
    let budget = parse_budget(non_empty(&params.budget))?;

    let hospitals = state.catalog.search(&CatalogSearch {
        speciality,
        city,
        disease: non_empty(&params.disease),
        budget,
    });
    info!(speciality, city, found = hospitals.len(), "hospital search");

    Ok(Json(HospitalsResponse { hospitals }))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_budget(budget: Option<&str>) -> Result<Option<f64>, ApiError> {
    budget
        .map(|raw| {
            raw.parse::<f64>()
                .ok()
                .filter(|budget| budget.is_finite())
                .ok_or_else(|| bad_request_error("budget must be a number"))
        })
        .transpose()
}

async fn hospital_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    match state.catalog.find(&id) {
        Some(hospital) => Ok(Html(render_detail_page(hospital))),
        None => {
            warn!(hospital_id = %id, "detail requested for unknown hospital");
            Err(not_found_error("Hospital not found", &id))
        }
    }
}
