//! REST handlers for plan generation and operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use sem_core::types::{BudgetAllocation, PlanRequest, ThemeCategory};
use sem_core::wire::{GenerateSemPlanRequest, SemPlanResponse};
use sem_planner::PlanGenerator;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use utoipa::ToSchema;

/// Maximum accepted length of a URL field.
const MAX_URL_LEN: usize = 2048;

/// Maximum number of target locations per request.
const MAX_LOCATIONS: usize = 50;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<PlanGenerator>,
    pub node_id: String,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(generator: PlanGenerator, node_id: impl Into<String>) -> Self {
        Self {
            generator: Arc::new(generator),
            node_id: node_id.into(),
            start_time: Instant::now(),
        }
    }
}

/// Validate a plan request at the API boundary.
fn validate_plan_request(request: &GenerateSemPlanRequest) -> Result<(), &'static str> {
    if request.brand_website.trim().is_empty() {
        return Err("'brand_website' must not be empty");
    }
    if request.brand_website.len() > MAX_URL_LEN || request.competitor_website.len() > MAX_URL_LEN
    {
        return Err("website URL exceeds maximum length");
    }
    let locations = request.locations();
    if locations.is_empty() {
        return Err("'target_locations' must contain at least one location");
    }
    if locations.len() > MAX_LOCATIONS {
        return Err("'target_locations' exceeds maximum number of locations");
    }
    Ok(())
}

/// Map the wire body onto a plan request. Themes that name a category
/// select it; anything else is kept as a seed theme.
pub fn plan_request(request: &GenerateSemPlanRequest) -> PlanRequest {
    let mut theme_categories = Vec::new();
    let mut seed_themes = Vec::new();
    for theme in &request.themes {
        match ThemeCategory::from_label(theme) {
            Some(category) if !theme_categories.contains(&category) => {
                theme_categories.push(category)
            }
            Some(_) => {}
            None => seed_themes.push(theme.clone()),
        }
    }

    let competitor = request.competitor_website.trim();
    let budgets = request.budget_allocations;
    PlanRequest {
        brand_url: request.brand_website.trim().to_string(),
        competitor_url: (!competitor.is_empty()).then(|| competitor.to_string()),
        locations: request.locations(),
        budgets: BudgetAllocation::new(budgets.cap, budgets.bud, budgets.pmax),
        theme_categories,
        seed_themes,
    }
}

/// POST /generate_sem_plan/: Generate a complete SEM plan.
#[utoipa::path(
    post,
    path = "/generate_sem_plan/",
    tag = "Planning",
    request_body = GenerateSemPlanRequest,
    responses(
        (status = 200, description = "Plan generated", body = SemPlanResponse),
        (status = 400, description = "Invalid plan request", body = ErrorResponse),
    )
)]
pub async fn generate_sem_plan(
    State(state): State<AppState>,
    Json(request): Json<GenerateSemPlanRequest>,
) -> Result<Json<SemPlanResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(msg) = validate_plan_request(&request) {
        warn!(brand = %request.brand_website, error = msg, "Plan request validation failed");
        metrics::counter!("api.validation_errors").increment(1);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "invalid_plan_request".to_string(),
                message: msg.to_string(),
            }),
        ));
    }

    let plan = state.generator.generate(&plan_request(&request));

    metrics::counter!("api.plans_generated").increment(1);
    metrics::histogram!("api.plan_keywords").record(plan.keyword_ideas.len() as f64);
    info!(
        node_id = %state.node_id,
        keywords = plan.keyword_ideas.len(),
        themes = plan.pmax_themes.len(),
        "Served SEM plan"
    );

    Ok(Json(SemPlanResponse::from(&plan)))
}

/// GET /health: Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready: Readiness probe. Generation is in-process, so the service
/// is ready as soon as it serves.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses((status = 200, description = "Ready to accept traffic"))
)]
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /live: Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sem_core::wire::BudgetAllocations;

    fn body(themes: &[&str]) -> GenerateSemPlanRequest {
        GenerateSemPlanRequest {
            brand_website: " https://brand.example ".to_string(),
            competitor_website: String::new(),
            target_locations: "Mumbai, Delhi".to_string(),
            themes: themes.iter().map(|s| s.to_string()).collect(),
            budget_allocations: BudgetAllocations {
                cap: 1000.0,
                bud: 2000.0,
                pmax: 1500.0,
            },
        }
    }

    #[test]
    fn test_plan_request_mapping() {
        let request = plan_request(&body(&["protein powder", "demographic", "Demographic"]));
        assert_eq!(request.brand_url, "https://brand.example");
        assert_eq!(request.competitor_url, None);
        assert_eq!(request.locations, vec!["Mumbai", "Delhi"]);
        assert_eq!(request.theme_categories, vec![ThemeCategory::Demographic]);
        assert_eq!(request.seed_themes, vec!["protein powder"]);
        assert_eq!(request.budgets, BudgetAllocation::new(1000.0, 2000.0, 1500.0));
    }

    #[test]
    fn test_validation() {
        assert!(validate_plan_request(&body(&[])).is_ok());

        let mut no_brand = body(&[]);
        no_brand.brand_website = "  ".to_string();
        assert!(validate_plan_request(&no_brand).is_err());

        let mut no_locations = body(&[]);
        no_locations.target_locations = ",".to_string();
        assert!(validate_plan_request(&no_locations).is_err());

        let mut too_many = body(&[]);
        too_many.target_locations = vec!["x"; MAX_LOCATIONS + 1].join(",");
        assert!(validate_plan_request(&too_many).is_err());
    }
}
