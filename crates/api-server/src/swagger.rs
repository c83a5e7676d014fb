//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SEM Studio API",
        version = "0.1.0",
        description = "Search-engine-marketing plan generation.\n\nTurns a brand, target locations and a budget split into keyword research, search ad groups, Performance Max themes and Shopping bid suggestions.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Planning", description = "SEM plan generation"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Planning
        crate::rest::generate_sem_plan,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Wire types
        sem_core::wire::GenerateSemPlanRequest,
        sem_core::wire::BudgetAllocations,
        sem_core::wire::SemPlanResponse,
        sem_core::wire::KeywordRow,
        sem_core::wire::PmaxThemeEntry,
        sem_core::wire::ShoppingCpcRow,
        sem_core::types::Competition,
        sem_core::types::MatchType,
        // REST error/health types
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
