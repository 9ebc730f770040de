use actix_web::{http::StatusCode, web, HttpResponse};
use tf_shared::types::{ApiResponse, HealthStatus};

use crate::dto::error::{ErrorResponse, ErrorResponseExt};
use crate::routes::AppState;

/// Handler for GET /health
///
/// 200 with the dependency report when everything answers, 503 naming
/// the unreachable dependencies otherwise.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let report = state.auth_service.health().await;

    if report.is_healthy() {
        return HttpResponse::Ok().json(ApiResponse::success(report));
    }

    let mut failing: Vec<&str> = report
        .dependencies
        .iter()
        .filter(|(_, dependency)| dependency.status == HealthStatus::Unhealthy)
        .map(|(name, _)| name.as_str())
        .collect();
    failing.sort_unstable();

    ErrorResponse::for_status(
        format!("Unhealthy dependencies: {}", failing.join(", ")),
        StatusCode::SERVICE_UNAVAILABLE,
    )
    .to_response()
}
