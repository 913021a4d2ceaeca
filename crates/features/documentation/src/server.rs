//! HTTP surface of the documentation slice.

use crate::Documentation;
use crate::error::DocumentationError;
use crate::model::{
    CachedReport, CoverageReport, FeatureCode, HealthAssessment, RemediationOutcome,
    ValidationReport,
};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hrhub_derive::{api_handler, api_model};
use hrhub_domain::constants::{DOCUMENTATION_TAG, SECTION_TABLE};
use hrhub_kernel::security::resource::ResourceGuard;
use hrhub_kernel::server::ApiState;
use tracing::error;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Error body of every failed documentation request.
#[api_model]
pub struct ErrorResponse {
    /// Machine-readable kind, e.g. `persistence_error`.
    pub error: String,
    pub message: String,
}

/// Feature codes to remove from or add to a section.
#[api_model(deny_unknown_fields = true)]
pub struct SectionCodesRequest {
    pub codes: Vec<FeatureCode>,
}

impl IntoResponse for DocumentationError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Fetch { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Persistence { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SectionNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            error!(error = %self, "Documentation request failed");
        }

        let body = ErrorResponse { error: self.kind().to_owned(), message: self.to_string() };
        (status, Json(body)).into_response()
    }
}

fn slice(state: &ApiState) -> Result<&Documentation, DocumentationError> {
    state.try_get_slice::<Documentation>().map_err(|err| DocumentationError::Internal {
        message: err.to_string().into(),
        context: Some("Documentation slice is not registered".into()),
    })
}

fn section_key(id: &str) -> Result<String, DocumentationError> {
    ResourceGuard::record_key(id, SECTION_TABLE).map_err(|err| DocumentationError::Validation {
        message: err.to_string().into(),
        context: Some("section id".into()),
    })
}

#[api_handler(
    get,
    path = "/api/documentation/validation",
    responses(
        (status = OK, description = "Fresh validation report", body = ValidationReport),
        (status = SERVICE_UNAVAILABLE, description = "Registry or corpus unavailable", body = ErrorResponse),
    ),
    tag = DOCUMENTATION_TAG,
)]
pub(crate) async fn validation_handler(
    State(state): State<ApiState>,
) -> Result<Json<ValidationReport>, DocumentationError> {
    Ok(Json(slice(&state)?.service.validate_documentation().await?))
}

#[api_handler(
    get,
    path = "/api/documentation/coverage",
    responses(
        (status = OK, description = "Manual coverage of active features", body = CoverageReport),
        (status = SERVICE_UNAVAILABLE, description = "Registry or corpus unavailable", body = ErrorResponse),
    ),
    tag = DOCUMENTATION_TAG,
)]
pub(crate) async fn coverage_handler(
    State(state): State<ApiState>,
) -> Result<Json<CoverageReport>, DocumentationError> {
    Ok(Json(slice(&state)?.service.calculate_manual_coverage().await?))
}

#[api_handler(
    get,
    path = "/api/documentation/health",
    responses(
        (status = OK, description = "Health score and status", body = HealthAssessment),
        (status = SERVICE_UNAVAILABLE, description = "Registry or corpus unavailable", body = ErrorResponse),
    ),
    tag = DOCUMENTATION_TAG,
)]
pub(crate) async fn health_handler(
    State(state): State<ApiState>,
) -> Result<Json<HealthAssessment>, DocumentationError> {
    Ok(Json(slice(&state)?.service.get_documentation_health().await?))
}

#[api_handler(
    get,
    path = "/api/documentation/report",
    responses(
        (status = OK, description = "Last validation report", body = CachedReport),
        (status = NOT_FOUND, description = "No validation has run yet", body = ErrorResponse),
    ),
    tag = DOCUMENTATION_TAG,
)]
pub(crate) async fn report_handler(
    State(state): State<ApiState>,
) -> Result<Response, DocumentationError> {
    let response = match slice(&state)?.service.last_report() {
        Some(cached) => Json(cached).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "report_not_found".to_owned(),
                message: "No validation has run yet".to_owned(),
            }),
        )
            .into_response(),
    };
    Ok(response)
}

#[api_handler(
    post,
    path = "/api/documentation/sections/{id}/unlink",
    params(("id" = String, Path, description = "Section id, `doc_section:<key>` or a `<key>` without `:`")),
    request_body = SectionCodesRequest,
    responses(
        (status = OK, description = "References after removal", body = RemediationOutcome),
        (status = BAD_REQUEST, description = "Invalid section id or code", body = ErrorResponse),
        (status = NOT_FOUND, description = "Unknown section", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Section could not be read or written", body = ErrorResponse),
    ),
    tag = DOCUMENTATION_TAG,
)]
pub(crate) async fn unlink_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<SectionCodesRequest>,
) -> Result<Json<RemediationOutcome>, DocumentationError> {
    let key = section_key(&id)?;
    Ok(Json(slice(&state)?.service.remove_orphaned_codes(&key, request.codes).await?))
}

#[api_handler(
    post,
    path = "/api/documentation/sections/{id}/link",
    params(("id" = String, Path, description = "Section id, `doc_section:<key>` or a `<key>` without `:`")),
    request_body = SectionCodesRequest,
    responses(
        (status = OK, description = "References after linking", body = RemediationOutcome),
        (status = BAD_REQUEST, description = "Invalid section id or code", body = ErrorResponse),
        (status = NOT_FOUND, description = "Unknown section", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Section could not be read or written", body = ErrorResponse),
    ),
    tag = DOCUMENTATION_TAG,
)]
pub(crate) async fn link_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<SectionCodesRequest>,
) -> Result<Json<RemediationOutcome>, DocumentationError> {
    let key = section_key(&id)?;
    Ok(Json(slice(&state)?.service.link_features_to_section(&key, request.codes).await?))
}

/// Routes of the documentation slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(validation_handler))
        .routes(routes!(coverage_handler))
        .routes(routes!(health_handler))
        .routes(routes!(report_handler))
        .routes(routes!(unlink_handler))
        .routes(routes!(link_handler))
}
