//! Password check handlers.
//!
//! These endpoints analyze candidate passwords without creating or touching
//! any account. The submitted password is used transiently and discarded;
//! only its digest prefix ever leaves the service.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::web::dto::{
    AnalyzeResponse, ApiResponse, BreachReport, PasswordCheckRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/password/analyze - Score a password against the policy.
#[utoipa::path(
    post,
    path = "/api/password/analyze",
    tag = "password",
    request_body = PasswordCheckRequest,
    responses(
        (status = 200, description = "Policy report", body = AnalyzeResponse)
    )
)]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<PasswordCheckRequest>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, ApiError> {
    let report = state.service.analyze_password(&req.password);
    Ok(Json(ApiResponse::new(AnalyzeResponse::from(report))))
}

/// POST /api/password/breach - Check a password against the breach corpus.
///
/// A 503 means the oracle could not be consulted; it is never reported as a
/// clean result.
#[utoipa::path(
    post,
    path = "/api/password/breach",
    tag = "password",
    request_body = PasswordCheckRequest,
    responses(
        (status = 200, description = "Breach lookup result", body = BreachReport),
        (status = 503, description = "Breach oracle unavailable")
    )
)]
pub async fn breach(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<PasswordCheckRequest>,
) -> Result<Json<ApiResponse<BreachReport>>, ApiError> {
    let result = state.service.check_breach(&req.password).await?;
    Ok(Json(ApiResponse::new(BreachReport::from(result))))
}
