//! HTTP request handlers for the Labor Cost Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_accrual_period, compute_cost_report, compute_severance};
use crate::error::EngineResult;
use crate::models::EmploymentPeriod;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/accrual", post(accrual_handler))
        .route("/severance", post(severance_handler))
        .route("/report", post(report_handler))
        .with_state(state)
}

/// Handler for POST /accrual.
///
/// Returns the month-by-month charges and provisions of the period.
async fn accrual_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing accrual request");

    let request = match parse_request(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let loader = state.config();
    let config = request.resolve_config(loader.defaults(), loader.sectors());
    let period: EmploymentPeriod = request.employment.into();

    let start_time = Instant::now();
    let result = compute_accrual_period(&period, &config);
    if let Ok(report) = &result {
        info!(
            correlation_id = %correlation_id,
            competencies = report.months.len(),
            grand_total = %report.totals.grand_total,
            duration_us = start_time.elapsed().as_micros(),
            "Accrual completed successfully"
        );
    }
    respond(result, correlation_id)
}

/// Handler for POST /severance.
///
/// Returns the termination settlement of the period.
async fn severance_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing severance request");

    let request = match parse_request(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let loader = state.config();
    let config = request.resolve_config(loader.defaults(), loader.sectors());
    let period: EmploymentPeriod = request.employment.into();

    let start_time = Instant::now();
    let result = compute_severance(&period, &config);
    if let Ok(severance) = &result {
        info!(
            correlation_id = %correlation_id,
            qualifying_months = severance.qualifying_months_for_thirteenth,
            settlement_total = %severance.settlement_total,
            duration_us = start_time.elapsed().as_micros(),
            "Severance completed successfully"
        );
    }
    respond(result, correlation_id)
}

/// Handler for POST /report.
///
/// Returns the combined cost report, with charge rates taken from the
/// employee's sector.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing cost report request");

    let request = match parse_request(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let loader = state.config();
    let config = request
        .config
        .clone()
        .unwrap_or_else(|| loader.defaults().clone());
    let period: EmploymentPeriod = request.employment.into();

    let start_time = Instant::now();
    let result = compute_cost_report(&period, &config, loader.sectors());
    if let Ok(report) = &result {
        info!(
            correlation_id = %correlation_id,
            calculation_id = %report.calculation_id,
            advisories = report.advisories.len(),
            estimated_total_cost = %report.totals.estimated_total_cost,
            duration_us = start_time.elapsed().as_micros(),
            "Cost report completed successfully"
        );
    }
    respond(result, correlation_id)
}

/// Unwraps the JSON body, mapping extractor rejections to API errors.
fn parse_request(
    payload: Result<Json<CalculationRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<CalculationRequest, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Serializes a calculation outcome.
fn respond<T: Serialize>(result: EngineResult<T>, correlation_id: Uuid) -> Response {
    match result {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}
