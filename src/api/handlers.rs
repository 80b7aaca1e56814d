//! HTTP request handlers for the Incentive Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_batch;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, ThresholdsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/thresholds", get(thresholds_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Runs the batch calculation over the submitted rows for one month.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
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
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let validated = match request.validate() {
        Ok(validated) => validated,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request validation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return json_response(api_error.status, api_error.error);
        }
    };

    let config = state.config();
    // Request-level thresholds replace the configured overrides; an empty
    // table means "defaults only".
    let overrides = match &validated.thresholds {
        Some(table) if table.is_empty() => None,
        Some(table) => Some(table),
        None => config.override_thresholds(),
    };

    let start_time = Instant::now();
    let row_count = validated.entries.len();
    let batch = calculate_batch(
        validated.period,
        validated.entries,
        config.config().roster(),
        overrides,
    );

    info!(
        correlation_id = %correlation_id,
        period = %batch.period,
        rows = row_count,
        total_incentive = %batch.totals.total_incentive,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Calculation completed successfully"
    );

    json_response(StatusCode::OK, CalculationResponse::new(batch))
}

/// Handler for GET /thresholds endpoint.
///
/// Returns the table a calculation without request-level thresholds would use.
async fn thresholds_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    let overridden_positions: Vec<String> = config
        .override_thresholds()
        .map(|table| table.iter().map(|(position, _)| position.clone()).collect())
        .unwrap_or_default();

    json_response(
        StatusCode::OK,
        ThresholdsResponse {
            thresholds: config.effective_thresholds(),
            overridden_positions,
        },
    )
}
