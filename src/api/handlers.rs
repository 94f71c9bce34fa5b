//! HTTP request handlers for the tip pool engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::allocation::{allocate, resolve_multiplier, weigh_records};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{AllocationInput, AllocationResult, DistributionRecord, SavedDistribution};

use super::request::CalculationRequest;
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, RoleWeightsResponse, SaveResponse,
    ServiceInfo,
};
use super::state::AppState;

/// Default number of records returned from the history listing.
const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Default number of rows returned from the employee listing.
const DEFAULT_EMPLOYEE_LIMIT: u32 = 50;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(info_handler))
        .route("/calculate", post(calculate_handler))
        .route(
            "/distributions",
            post(save_handler).get(history_handler),
        )
        .route("/distributions/:id", delete(delete_handler))
        .route("/employees", get(employees_handler))
        .route("/roles", get(roles_handler))
        .with_state(state)
}

/// Query parameters for the listing endpoints.
#[derive(Debug, Deserialize)]
struct ListQuery {
    limit: Option<u32>,
}

/// Handler for the GET / service banner.
async fn info_handler() -> impl IntoResponse {
    Json(ServiceInfo {
        service: "tip-engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for GET /roles.
///
/// Returns the active role-weight table.
async fn roles_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(RoleWeightsResponse::from(state.config().roles()))
}

/// Handler for POST /calculate.
///
/// Accepts a pool and the week's employee entries and returns the
/// computed distribution without persisting it.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_allocation(&request, state.config()) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                total_pool = %result.total_pool,
                payouts = result.payouts.len(),
                excluded = result.excluded.len(),
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(CalculationResponse::from_result(result)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for POST /distributions.
///
/// Recomputes the distribution from the submitted entries, then
/// persists the record and refreshes the employee profiles. The result
/// is always recomputed server-side; a client cannot save a tampered
/// allocation.
async fn save_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing save request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = match perform_allocation(&request, state.config()) {
        Ok(result) => result,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Save rejected: allocation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    let entries = request.to_records();
    let total_hours: Decimal = entries.iter().map(|r| r.total_hours).sum();
    let saved_at = Utc::now();

    let record = DistributionRecord {
        id: Uuid::new_v4(),
        saved_at,
        total_pool: result.total_pool,
        total_hours,
        payload: SavedDistribution {
            entries: entries.clone(),
            result,
        },
    };

    if let Err(err) = state.store().save_distribution(&record).await {
        warn!(correlation_id = %correlation_id, error = %err, "Save failed");
        let api_error: ApiErrorResponse = err.into();
        return api_error.into_response();
    }

    // Remember every named employee, eligible or not, so the roster
    // endpoint can prefill future weeks.
    let roles = state.config().roles();
    for entry in &entries {
        if entry.name.trim().is_empty() {
            continue;
        }
        let multiplier = resolve_multiplier(entry, roles);
        if let Err(err) = state
            .store()
            .upsert_employee(&entry.name, entry.role.as_deref(), multiplier, saved_at)
            .await
        {
            warn!(
                correlation_id = %correlation_id,
                employee = %entry.name,
                error = %err,
                "Employee upsert failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    }

    info!(
        correlation_id = %correlation_id,
        record_id = %record.id,
        total_pool = %record.total_pool,
        "Distribution saved"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(SaveResponse {
            id: record.id,
            message: "Distribution saved".to_string(),
        }),
    )
        .into_response()
}

/// Handler for GET /distributions.
///
/// Lists saved distributions, newest first.
async fn history_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match state.store().list_distributions(limit).await {
        Ok(records) => Json(records).into_response(),
        Err(err) => {
            warn!(error = %err, "History listing failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for DELETE /distributions/:id.
async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store().delete_distribution(id).await {
        Ok(true) => {
            info!(record_id = %id, "Distribution deleted");
            (
                StatusCode::OK,
                Json(SaveResponse {
                    id,
                    message: "Distribution deleted".to_string(),
                }),
            )
                .into_response()
        }
        Ok(false) => {
            let api_error: ApiErrorResponse = EngineError::RecordNotFound { id }.into();
            api_error.into_response()
        }
        Err(err) => {
            warn!(record_id = %id, error = %err, "Delete failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for GET /employees.
///
/// Lists known employees, most recently seen first.
async fn employees_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(DEFAULT_EMPLOYEE_LIMIT);
    match state.store().list_employees(limit).await {
        Ok(profiles) => Json(profiles).into_response(),
        Err(err) => {
            warn!(error = %err, "Employee listing failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Runs the full allocation pipeline for a request: weigh the entries
/// against the role table, apply policy defaults for any omitted
/// overrides, and allocate.
fn perform_allocation(
    request: &CalculationRequest,
    config: &ConfigLoader,
) -> EngineResult<AllocationResult> {
    let records = request.to_records();
    let contributions = weigh_records(&records, config.roles());

    let policy = config.policy();
    let house_share = request.house_share.unwrap_or(policy.house_share);
    let denomination = request.denomination.unwrap_or(policy.denomination);

    let input = AllocationInput {
        total_pool: request.total_pool,
        house_share,
        contributions,
    };

    allocate(&input, denomination)
}

/// Turns a JSON extraction rejection into a 400 response.
fn rejection_response(
    correlation_id: Uuid,
    rejection: JsonRejection,
) -> axum::response::Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Check if it's a missing field error
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
