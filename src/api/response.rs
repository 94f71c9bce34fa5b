//! Response types for the tip pool engine API.
//!
//! This module defines the calculation response with display fractions,
//! the error response structures, and the mapping from engine errors to
//! HTTP statuses.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::allocation::{DEFAULT_MAX_DENOMINATOR, best_fraction};
use crate::config::RoleWeightTable;
use crate::error::EngineError;
use crate::models::{AllocationResult, ExcludedContribution, HousePayout, PayoutLine};

/// A payout line decorated with its display fraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutView {
    /// The underlying payout line.
    #[serde(flatten)]
    pub line: PayoutLine,
    /// The final proportion as a small display fraction, e.g. "4/7".
    pub share_fraction: String,
}

/// Response body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// The pool that was distributed.
    pub total_pool: Decimal,
    /// Sum of points over eligible contributions.
    pub total_points: Decimal,
    /// The house-share fraction actually applied.
    pub house_share: Decimal,
    /// Employee payouts with display fractions, in deterministic order.
    pub payouts: Vec<PayoutView>,
    /// The synthetic house entry.
    pub house: HousePayout,
    /// Entries filtered out before allocation.
    pub excluded: Vec<ExcludedContribution>,
}

impl CalculationResponse {
    /// Builds a response from an allocation result, attaching a display
    /// fraction to each payout.
    pub fn from_result(result: AllocationResult) -> Self {
        let payouts = result
            .payouts
            .into_iter()
            .map(|line| {
                let fraction = best_fraction(line.final_proportion, DEFAULT_MAX_DENOMINATOR);
                PayoutView {
                    line,
                    share_fraction: fraction.to_string(),
                }
            })
            .collect();

        Self {
            total_pool: result.total_pool,
            total_points: result.total_points,
            house_share: result.house_share,
            payouts,
            house: result.house,
            excluded: result.excluded,
        }
    }
}

/// Response body for a successful save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    /// The generated record id.
    pub id: Uuid,
    /// Confirmation message.
    pub message: String,
}

/// Service banner returned from the root endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// The service name.
    pub service: String,
    /// The crate version.
    pub version: String,
}

/// The active role-weight table, as returned from `/roles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleWeightsResponse {
    /// The default role.
    pub default_role: String,
    /// Weights by role label, in sorted order.
    pub weights: BTreeMap<String, Decimal>,
}

impl From<&RoleWeightTable> for RoleWeightsResponse {
    fn from(table: &RoleWeightTable) -> Self {
        Self {
            default_role: table.default_role().to_string(),
            weights: table
                .weights()
                .iter()
                .map(|(role, weight)| (role.clone(), *weight))
                .collect(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidRoleWeight { role, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    format!("Invalid role weight for '{}'", role),
                    message,
                ),
            },
            EngineError::InvalidInput { reason } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_INPUT", reason),
            },
            EngineError::RecordNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "RECORD_NOT_FOUND",
                    format!("Distribution record not found: {}", id),
                    "The record may have been deleted",
                ),
            },
            EngineError::Storage { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            },
        }
    }
}
