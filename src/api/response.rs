//! Response types for the settlement engine API.
//!
//! This module defines the settlement response envelope, the error
//! response structures, and the mapping from engine errors to HTTP
//! status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::{NetSettlement, net_settlement};
use crate::error::EngineError;
use crate::models::{Payable, Receivable, Settlement};
use crate::store::SettlementRecordSet;

/// The full settlement envelope returned by every settlement endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResponse {
    /// The settlement record.
    pub settlement: Settlement,
    /// One receivable per company on the trip.
    pub receivables: Vec<Receivable>,
    /// The driver's payable.
    pub payable: Payable,
    /// The net figure folded from the payable.
    pub net: NetSettlement,
}

impl From<SettlementRecordSet> for SettlementResponse {
    fn from(records: SettlementRecordSet) -> Self {
        let net = net_settlement(records.payable.amount);
        SettlementResponse {
            settlement: records.settlement,
            receivables: records.receivables,
            payable: records.payable,
            net,
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
            EngineError::MissingRateParameter { pay_mode, field } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MISSING_RATE_PARAMETER",
                    format!("Pay mode '{}' requires parameter '{}'", pay_mode, field),
                    "The driver's pay configuration is missing a rate the active mode needs",
                ),
            },
            EngineError::InvalidPercent { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERCENT",
                    format!("Percent of revenue must be within [0, 100], got {}", value),
                    "Out-of-range percentages are rejected, never clamped",
                ),
            },
            EngineError::InvalidAmount {
                entity,
                id,
                field,
                message,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_AMOUNT",
                    format!("Invalid {} '{}' field '{}': {}", entity, id, field, message),
                    "The trip snapshot contains an invalid amount",
                ),
            },
            EngineError::SettlementAlreadyExists {
                trip_id,
                settlement_id,
            } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "SETTLEMENT_ALREADY_EXISTS",
                    format!("Trip '{}' already has a settlement", trip_id),
                    format!("Existing settlement: {}", settlement_id),
                ),
            },
            EngineError::SettlementLocked { settlement_id } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "SETTLEMENT_LOCKED",
                    format!("Settlement '{}' is paid and locked", settlement_id),
                    "Paid settlements are immutable",
                ),
            },
            EngineError::InvalidTransition {
                settlement_id,
                from,
                to,
            } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "INVALID_TRANSITION",
                    format!(
                        "Settlement '{}' cannot move from '{}' to '{}'",
                        settlement_id, from, to
                    ),
                    "The settlement lifecycle only moves forward",
                ),
            },
            EngineError::NotFound { entity, id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", format!("{} '{}' not found", entity, id)),
            },
        }
    }
}
