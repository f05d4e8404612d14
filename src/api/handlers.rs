//! HTTP request handlers for the settlement engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::lifecycle::TripFinancials;

use super::request::{AdvanceRequest, PayRequest, SettleRequest};
use super::response::{ApiError, ApiErrorResponse, SettlementResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/settlements", post(settle_handler))
        .route("/settlements/:id", get(get_handler))
        .route("/settlements/:id/recalculate", post(recalculate_handler))
        .route("/settlements/:id/advance", post(advance_handler))
        .route("/settlements/:id/pay", post(pay_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection to an API error body.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
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
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn bad_request(error: ApiError) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn engine_error(error: crate::error::EngineError) -> axum::response::Response {
    let api_error: ApiErrorResponse = error.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn ok_settlement(status: StatusCode, response: SettlementResponse) -> axum::response::Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for POST /settlements.
///
/// Closes a trip and creates its settlement at `pending`.
async fn settle_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettleRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settle request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    let owner_id = request.owner_id.clone();
    let snapshot: TripFinancials = request.into();

    match state.engine().close_and_settle(&owner_id, &snapshot) {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                settlement_id = %records.settlement.id,
                trip_id = %records.settlement.trip_id,
                "Settle request completed"
            );
            ok_settlement(StatusCode::CREATED, records.into())
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Settle request failed"
            );
            engine_error(err)
        }
    }
}

/// Handler for GET /settlements/:id.
async fn get_handler(
    State(state): State<AppState>,
    Path(settlement_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.engine().get(settlement_id) {
        Some(records) => ok_settlement(StatusCode::OK, records.into()),
        None => engine_error(crate::error::EngineError::NotFound {
            entity: "settlement".to_string(),
            id: settlement_id.to_string(),
        }),
    }
}

/// Handler for POST /settlements/:id/recalculate.
///
/// Re-runs the computation against a fresh trip snapshot.
async fn recalculate_handler(
    State(state): State<AppState>,
    Path(settlement_id): Path<Uuid>,
    payload: Result<Json<SettleRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        settlement_id = %settlement_id,
        "Processing recalculate request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    let owner_id = request.owner_id.clone();
    let snapshot: TripFinancials = request.into();

    match state
        .engine()
        .recalculate(&owner_id, settlement_id, &snapshot)
    {
        Ok(records) => ok_settlement(StatusCode::OK, records.into()),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Recalculate request failed"
            );
            engine_error(err)
        }
    }
}

/// Handler for POST /settlements/:id/advance.
async fn advance_handler(
    State(state): State<AppState>,
    Path(settlement_id): Path<Uuid>,
    payload: Result<Json<AdvanceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    match state.engine().advance_status(settlement_id, request.to) {
        Ok(records) => ok_settlement(StatusCode::OK, records.into()),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                settlement_id = %settlement_id,
                error = %err,
                "Advance request failed"
            );
            engine_error(err)
        }
    }
}

/// Handler for POST /settlements/:id/pay.
async fn pay_handler(
    State(state): State<AppState>,
    Path(settlement_id): Path<Uuid>,
    payload: Result<Json<PayRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    match state.engine().mark_paid(settlement_id, request.into()) {
        Ok(records) => ok_settlement(StatusCode::OK, records.into()),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                settlement_id = %settlement_id,
                error = %err,
                "Pay request failed"
            );
            engine_error(err)
        }
    }
}
