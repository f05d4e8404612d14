//! Error types for the settlement engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during trip settlement.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the settlement engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use settlement_engine::error::EngineError;
///
/// let error = EngineError::MissingRateParameter {
///     pay_mode: "per_mile".to_string(),
///     field: "rate_per_mile".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Pay mode 'per_mile' requires parameter 'rate_per_mile'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The active pay mode requires a rate parameter that is absent.
    ///
    /// A missing rate is never substituted with a default.
    #[error("Pay mode '{pay_mode}' requires parameter '{field}'")]
    MissingRateParameter {
        /// The active pay mode.
        pay_mode: String,
        /// The rate field that was absent or non-numeric.
        field: String,
    },

    /// A percent-of-revenue value fell outside the [0, 100] range.
    #[error("Percent of revenue must be between 0 and 100, got {value}")]
    InvalidPercent {
        /// The rejected value.
        value: String,
    },

    /// A monetary or quantity field was invalid (e.g. negative).
    #[error("Invalid amount in {entity} '{id}' field '{field}': {message}")]
    InvalidAmount {
        /// The kind of record ("trip", "load", "expense").
        entity: String,
        /// The ID of the offending record.
        id: String,
        /// The field that failed validation.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A second close-and-settle attempt on an already-settled trip.
    #[error("Trip '{trip_id}' already has settlement {settlement_id}; use recalculate instead")]
    SettlementAlreadyExists {
        /// The trip that is already settled.
        trip_id: String,
        /// The existing settlement.
        settlement_id: Uuid,
    },

    /// A mutation was attempted on a settlement that has been paid.
    #[error("Settlement {settlement_id} is paid and can no longer be modified")]
    SettlementLocked {
        /// The locked settlement.
        settlement_id: Uuid,
    },

    /// A status change that the lifecycle does not permit.
    #[error("Settlement {settlement_id} cannot move from '{from}' to '{to}'")]
    InvalidTransition {
        /// The settlement being transitioned.
        settlement_id: Uuid,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// A referenced record does not exist or is not owned by the caller.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record ("trip", "settlement", "driver").
        entity: String,
        /// The ID that was looked up.
        id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
