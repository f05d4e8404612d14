//! HTTP API module for the settlement engine.
//!
//! This module provides the REST endpoints for closing a trip into a
//! settlement, recalculating it, walking its status forward, and marking
//! it paid.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::SettleRequest;
pub use response::{ApiError, SettlementResponse};
pub use state::AppState;
