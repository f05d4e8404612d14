//! Application state for the settlement engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use crate::lifecycle::SettlementEngine;

/// Shared application state.
///
/// Wraps the lifecycle engine; the engine itself holds the store and the
/// policy configuration, so cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    engine: SettlementEngine,
}

impl AppState {
    /// Creates a new application state around the given engine.
    pub fn new(engine: SettlementEngine) -> Self {
        Self { engine }
    }

    /// Returns a reference to the lifecycle engine.
    pub fn engine(&self) -> &SettlementEngine {
        &self.engine
    }
}
