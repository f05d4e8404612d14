//! Engine configuration.
//!
//! Settlement behavior that is policy rather than arithmetic lives here:
//! whether the `pending -> paid` fast path is allowed and whether
//! overcollection is flagged. Loaded from YAML; defaults allow the fast
//! path and flag overcollection.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{LifecycleOptions, SettlementConfig, WarningOptions};
