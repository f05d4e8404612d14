//! Configuration types for the settlement engine.

use serde::{Deserialize, Serialize};

/// Lifecycle policy options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleOptions {
    /// Whether `mark_paid` may be called on a settlement that has not been
    /// approved. When false, only `approved -> paid` is accepted.
    #[serde(default = "default_true")]
    pub allow_direct_mark_paid: bool,
}

/// Warning policy options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningOptions {
    /// Whether a negative receivable attaches an `overcollected` warning
    /// to the settlement.
    #[serde(default = "default_true")]
    pub flag_overcollection: bool,
}

/// The full engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// Lifecycle policy.
    #[serde(default)]
    pub lifecycle: LifecycleOptions,
    /// Warning policy.
    #[serde(default)]
    pub warnings: WarningOptions,
}

fn default_true() -> bool {
    true
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            allow_direct_mark_paid: true,
        }
    }
}

impl Default for WarningOptions {
    fn default() -> Self {
        Self {
            flag_overcollection: true,
        }
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleOptions::default(),
            warnings: WarningOptions::default(),
        }
    }
}
