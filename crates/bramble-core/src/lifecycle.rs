//! Bundle lifecycle state machine (OSGI-inspired)

use serde::{Deserialize, Serialize};

/// Bundle lifecycle states following the OSGI model
///
/// State transitions:
/// ```text
/// Installed → Resolved → Starting → Active → Stopping → Resolved
///                ↑          │
///                └──────────┘ (activation failed)
///            Any state → Uninstalled (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleState {
    /// Bundle manifest was parsed, dependencies not yet checked
    #[default]
    Installed,
    /// Every bundle in the dependency closure is present and resolvable
    Resolved,
    /// Activator start entry point is running
    Starting,
    /// Bundle is started and its services are available
    Active,
    /// Activator stop entry point is running
    Stopping,
    /// Bundle was removed from the platform
    Uninstalled,
}

impl BundleState {
    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: BundleState) -> bool {
        use BundleState::*;
        matches!(
            (self, target),
            // Normal lifecycle transitions
            (Installed, Resolved)
                | (Resolved, Starting)
                | (Starting, Active)
                | (Active, Stopping)
                | (Stopping, Resolved)
                // Activation failed
                | (Starting, Resolved)
                // Explicit removal
                | (Installed, Uninstalled)
                | (Resolved, Uninstalled)
                | (Starting, Uninstalled)
                | (Active, Uninstalled)
                | (Stopping, Uninstalled)
        )
    }

    /// Check if the bundle's dependency closure has been verified
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            BundleState::Resolved | BundleState::Starting | BundleState::Active | BundleState::Stopping
        )
    }

    /// Check if the bundle is started
    pub fn is_active(&self) -> bool {
        matches!(self, BundleState::Active)
    }

    /// Check if the bundle is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, BundleState::Uninstalled)
    }

    /// Get a human-readable description of this state
    pub fn description(&self) -> &'static str {
        match self {
            BundleState::Installed => "Bundle is installed but not resolved",
            BundleState::Resolved => "Bundle dependencies are resolved",
            BundleState::Starting => "Bundle is starting",
            BundleState::Active => "Bundle is active",
            BundleState::Stopping => "Bundle is stopping",
            BundleState::Uninstalled => "Bundle has been uninstalled",
        }
    }
}

impl std::fmt::Display for BundleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BundleState::Installed => write!(f, "INSTALLED"),
            BundleState::Resolved => write!(f, "RESOLVED"),
            BundleState::Starting => write!(f, "STARTING"),
            BundleState::Active => write!(f, "ACTIVE"),
            BundleState::Stopping => write!(f, "STOPPING"),
            BundleState::Uninstalled => write!(f, "UNINSTALLED"),
        }
    }
}


#[cfg(test)]
#[path = "lifecycle/lifecycle_parameterized_tests.rs"]
mod lifecycle_parameterized_tests;
