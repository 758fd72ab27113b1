#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized valid transitions
// ============================================================================

#[test_case(BundleState::Installed, BundleState::Resolved)]
#[test_case(BundleState::Resolved, BundleState::Starting)]
#[test_case(BundleState::Starting, BundleState::Active)]
#[test_case(BundleState::Starting, BundleState::Resolved)]
#[test_case(BundleState::Active, BundleState::Stopping)]
#[test_case(BundleState::Stopping, BundleState::Resolved)]
#[test_case(BundleState::Installed, BundleState::Uninstalled)]
#[test_case(BundleState::Active, BundleState::Uninstalled)]
fn BundleState___valid_transitions___allowed(from: BundleState, to: BundleState) {
    assert!(
        from.can_transition_to(to),
        "{:?} should transition to {:?}",
        from,
        to
    );
}

// ============================================================================
// Parameterized invalid transitions
// ============================================================================

#[test_case(BundleState::Installed, BundleState::Active)]
#[test_case(BundleState::Installed, BundleState::Stopping)]
#[test_case(BundleState::Resolved, BundleState::Active)]
#[test_case(BundleState::Resolved, BundleState::Installed)]
#[test_case(BundleState::Active, BundleState::Resolved)]
#[test_case(BundleState::Active, BundleState::Starting)]
#[test_case(BundleState::Stopping, BundleState::Active)]
#[test_case(BundleState::Uninstalled, BundleState::Installed)]
#[test_case(BundleState::Uninstalled, BundleState::Resolved)]
fn BundleState___invalid_transitions___not_allowed(from: BundleState, to: BundleState) {
    assert!(
        !from.can_transition_to(to),
        "{:?} should not transition to {:?}",
        from,
        to
    );
}

// ============================================================================
// Parameterized is_resolved tests
// ============================================================================

#[test_case(BundleState::Installed, false)]
#[test_case(BundleState::Resolved, true)]
#[test_case(BundleState::Starting, true)]
#[test_case(BundleState::Active, true)]
#[test_case(BundleState::Stopping, true)]
#[test_case(BundleState::Uninstalled, false)]
fn BundleState___is_resolved___matches_expected(state: BundleState, expected: bool) {
    assert_eq!(state.is_resolved(), expected);
}
