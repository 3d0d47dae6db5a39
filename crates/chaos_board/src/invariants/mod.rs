//! First-class invariants for game sessions.
//!
//! Invariants are logical properties that must hold after every command.
//! They are checked in debug builds and can be tested independently.

use crate::Session;
use tracing::{error, instrument};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns every violated invariant, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod figure_conservation;
pub mod figure_placement;
pub mod forest_consistent;

pub use figure_conservation::FigureConservationInvariant;
pub use figure_placement::FigurePlacementInvariant;
pub use forest_consistent::ForestConsistentInvariant;

/// All session invariants as a composable set.
pub type SessionInvariants = (
    FigurePlacementInvariant,
    ForestConsistentInvariant,
    FigureConservationInvariant,
);

/// Asserts that all session invariants hold (panic on violation in debug builds).
#[instrument(skip(session), fields(session_id = %session.id()))]
pub fn assert_invariants(session: &Session) {
    if cfg!(debug_assertions) {
        if let Err(violations) = SessionInvariants::check_all(session) {
            for violation in &violations {
                error!(description = %violation.description, "Invariant violated");
            }
            debug_assert!(violations.is_empty(), "Session invariants violated: {violations:?}");
        }
    }
}
