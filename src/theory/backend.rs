/*!
The contract between the search and a theory backend.

A backend decides the consistency of a conjunction of constraints.
The search passes constraints to a backend as the literals standing for them become true, and takes them back on backjump.

# Stack discipline

Constraints are [asserted](Backend::assert) and [retracted](Backend::retract) in stack order.
A retraction is always of the most recently asserted constraint which remains, and a backend returns [RetractMismatch](err::TheoryError::RetractMismatch) otherwise.
An [AssertionStack] is provided to help a backend keep to this discipline.

# Answers

- After [check](Backend::check) returns [Unsat](TheoryAnswer::Unsat), [explain](Backend::explain) returns a subset of the asserted constraints which is inconsistent.
  The same holds after [assert](Backend::assert) returns false.
- After [check](Backend::check) returns [Sat](TheoryAnswer::Sat), and until the next assertion or retraction, [model](Backend::model) returns an assignment to the variables of the asserted constraints on which each constraint holds.
- [Unknown](TheoryAnswer::Unknown) is never a claim of consistency or of inconsistency.
*/

use std::collections::BTreeMap;

use num_rational::BigRational;

use crate::{
    theory::{ConstraintKey, ConstraintPool, Variable},
    types::err,
};

/// An assignment of values to theory variables.
pub type TheoryModel = BTreeMap<Variable, BigRational>;

/// The answer of a backend to a check of the asserted constraints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TheoryAnswer {
    Sat,
    Unsat,
    Unknown,
}

impl std::fmt::Display for TheoryAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sat => write!(f, "Sat"),
            Self::Unsat => write!(f, "Unsat"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A decision procedure for conjunctions of constraints.
///
/// Constraints are given by key, with the contents of each constraint available from the pool.
pub trait Backend {
    /// A name for the backend, used in logs.
    fn name(&self) -> &str;

    /// Notes a constraint which may later be asserted.
    ///
    /// Returns false if the constraint can never hold, in which case the literal of the constraint is fixed false.
    fn inform(&mut self, key: ConstraintKey, pool: &ConstraintPool) -> bool {
        let _ = (key, pool);
        true
    }

    /// Adds a constraint to the asserted constraints.
    ///
    /// Returns false if the asserted constraints are immediately seen to be inconsistent, and true otherwise.
    fn assert(&mut self, key: ConstraintKey, pool: &ConstraintPool) -> bool;

    /// A full check of the consistency of the asserted constraints.
    fn check(&mut self, pool: &ConstraintPool) -> TheoryAnswer;

    /// An inconsistent subset of the asserted constraints, following an inconsistency.
    fn explain(&self) -> Vec<ConstraintKey>;

    /// Removes the most recently asserted constraint, which must be `key`.
    fn retract(&mut self, key: ConstraintKey, pool: &ConstraintPool) -> Result<(), err::TheoryError>;

    /// An assignment on which every asserted constraint holds, following a consistent check.
    fn model(&self, pool: &ConstraintPool) -> Option<TheoryModel>;

    /// The asserted constraints, in order of assertion.
    fn asserted(&self) -> &[ConstraintKey];
}

/// A stack of asserted constraints.
#[derive(Clone, Debug, Default)]
pub struct AssertionStack {
    keys: Vec<ConstraintKey>,
}

impl AssertionStack {
    pub fn push(&mut self, key: ConstraintKey) {
        self.keys.push(key);
    }

    /// Pops `key`, if `key` is at the top of the stack.
    pub fn pop(&mut self, key: ConstraintKey) -> Result<(), err::TheoryError> {
        match self.keys.last() {
            Some(top) if *top == key => {
                self.keys.pop();
                Ok(())
            }
            top => Err(err::TheoryError::RetractMismatch {
                expected: top.copied(),
                found: key,
            }),
        }
    }

    pub fn as_slice(&self) -> &[ConstraintKey] {
        &self.keys
    }

    pub fn contains(&self, key: ConstraintKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
