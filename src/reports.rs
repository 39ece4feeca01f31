/*!
Reports for the context.

A [Report] is the high-level answer of a solve, and is always available from a context.
An [Outcome] bundles the answer together with its evidence: a [Model] if satisfiable, or an infeasible subset of original clauses if unsatisfiable.
*/

use crate::{
    context::{ContextState, UnknownReason},
    db::ClauseKey,
    structures::{atom::Atom, literal::CLiteral, valuation::CValuation, valuation::Valuation},
    theory::{TheoryModel, Variable},
};

use num_rational::BigRational;

/// High-level reports regarding a solve.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Report {
    /// The formula of the context is satisfiable.
    Satisfiable,

    /// The formula of the context is unsatisfiable.
    Unsatisfiable,

    /// Satisfiability of the formula of the context is unknown, for some reason.
    Unknown,
}

impl From<ContextState> for Report {
    fn from(value: ContextState) -> Self {
        match value {
            ContextState::Configuration
            | ContextState::Input
            | ContextState::Solving
            | ContextState::Unknown(_) => Self::Unknown,
            ContextState::Satisfiable => Self::Satisfiable,
            ContextState::Unsatisfiable(_) | ContextState::AssumptionsFailed => Self::Unsatisfiable,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A satisfying assignment, of atoms and of theory variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    /// The value of each atom, indexed by atom.
    pub boolean: CValuation,

    /// The value of each theory variable given by the backend.
    pub theory: TheoryModel,
}

impl Model {
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.boolean.value_of(atom)
    }

    pub fn theory_value(&self, variable: Variable) -> Option<&BigRational> {
        self.theory.get(&variable)
    }
}

/// The answer of a solve, with evidence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Satisfiable(Model),

    /// The keys of an infeasible subset of the original clauses.
    Unsatisfiable(Vec<ClauseKey>),

    /// The assumptions which failed, of those given to the solve.
    FailedAssumptions(Vec<CLiteral>),

    Unknown(Option<UnknownReason>),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable(_) => write!(f, "Satisfiable"),
            Self::Unsatisfiable(core) => write!(f, "Unsatisfiable ({} clauses)", core.len()),
            Self::FailedAssumptions(failed) => {
                write!(f, "Unsatisfiable ({} failed assumptions)", failed.len())
            }
            Self::Unknown(Some(reason)) => write!(f, "Unknown ({reason})"),
            Self::Unknown(None) => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_states_report_unknown() {
        assert_eq!(Report::from(ContextState::Input), Report::Unknown);
        assert_eq!(
            Report::from(ContextState::Unknown(UnknownReason::Theory)),
            Report::Unknown
        );
        assert_eq!(Report::from(ContextState::Satisfiable), Report::Satisfiable);
        assert_eq!(Report::from(ContextState::AssumptionsFailed), Report::Unsatisfiable);
    }
}
