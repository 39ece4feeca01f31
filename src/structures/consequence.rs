//! Why an atom has the value it has.

use crate::db::ClauseKey;

/// The source of the assignment of a value to an atom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignmentSource {
    /// The atom has no value.
    None,

    /// A free decision, opening a new level.
    Decision,

    /// The value was forced by the clause, which was unit on the valuation at the time of assignment.
    ///
    /// This includes unit clauses, which force their literal at level zero.
    Clause(ClauseKey),

    /// The value is fixed from the creation of the context (only the top atom).
    Fundamental,
}

impl AssignmentSource {
    /// The key of the reason clause, if any.
    pub fn clause_key(&self) -> Option<ClauseKey> {
        match self {
            Self::Clause(key) => Some(*key),
            _ => None,
        }
    }
}
