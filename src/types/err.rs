//! Error types used in the library.
//!
//! - Most of these indicate a broken invariant, and a solve which returns one should be abandoned.
//! - Some are internally expected, e.g. BCP errors are used to control the flow of a solve.
//! - Some are external, e.g. a [ParseError] from reading a relation symbol.
//!
//! Unsatisfiability is never an error.
//! A formula found to be unsatisfiable is reported as such through [Report](crate::reports::Report).
//!
//! Names of the error enums, for the most part, overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::{db::ClauseKey, structures::atom::Atom, theory::ConstraintKey};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Analysis(AnalysisError),
    AtomDB(AtomDBError),
    BCP(BCPError),
    ClauseDB(ClauseDBError),
    Config(ConfigError),
    Parse(ParseError),
    Theory(TheoryError),

    /// A backjump was requested through a literal without a decision level.
    Backjump,

    /// The context was in a state which does not support the request.
    InvalidState,
}

/// Noted errors during conflict analysis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnalysisError {
    /// Somehow resolution resolved to an empty clause.
    EmptyResolution,

    /// Resolution reached an implied literal without a reason clause.
    MissingReason,

    /// Analysis was called on a clause with no literal at the current level.
    NoCurrentLevel,
}

impl From<AnalysisError> for ErrorKind {
    fn from(e: AnalysisError) -> Self {
        ErrorKind::Analysis(e)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,

    /// A literal was given whose atom has not been created.
    UnknownAtom(Atom),
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(ClauseKey),

    /// Some corruption in the watched literals of a clause.
    /// This is unexpected.
    CorruptWatch,
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause with watches.
    EmptyClause,

    /// A clause is missing.
    Missing,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Rejected revisions to a configuration option.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The value is outside the bounds of the named option.
    OutOfBounds(&'static str),

    /// The named option may not be revised in the current state of the context.
    InvalidState(&'static str),
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

/// Errors from reading symbols.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An unrecognised relation symbol.
    Relation(String),

    /// An unrecognised sort name.
    Sort(String),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Breaches of the contract between the search and a theory backend.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TheoryError {
    /// A retraction was not of the most recently asserted constraint.
    RetractMismatch {
        /// The constraint at the top of the assertion stack, if any.
        expected: Option<ConstraintKey>,

        /// The constraint which was retracted.
        found: ConstraintKey,
    },

    /// An explanation of inconsistency was empty.
    EmptyExplanation,

    /// An explanation named a constraint which is not asserted.
    UnassertedExplanation(ConstraintKey),
}

impl From<TheoryError> for ErrorKind {
    fn from(e: TheoryError) -> Self {
        ErrorKind::Theory(e)
    }
}
