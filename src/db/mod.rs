//! Databases for holding information relevant to a solve.
//!
//! - [The clause database](crate::db::clause)
//!   + A collection of clauses, each indexed by a [ClauseKey].
//!     From an external perspective there are two important kinds of clause:
//!     * Original clauses, added to the context as part of a formula.
//!     * Learnt clauses, added by a procedure (resolution during analysis, or the explanation of a theory backend).
//!       Every learnt clause is a consequence of the original clauses together with the theory.
//! - [The atom database](crate::db::atom)
//!   + Properties of atoms: the current valuation, decision levels, reasons, saved phases, and activity.
//! - [The trail](crate::db::trail)
//!   + The order in which atoms were valued, split into decision levels.
//! - [Watches](crate::db::watches)
//!   + For each literal, the clauses in which the literal is watched.

pub mod atom;
pub mod clause;
mod keys;
pub use keys::*;
pub mod trail;
pub mod watches;

/// The index of a decision level.
pub type LevelIndex = u32;
