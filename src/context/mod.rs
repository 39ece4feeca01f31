/*!
The context, to which formulas are added and within which solves take place.

Strictly, a [GenericContext] and a [Context].

The generic context is generic over the source of randomness.
[from_config](Context::from_config) and [with_backend](Context::with_backend) are implemented for a context rather than a generic context to avoid requiring a source of randomness to be supplied alongside a config.

A context owns everything used during a solve: the databases, the trail, the constraint pool, the abstraction map, and the theory backend.
Independent solves use independent contexts, with nothing shared.

# Example
```rust
# use otter_smt::context::Context;
# use otter_smt::config::Config;
# use otter_smt::reports::Report;
# use otter_smt::structures::literal::{CLiteral, Literal};
let mut the_context = Context::from_config(Config::default());

let p = the_context.fresh_or_max_atom();
let q = the_context.fresh_or_max_atom();

let p_q_clause = vec![CLiteral::new(p, true), CLiteral::new(q, true)];
assert!(the_context.add_clause(p_q_clause).is_ok());

let not_p = CLiteral::new(p, false);

assert!(the_context.add_clause(not_p).is_ok());
assert!(the_context.solve().is_ok());
assert_eq!(the_context.report(), Report::Satisfiable);

assert_eq!(the_context.atom_db.value_of(p), Some(false));
assert_eq!(the_context.atom_db.value_of(q), Some(true));
```
*/

pub mod callbacks;
mod counters;
pub use counters::Counters;
mod generic;
pub use generic::GenericContext;
mod specific;
pub use specific::Context;

use crate::db::ClauseKey;

/// Why a solve ended without an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnknownReason {
    /// A budget on conflicts, propagations, or time was exhausted.
    Exhausted,

    /// The solve was interrupted, or the terminate callback requested termination.
    Interrupted,

    /// A theory backend was unable to decide the asserted constraints.
    Theory,
}

impl std::fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "Exhausted"),
            Self::Interrupted => write!(f, "Interrupted"),
            Self::Theory => write!(f, "Theory"),
        }
    }
}

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The context allows for configuration.
    Configuration,

    /// The context allows input.
    Input,

    /// The database is known to be consistent, e.g. with a complete valuation.
    Satisfiable,

    /// The database is known to be inconsistent, e.g. with an unsatisfiable clause identified.
    Unsatisfiable(ClauseKey),

    /// The database is inconsistent with the assumptions of the last solve.
    AssumptionsFailed,

    /// A solve ended without an answer.
    Unknown(UnknownReason),

    /// The consistency of the database is unknown.
    Solving,
}

impl ContextState {
    /// Configuration precedes input, which precedes any solve.
    fn stage(&self) -> u8 {
        match self {
            Self::Configuration => 0,
            Self::Input => 1,
            _ => 2,
        }
    }

    /// True if an option revisable until `max_state` may be revised in this state.
    pub fn permits_revision_until(&self, max_state: ContextState) -> bool {
        self.stage() <= max_state.stage()
    }
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Input => write!(f, "Input"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable(_) => write!(f, "Unsatisfiable"),
            Self::AssumptionsFailed => write!(f, "Unsatisfiable (given assumptions)"),
            Self::Unknown(reason) => write!(f, "Unknown ({reason})"),
            Self::Solving => write!(f, "Solving"),
        }
    }
}
