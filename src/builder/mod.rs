/*!
Tools for building a context.

# Basic methods

The library has three basic methods for building a context:
- [fresh_atom](crate::context::GenericContext::fresh_atom), to obtain a fresh atom.
- [literal_for](crate::context::GenericContext::literal_for), to obtain the literal standing for a constraint.
- [add_clause](crate::context::GenericContext::add_clause), to add a clause.

A formula may be added to a context by interweaving these methods.
In rough strokes, the pattern is to:
- Obtain a literal for each Boolean symbol and each constraint of a clause.
- Bundle the literals into a [CClause](crate::structures::clause::CClause).
- Add the clause to the context.

Clauses are simplified on addition, relative to the literals fixed at level zero.
And, as adding a clause may require revising the valuation, any decisions made by a previous solve are cleared first.

# Examples

A clause built using basic methods.

```rust
# use otter_smt::context::Context;
# use otter_smt::config::Config;
# use otter_smt::reports::Report;
# use otter_smt::structures::{clause::CClause, literal::{CLiteral, Literal}};
#
let mut the_context = Context::from_config(Config::default());
let p = the_context.fresh_or_max_atom();
let q = the_context.fresh_or_max_atom();

let clause_a = CClause::from([CLiteral::new(p, true), CLiteral::new(q, false)]);
let clause_b = CClause::from([CLiteral::new(p, false), CLiteral::new(q, true)]);

assert!(the_context.add_clause(clause_a).is_ok());
assert!(the_context.add_clause(clause_b).is_ok());
assert!(the_context.solve().is_ok());
assert_eq!(the_context.report(), Report::Satisfiable)
```

A build with named symbols and a constraint.

```rust
# use otter_smt::context::Context;
# use otter_smt::config::Config;
# use otter_smt::reports::Report;
# use otter_smt::theory::{BoundsBackend, Constraint, Polynomial, Relation, Sort};
# use num_rational::BigRational;
#
let mut the_context = Context::with_backend(Config::default(), BoundsBackend::default());
let p = the_context.boolean("p").unwrap();

let x = Polynomial::variable(the_context.variable("x", Sort::Int));
let half = Polynomial::constant(BigRational::new(1.into(), 2.into()));
let x_is_half = the_context.literal_for(Constraint::new(x - half, Relation::Eq)).unwrap();

// p, and p implies x = 1/2
assert!(the_context.add_clause(p).is_ok());
assert!(the_context.add_clause(vec![-p, x_is_half]).is_ok());

assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
```
*/

mod structures;
mod theory;

use crate::db::ClauseKey;

/// Ok results when adding a clause to the context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added to the context, with the given key.
    Added(ClauseKey),

    /// The clause contained a literal fixed true (and so was not added to the context).
    Satisfied,

    /// The clause was a tautology (and so was not added to the context).
    Tautology,

    /// The formula of the context is unsatisfiable, either due to the clause or prior to the clause.
    Unsatisfiable,
}
