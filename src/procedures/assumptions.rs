/*!
Solving under assumptions.

# Overview

Assumptions are literals taken to be true for a single solve, without being added to the formula.
So, a solve under assumptions determines whether the formula is satisfiable together with the assumptions, and after the solve the formula is as it was.

Assumptions are *stacked*: before any free decision is made, each assumption in turn is made as a decision on a level of its own.
- If an assumption is already true, an empty level is opened in its place, so the level of the *n*th assumption is always *n*.
- If an assumption is already false, the formula is unsatisfiable given the assumptions, and the solve ends.

As assumptions are decisions, a restart or a backjump undoes them as any other decision, and they are made again before the next free decision.

# Failed assumptions

When an assumption is found false, the assumptions responsible are found by walking the trail backwards from the false assumption, following reasons, in the same way as conflict analysis.
Every decision reached is an assumption, and together with the false assumption these are the *failed* assumptions: the formula is unsatisfiable given the failed assumptions alone.

Literals valued at level zero are not followed, as these are consequences of the formula.
In particular, if an assumption is false at level zero the assumption alone fails.

If the formula is unsatisfiable without any assumption, the context is [unsatisfiable](crate::context::ContextState::Unsatisfiable) and no assumption fails.

# Example

```rust
# use otter_smt::config::Config;
# use otter_smt::context::Context;
# use otter_smt::reports::Report;
let mut the_context = Context::from_config(Config::default());

let p = the_context.boolean("p").unwrap();
let q = the_context.boolean("q").unwrap();
let r = the_context.boolean("r").unwrap();

assert!(the_context.add_clause(vec![-p, q]).is_ok());
assert!(the_context.add_clause(vec![-q, -r]).is_ok());

assert_eq!(the_context.solve_given(Some(vec![r, p])), Ok(Report::Unsatisfiable));
assert!(the_context.failed_assumptions().contains(&p));
assert!(the_context.failed_assumptions().contains(&r));

// Assumptions last for a single solve.
assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
```
*/

use crate::{
    context::GenericContext,
    misc::log::targets,
    resolution_buffer::Seen,
    structures::{
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    reports::Report,
    types::err::{self},
};

/// Possible 'Ok' results from making assumptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssumptionOk {
    /// An assumption was made as a decision, and should be propagated.
    Made(CLiteral),

    /// Some assumption is false, and the failed assumptions have been noted.
    Failed,

    /// Every assumption holds.
    Exhausted,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Adds `literal` to the assumptions of the next solve.
    pub fn add_assumption(&mut self, literal: CLiteral) -> Result<(), err::ErrorKind> {
        self.check_atom(literal)?;
        self.assumptions.push(literal);
        Ok(())
    }

    /// Removes every assumption noted for the next solve.
    pub fn clear_assumptions(&mut self) {
        self.assumptions.clear();
    }

    /// The assumptions noted for the next solve.
    pub fn assumptions(&self) -> &[CLiteral] {
        &self.assumptions
    }

    /// Solves with the given assumptions, in addition to any already added.
    ///
    /// For documentation, see [procedures::assumptions](crate::procedures::assumptions).
    pub fn solve_given(
        &mut self,
        assumptions: Option<Vec<CLiteral>>,
    ) -> Result<Report, err::ErrorKind> {
        for literal in assumptions.unwrap_or_default() {
            if let Err(e) = self.add_assumption(literal) {
                self.clear_assumptions();
                return Err(e);
            }
        }
        self.solve()
    }

    /// The assumptions which failed during the last solve.
    ///
    /// Empty unless the last solve ended with the formula unsatisfiable given the assumptions.
    pub fn failed_assumptions(&self) -> &[CLiteral] {
        &self.failed_assumptions
    }

    /// Makes the next assumption without a level, if any, opening empty levels for assumptions which already hold.
    pub fn make_assumption(&mut self) -> Result<AssumptionOk, err::ErrorKind> {
        while let Some(&assumption) = self.assumptions.get(self.trail.level() as usize) {
            match self.atom_db.literal_value(assumption) {
                Some(true) => self.trail.push_level(),

                Some(false) => {
                    self.failed_assumptions = self.failed_assumption_analysis(assumption);
                    log::info!(target: targets::ASSUMPTION, "{assumption} failed with {} assumptions", self.failed_assumptions.len());
                    return Ok(AssumptionOk::Failed);
                }

                None => {
                    self.decide(assumption)?;
                    log::trace!(target: targets::ASSUMPTION, "Assumed {assumption} at {}", self.trail.level());
                    return Ok(AssumptionOk::Made(assumption));
                }
            }
        }

        Ok(AssumptionOk::Exhausted)
    }

    /// The assumptions responsible for the value of `assumption`, which is false, together with `assumption`.
    fn failed_assumption_analysis(&mut self, assumption: CLiteral) -> Vec<CLiteral> {
        let mut failed = vec![assumption];

        self.resolution_buffer.refresh();
        self.resolution_buffer.mark(assumption.atom(), Seen::Source);

        let level_zero = self.trail.position_above(0);
        for index in (level_zero..self.trail.len()).rev() {
            let literal = self.trail.literals[index];
            let atom = literal.atom();
            if !self.resolution_buffer.is_seen(atom) {
                continue;
            }

            match self.atom_db.reason_of(atom) {
                AssignmentSource::Decision => failed.push(literal),

                AssignmentSource::Clause(key) => {
                    if let Ok(clause) = self.clause_db.get(key) {
                        for other in clause.iter() {
                            let other_atom = other.atom();
                            if other_atom != atom
                                && self.atom_db.level_of(other_atom).is_some_and(|level| level > 0)
                            {
                                self.resolution_buffer.mark(other_atom, Seen::Source);
                            }
                        }
                    }
                }

                AssignmentSource::None | AssignmentSource::Fundamental => {}
            }
            self.resolution_buffer.unmark(atom);
        }

        self.resolution_buffer.refresh();
        failed
    }
}
