/*!
Consultation of the theory backend.

# Overview

The backend is consulted when propagation is quiescent, before a decision is made.

1. Each literal on the trail from the [head](crate::theory::TheoryBoundary::head) of the boundary is examined, in trail order.
   If the literal stands for a constraint, the constraint is passed to the backend.
   If the backend rejects an assertion, the remaining literals are left for a later consultation.
2. Unless some assertion was rejected, the backend checks the consistency of the asserted constraints.
3. On inconsistency the backend explains with a subset of the asserted constraints, and the negation of the literals standing for those constraints is stored as a *theory lemma*.

A theory lemma is false on the current valuation, and is resolved in the same way as a conflict found during propagation.
Though, the highest level of a literal in a lemma may be below the current level, and a lemma may have a single literal at its highest level.
In the first case the context backjumps to the highest level before analysis, and in the second case the lemma is asserting as is.

# Example

```rust,ignore
match self.consult_theory()? {
    TheoryOk::Consistent => { /* make a decision */ }
    TheoryOk::Lemma(key) => { self.resolve_conflict(key)?; }
    TheoryOk::Unknown => { /* end the solve */ }
}
```
*/

use crate::{
    context::GenericContext,
    db::ClauseKey,
    misc::log::targets::{self},
    structures::{clause::ClauseSource, literal::CLiteral},
    theory::{Passed, TheoryAnswer},
    types::err::{self},
};

/// Possible 'Ok' results from consulting the theory backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TheoryOk {
    /// The asserted constraints are consistent.
    Consistent,

    /// The asserted constraints are inconsistent, and a lemma was stored with the given key.
    Lemma(ClauseKey),

    /// The backend could not decide the asserted constraints.
    Unknown,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Passes the constraints of the unexamined true literals on the trail to the backend, and checks the backend.
    ///
    /// For documentation, see [procedures::theory](crate::procedures::theory).
    pub fn consult_theory(&mut self) -> Result<TheoryOk, err::ErrorKind> {
        let mut rejected = false;

        while self.theory.head < self.trail.len() {
            let position = self.theory.head;
            let literal = self.trail.literals[position];
            self.theory.head += 1;

            let Some(constraint) = self.abstraction.constraint_of(literal) else {
                continue;
            };

            let passed = Passed {
                literal,
                constraint,
                position,
            };
            if !self.theory.pass(passed, &self.pool) {
                log::debug!(target: targets::THEORY, "Assertion of {constraint} rejected");
                rejected = true;
                break;
            }
        }

        let answer = match rejected {
            true => TheoryAnswer::Unsat,
            false => {
                self.counters.theory_checks += 1;
                self.theory.check(&self.pool)
            }
        };
        log::trace!(target: targets::THEORY, "Check: {answer}");

        match answer {
            TheoryAnswer::Sat => Ok(TheoryOk::Consistent),

            TheoryAnswer::Unknown => Ok(TheoryOk::Unknown),

            TheoryAnswer::Unsat => {
                let lemma = self
                    .theory
                    .explanation()?
                    .into_iter()
                    .map(|literal| -literal)
                    .collect::<Vec<CLiteral>>();

                let key = self.clause_db.store(
                    lemma,
                    ClauseSource::Theory,
                    Vec::default(),
                    &self.atom_db,
                    &mut self.watches,
                )?;
                self.counters.theory_lemmas += 1;
                log::debug!(target: targets::THEORY, "Lemma {key}");

                Ok(TheoryOk::Lemma(key))
            }
        }
    }
}
