/*!
Infeasible subsets of an unsatisfiable formula.

When a context is unsatisfiable some clause is false on the level zero valuation, and the original clauses from which the clause follows form an infeasible subset of the formula.

The subset is read from the clause database:
- Each learnt clause records its premises in the resolution graph, including the reasons for any literal dropped as fixed at level zero.
- Each original clause added with literals fixed false at level zero records the reasons for those literals as premises.
- The reason for each literal of a clause which is false at level zero is followed, as those reasons were used to observe the clause is false.

Theory lemmas have no premises, as a lemma follows from the theory alone.
Still, the literals of a lemma are followed, so the subset includes the clauses which made the constraints of the lemma true.

```rust
# use otter_smt::config::Config;
# use otter_smt::context::Context;
# use otter_smt::reports::Report;
let mut the_context = Context::from_config(Config::default());

let p = the_context.boolean("p").unwrap();
let q = the_context.boolean("q").unwrap();
let r = the_context.boolean("r").unwrap();

the_context.add_clause(vec![p, q]).unwrap();
the_context.add_clause(vec![-p, q]).unwrap();
the_context.add_clause(vec![-q]).unwrap();
the_context.add_clause(vec![r, p]).unwrap();

assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
assert_eq!(the_context.core_keys().unwrap().len(), 3);
```
*/

use std::collections::{HashSet, VecDeque};

use crate::{
    context::{ContextState, GenericContext},
    db::ClauseKey,
    misc::log::targets,
    reports::Outcome,
    structures::{
        clause::{CClause, ClauseSource},
        literal::Literal,
    },
    types::err::ErrorKind,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The keys of an infeasible subset of the original clauses, if the context is unsatisfiable.
    pub fn core_keys(&self) -> Result<Vec<ClauseKey>, ErrorKind> {
        let ContextState::Unsatisfiable(unsatisfiable) = self.state else {
            return Err(ErrorKind::InvalidState);
        };

        let mut core = Vec::default();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([unsatisfiable]);

        while let Some(key) = queue.pop_front() {
            if !seen.insert(key) {
                continue;
            }

            if let Ok(clause) = self.clause_db.get(key) {
                if clause.source() == ClauseSource::Original {
                    core.push(key);
                }

                for literal in clause.iter() {
                    let atom = literal.atom();
                    if self.atom_db.literal_value(*literal) != Some(false)
                        || self.atom_db.level_of(atom) != Some(0)
                    {
                        continue;
                    }
                    if let Some(reason) = self.atom_db.reason_of(atom).clause_key() {
                        if reason != key {
                            queue.push_back(reason);
                        }
                    }
                }
            }

            queue.extend(self.clause_db.premises_of(key).iter().copied());
        }

        log::debug!(target: targets::CORE, "Core of {} clauses from {unsatisfiable}", core.len());
        Ok(core)
    }

    /// The clauses of an infeasible subset of the original clauses, if the context is unsatisfiable.
    ///
    /// Each clause is as stored, and so without any literal fixed false at level zero when the clause was added.
    pub fn core_clauses(&self) -> Result<Vec<CClause>, ErrorKind> {
        let mut clauses = Vec::default();
        for key in self.core_keys()? {
            clauses.push(self.clause_db.get(key)?.to_vec());
        }
        Ok(clauses)
    }

    /// The answer of the last solve, with a model or an infeasible subset as evidence.
    pub fn outcome(&self) -> Result<Outcome, ErrorKind> {
        match self.state {
            ContextState::Satisfiable => Ok(Outcome::Satisfiable(self.model()?)),
            ContextState::Unsatisfiable(_) => Ok(Outcome::Unsatisfiable(self.core_keys()?)),
            ContextState::AssumptionsFailed => {
                Ok(Outcome::FailedAssumptions(self.failed_assumptions().to_vec()))
            }
            ContextState::Unknown(reason) => Ok(Outcome::Unknown(Some(reason))),
            ContextState::Configuration | ContextState::Input | ContextState::Solving => {
                Ok(Outcome::Unknown(None))
            }
        }
    }
}
