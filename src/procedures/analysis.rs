/*!
Analysis of an unsatisfiable clause.

Takes a key to a clause which is unsatisfiable on the current valuation and returns an asserting clause.

In other words, conflict analysis takes a key to a clause which is unsatisfiable on the current valuation and applies resolution using the clauses used to (eventually) make the observation of a conflict given decisions made.

# Overview

Resolution stops at the first unique implication point (UIP) of the current level:
1. The literals of the conflict clause are marked as seen.
   A literal from a level below the current level is kept for the learnt clause, and a literal from the current level is counted as a path to resolve.
2. The trail is walked backwards to the most recently valued seen atom, and the reason of the atom is resolved into the working set.
3. When a single path remains, the atom walked to is the UIP, and the negation of its value is the asserted literal of the learnt clause.

Literals valued at level zero are never kept, though the reason of each is noted as a premise of the learnt clause.

After resolution the clause is [minimized](crate::procedures::minimization), the context backjumps to the second highest level of a literal in the clause, and the clause is stored.

# Example

```rust, ignore
match self.conflict_analysis(key)? {
    AnalysisResult::UnitClause { key, literal } => {
        self.record_assignment(literal, AssignmentSource::Clause(key));
    }

    AnalysisResult::AssertingClause { key, literal } => {
        self.record_assignment(literal, AssignmentSource::Clause(key));
    }
}
```
*/

use crate::{
    config::vsids::VSIDS,
    context::GenericContext,
    db::{ClauseKey, LevelIndex},
    misc::log::targets::{self},
    resolution_buffer::Seen,
    structures::{
        clause::{CClause, Clause, ClauseSource},
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// Possible 'Ok' results from conflict analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisResult {
    /// The result of analysis is a unit clause, and the context is now at level zero.
    UnitClause {
        /// The key of the clause.
        key: ClauseKey,
        /// The literal of the clause.
        literal: CLiteral,
    },

    /// The result of analysis is a (non-unit) asserting clause, and the context is at the level the literal is asserted.
    AssertingClause {
        /// The key of the asserting clause.
        key: ClauseKey,

        /// The literal asserted by the clause.
        literal: CLiteral,
    },
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// For details on conflict analysis see the [analysis](crate::procedures::analysis) procedure.
    ///
    /// The literal of the result is not valued.
    pub fn conflict_analysis(&mut self, key: ClauseKey) -> Result<AnalysisResult, err::ErrorKind> {
        let level = self.trail.level();
        log::debug!(target: targets::ANALYSIS, "Analysis of {key} at level {level}");

        self.resolution_buffer.refresh();

        if let VSIDS::Chaff = self.config.vsids_variant.value {
            let atoms = self.clause_db.get(key)?.atoms().collect::<Vec<_>>();
            self.atom_db.bump_relative(atoms.into_iter());
        }

        // Position 0 is reserved for the asserted literal.
        let mut learnt: CClause = vec![CLiteral::new(0, true)];
        let mut paths = 0;
        let mut index = self.trail.len();
        let mut reason = key;
        let mut resolved = None;

        loop {
            self.resolution_buffer.note_premise(reason);
            self.clause_db.bump_activity(reason);

            let clause = self.clause_db.get(reason)?;
            for literal in clause.literals() {
                let atom = literal.atom();
                if resolved.is_some_and(|r: CLiteral| r.atom() == atom) {
                    continue;
                }
                if self.resolution_buffer.seen(atom) != Seen::No {
                    continue;
                }

                let Some(atom_level) = self.atom_db.level_of(atom) else {
                    log::error!(target: targets::ANALYSIS, "Unvalued {literal} in {reason}");
                    return Err(err::ErrorKind::from(err::AnalysisError::MissingReason));
                };

                self.resolution_buffer.mark(atom, Seen::Source);
                if atom_level == 0 {
                    if let Some(premise) = self.atom_db.reason_of(atom).clause_key() {
                        self.resolution_buffer.note_premise(premise);
                    }
                    continue;
                }

                if let VSIDS::MiniSAT = self.config.vsids_variant.value {
                    self.atom_db.bump_activity(atom);
                }

                match atom_level >= level {
                    true => paths += 1,
                    false => learnt.push(*literal),
                }
            }

            if paths == 0 {
                log::error!(target: targets::ANALYSIS, "No literal of {key} at level {level}");
                return Err(err::ErrorKind::from(err::AnalysisError::NoCurrentLevel));
            }

            // The most recently valued seen atom, which is at the current level.
            let next = loop {
                if index == 0 {
                    return Err(err::ErrorKind::from(err::AnalysisError::EmptyResolution));
                }
                index -= 1;
                let candidate = self.trail.literals[index];
                if self.resolution_buffer.is_seen(candidate.atom())
                    && self.atom_db.level_of(candidate.atom()) == Some(level)
                {
                    break candidate;
                }
            };

            self.resolution_buffer.unmark(next.atom());
            paths -= 1;
            resolved = Some(next);

            if paths == 0 {
                break;
            }

            reason = match self.atom_db.reason_of(next.atom()) {
                AssignmentSource::Clause(key) => key,
                _ => {
                    log::error!(target: targets::ANALYSIS, "Missing reason for {next}");
                    return Err(err::ErrorKind::from(err::AnalysisError::MissingReason));
                }
            };
        }

        let Some(uip) = resolved else {
            return Err(err::ErrorKind::from(err::AnalysisError::EmptyResolution));
        };
        learnt[0] = uip.negate();

        // Analysis marks are the literals of the clause, as needed for minimization.
        self.resolution_buffer.mark(uip.atom(), Seen::Source);
        self.counters.max_literals += learnt.len();
        self.minimize(&mut learnt);
        self.counters.tot_literals += learnt.len();

        let premises = self.resolution_buffer.take_premises();
        let literal = learnt[0];

        match learnt.len() {
            1 => {
                self.backjump(0)?;
                let key = self.clause_db.store(
                    learnt,
                    ClauseSource::Resolution,
                    premises,
                    &self.atom_db,
                    &mut self.watches,
                )?;
                log::debug!(target: targets::ANALYSIS, "Unit clause {literal} as {key}");
                Ok(AnalysisResult::UnitClause { key, literal })
            }

            _ => {
                let target = self.second_level(&mut learnt);
                self.backjump(target)?;
                let key = self.clause_db.store(
                    learnt,
                    ClauseSource::Resolution,
                    premises,
                    &self.atom_db,
                    &mut self.watches,
                )?;
                self.clause_db.bump_activity(key);
                log::debug!(target: targets::ANALYSIS, "Asserting clause {key} for {literal} at {target}");
                Ok(AnalysisResult::AssertingClause { key, literal })
            }
        }
    }

    /// The highest level of a literal of `clause` after the first, which is moved to index 1.
    ///
    /// The backjump level of an asserting clause, with the asserted literal at index 0.
    fn second_level(&self, clause: &mut CClause) -> LevelIndex {
        let mut best = 1;
        let mut best_level = 0;
        for (index, literal) in clause.iter().enumerate().skip(1) {
            let level = self.atom_db.level_of(literal.atom()).unwrap_or(0);
            if level > best_level {
                best = index;
                best_level = level;
            }
        }
        clause.swap(1, best);
        best_level
    }
}
