//! Determines the satisfiability of the formula in a context.
//!
//! # Overview
//!
//! A solve is a sequence of searches, each ended by a restart, or by an answer.
//!
//! Within a search, the formula, the valuation, and the asserted theory constraints are revised in a loop:
//!
//! - Pending literals are [propagated](crate::procedures::bcp).
//!   + If some clause is false on the valuation, the clause is [analysed](crate::procedures::analysis), a clause asserting some literal at a lower level is learnt, and a [backjump](crate::procedures::backjump) is made to that level.
//!   + If the clause is false on the level zero valuation, the formula is unsatisfiable.
//! - Otherwise, the [theory backend](crate::procedures::theory) is consulted on the constraints of the true literals.
//!   + An inconsistency is explained by a lemma, which is false on the valuation and so resolved in the same way as a clause found during propagation.
//!   + If the backend can not decide the constraints, the solve ends with an unknown result.
//! - Otherwise, the next [assumption](crate::procedures::assumptions) is made, if any.
//!   + If the assumption is false, the formula is unsatisfiable given the assumptions.
//! - Otherwise, a [decision](crate::procedures::decision) is made.
//!   If every atom eligible for decisions has a value, the formula is satisfiable.
//!
//! Roughly, the loop is as diagrammed:
//!
//! ```none
//!                         +---------------+
//!   +---------------------| make_decision |-----> satisfiable, if no atom is without a value
//!   |                     +---------------+
//!   |                             ⌃
//!   |                             | if the constraints are consistent
//!   ⌄                             |
//!   |  +-----------+         +----------------+
//! --+->| propagate |-------->| consult_theory |-----> unknown, if undecided
//!   ⌃  +-----------+         +----------------+
//!   |       |                        |
//!   |       | if a clause is false   | if a lemma is learnt
//!   |       ⌄                        |
//!   |  +------------------+          |
//!   +--| resolve_conflict |<---------+
//!      +------------------+-----> unsatisfiable, if the clause is false at level zero
//! ```
//!
//! # Restarts
//!
//! At the restart decision point, after propagation without conflict:
//! - Budgets, the interrupt flag, and the terminate callback are polled, and any of these may end the solve with an unknown result.
//! - If enough conflicts have been seen since the last restart, every decision is undone and a fresh search begins.
//! - At level zero, the clause database is [simplified](crate::procedures::simplify).
//! - If there are too many learnt clauses, the learnt clauses are [reduced](crate::procedures::reduction).
//!
//! The interval between restarts is the base interval scaled by the [luby](crate::generic::luby) sequence, or by a geometric sequence.
//!
//! # Example
//!
//! ```rust
//! # use otter_smt::config::Config;
//! # use otter_smt::context::Context;
//! # use otter_smt::reports::Report;
//! let mut the_context = Context::from_config(Config::default());
//!
//! let p = the_context.boolean("p").unwrap();
//! let q = the_context.boolean("q").unwrap();
//!
//! assert!(the_context.add_clause(vec![-p, q]).is_ok());
//! assert!(the_context.add_clause(vec![p, -q]).is_ok());
//!
//! assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
//! assert_eq!(the_context.literal_value(p), the_context.literal_value(q));
//!
//! assert!(the_context.add_clause(vec![p, q]).is_ok());
//! assert!(the_context.add_clause(vec![-p, -q]).is_ok());
//!
//! assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
//! ```
//!
//! # Literature
//!
//! The search follows the CDCL procedure as presented in [Decision Procedures](https://doi.org/10.1007/978-3-662-50497-0) and the [Handbook of satisfiability](https://www.iospress.com/catalog/books/handbook-of-satisfiability-2), with theory consultation as in DPLL(T).

use std::time::Instant;

use crate::{
    context::{ContextState, GenericContext, UnknownReason},
    db::{ClauseKey, LevelIndex},
    generic::luby::Luby,
    misc::log::targets::{self},
    procedures::{
        analysis::AnalysisResult, assumptions::AssumptionOk, decision::DecisionOk,
        theory::TheoryOk,
    },
    reports::Report,
    structures::{consequence::AssignmentSource, literal::Literal},
    types::err::{self},
};

/// Possible 'Ok' results from resolving a clause false on the current valuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictOk {
    /// A literal was asserted, after a backjump.
    Asserted,

    /// The clause is false at level zero, and the context is unsatisfiable.
    Fundamental,
}

/// How a search ended.
enum SearchOk {
    Restart,
    Finished,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Determines the satisfiability of the formula in the context.
    ///
    /// For documentation, see [procedures::solve](crate::procedures::solve).
    pub fn solve(&mut self) -> Result<Report, err::ErrorKind> {
        let start = Instant::now();
        self.failed_assumptions.clear();

        if let ContextState::Unsatisfiable(_) = self.state {
            self.clear_assumptions();
            return Ok(Report::Unsatisfiable);
        }
        if self.trail.decision_is_made() {
            self.clear_decisions()?;
        }
        self.state = ContextState::Solving;

        self.clause_db.max_learnts = self.clause_db.original_count() as f64
            * self.clause_db.config.learntsize_factor.value;
        self.clause_db.learntsize_adjust_confl =
            self.clause_db.config.learntsize_adjust_start.value;
        self.clause_db.learntsize_adjust_cnt = self.clause_db.learntsize_adjust_confl as i64;
        self.counters.luby = Luby::default();

        let mut restart_count = 0;
        let result = loop {
            let interval = self.restart_interval(restart_count);
            match self.search(interval, start) {
                Ok(SearchOk::Restart) => {
                    restart_count += 1;
                    self.counters.restarts += 1;
                    log::debug!(target: targets::RESTART, "Restart {} after {} conflicts", self.counters.restarts, self.counters.total_conflicts);
                }
                Ok(SearchOk::Finished) => break Ok(self.report()),
                Err(e) => break Err(e),
            }
        };

        self.clear_assumptions();
        self.counters.time = start.elapsed();
        log::info!(target: targets::RESTART, "Solve ended with {} after {:?}", self.state, self.counters.time);
        result
    }

    /// The count of conflicts before the next restart, if restarts are permitted.
    fn restart_interval(&mut self, restart_count: i32) -> Option<f64> {
        if !self.config.restarts.value {
            return None;
        }
        let base = self.config.restart_first.value as f64;
        let increment = self.config.restart_inc.value;
        match self.config.luby_restarts.value {
            true => self.counters.luby.next_scaled(increment).map(|scale| base * scale),
            false => Some(base * increment.powi(restart_count)),
        }
    }

    fn search(&mut self, interval: Option<f64>, start: Instant) -> Result<SearchOk, err::ErrorKind> {
        self.counters.fresh_conflicts = 0;

        loop {
            self.counters.total_iterations += 1;

            match self.propagate() {
                Ok(()) => {}

                Err(err::BCPError::Conflict(key)) => {
                    match self.resolve_conflict(key)? {
                        ConflictOk::Asserted => continue,
                        ConflictOk::Fundamental => return Ok(SearchOk::Finished),
                    }
                }

                Err(e) => return Err(err::ErrorKind::from(e)),
            }

            // The restart decision point.
            if let Some(reason) = self.stop_reason(start) {
                log::info!(target: targets::RESTART, "Solve stopped: {reason}");
                self.state = ContextState::Unknown(reason);
                return Ok(SearchOk::Finished);
            }

            if interval.is_some_and(|interval| self.counters.fresh_conflicts as f64 >= interval) {
                self.backjump(0)?;
                return Ok(SearchOk::Restart);
            }

            if !self.trail.decision_is_made() {
                self.simplify()?;
            }

            if self.clause_db.learnt_count() as f64 - self.trail.len() as f64
                >= self.clause_db.max_learnts
            {
                self.reduce_db()?;
            }

            match self.consult_theory()? {
                TheoryOk::Consistent => match self.make_assumption()? {
                    AssumptionOk::Made(_) => continue,

                    AssumptionOk::Failed => {
                        self.state = ContextState::AssumptionsFailed;
                        return Ok(SearchOk::Finished);
                    }

                    AssumptionOk::Exhausted => {}
                },

                TheoryOk::Unknown => {
                    self.state = ContextState::Unknown(UnknownReason::Theory);
                    return Ok(SearchOk::Finished);
                }

                TheoryOk::Lemma(key) => {
                    match self.resolve_conflict(key)? {
                        ConflictOk::Asserted => continue,
                        ConflictOk::Fundamental => return Ok(SearchOk::Finished),
                    }
                }
            }

            match self.make_decision()? {
                DecisionOk::Literal(_) => {}
                DecisionOk::Exhausted => {
                    self.state = ContextState::Satisfiable;
                    return Ok(SearchOk::Finished);
                }
            }
        }
    }

    /// The reason to stop the solve, if any.
    fn stop_reason(&mut self, start: Instant) -> Option<UnknownReason> {
        let budget = self.config.budget;
        if budget
            .conflicts
            .is_some_and(|limit| self.counters.total_conflicts >= limit)
            || budget
                .propagations
                .is_some_and(|limit| self.counters.propagations >= limit)
            || budget.time.is_some_and(|limit| start.elapsed() >= limit)
        {
            return Some(UnknownReason::Exhausted);
        }

        if self.is_interrupted() || self.check_callback_terminate() {
            return Some(UnknownReason::Interrupted);
        }

        None
    }

    /// Resolves a clause which is false on the current valuation, asserting some literal after a backjump.
    ///
    /// - If every literal of the clause is false at level zero, the context is unsatisfiable.
    /// - If a single literal of the clause has the highest level of the clause, the clause is asserting after a backjump to the next highest level.
    /// - Otherwise, the context backjumps to the highest level of the clause and the clause is [analysed](crate::procedures::analysis).
    pub fn resolve_conflict(&mut self, key: ClauseKey) -> Result<ConflictOk, err::ErrorKind> {
        let mut levels = Vec::default();
        for literal in self.clause_db.get(key)?.iter() {
            match self.atom_db.level_of(literal.atom()) {
                Some(level) => levels.push((*literal, level)),
                None => {
                    log::error!(target: targets::BACKJUMP, "{literal} of {key} was not valued");
                    return Err(err::ErrorKind::Backjump);
                }
            }
        }

        let top = levels.iter().map(|(_, level)| *level).max().unwrap_or(0);
        if top == 0 {
            log::info!(target: targets::ANALYSIS, "Conflict at level zero from {key}");
            self.state = ContextState::Unsatisfiable(key);
            return Ok(ConflictOk::Fundamental);
        }

        self.counters.total_conflicts += 1;
        self.counters.fresh_conflicts += 1;

        let mut at_top = levels.iter().filter(|(_, level)| *level == top);
        if let (Some((literal, _)), None) = (at_top.next(), at_top.next()) {
            let literal = *literal;
            let second: LevelIndex = levels
                .iter()
                .filter(|(_, level)| *level < top)
                .map(|(_, level)| *level)
                .max()
                .unwrap_or(0);

            self.backjump(second)?;
            self.record_assignment(literal, AssignmentSource::Clause(key));
            log::debug!(target: targets::ANALYSIS, "{key} asserts {literal} at {second}");
            self.conclude_conflict();
            return Ok(ConflictOk::Asserted);
        }

        if top < self.trail.level() {
            self.backjump(top)?;
        }

        match self.conflict_analysis(key)? {
            AnalysisResult::UnitClause { key, literal }
            | AnalysisResult::AssertingClause { key, literal } => {
                self.record_assignment(literal, AssignmentSource::Clause(key));
            }
        }

        self.conclude_conflict();
        Ok(ConflictOk::Asserted)
    }

    /// Decays activity, and grows the limit on learnt clauses when the adjustment interval elapses.
    fn conclude_conflict(&mut self) {
        self.atom_db.decay_activity();
        self.clause_db.decay_activity();

        self.clause_db.learntsize_adjust_cnt -= 1;
        if self.clause_db.learntsize_adjust_cnt <= 0 {
            self.clause_db.learntsize_adjust_confl *= self.clause_db.config.learntsize_adjust_inc.value;
            self.clause_db.learntsize_adjust_cnt = self.clause_db.learntsize_adjust_confl as i64;
            self.clause_db.max_learnts *= self.clause_db.config.learntsize_inc.value;
            log::debug!(target: targets::REDUCTION, "Learnt clause limit {}", self.clause_db.max_learnts);
        }
    }
}
