use crate::{
    context::{ContextState, GenericContext},
    db::{atom::AtomValue, ClauseKey},
    misc::log::targets,
    structures::{
        atom::{Atom, ATOM_MAX},
        clause::{CClause, Clause, ClauseSource},
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

use super::ClauseOk;

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Returns a fresh atom.
    ///
    /// For a practical alternative, see [fresh_or_max_atom](GenericContext::fresh_or_max_atom).
    pub fn fresh_atom(&mut self) -> Result<Atom, err::AtomDBError> {
        let previous_value = self.rng.random_bool(self.config.polarity_lean.value);
        let activity = match self.config.random_initial_activity.value {
            true => self.rng.random::<f64>() * 0.00001,
            false => 0.0,
        };

        let atom = self.atom_db.fresh_atom(previous_value, activity)?;
        self.watches.grow();
        self.resolution_buffer.grow_to(self.atom_db.count());
        Ok(atom)
    }

    /// Returns a fresh atom, or the maximum atom.
    ///
    /// In short, a safe alternative to unwrapping the result of [fresh_atom](GenericContext::fresh_atom), by defaulting to the maximum limit of an atom.
    /// And, as exhausting the atom limit is unlikely in many applications, this may be preferred.
    pub fn fresh_or_max_atom(&mut self) -> Atom {
        match self.fresh_atom() {
            Ok(atom) => atom,
            Err(err::AtomDBError::AtomsExhausted) | Err(err::AtomDBError::UnknownAtom(_)) => {
                ATOM_MAX
            }
        }
    }

    /// Returns a fresh literal with value true.
    ///
    /// Alternatively, see [fresh_or_max_literal](GenericContext::fresh_or_max_literal).
    pub fn fresh_literal(&mut self) -> Result<CLiteral, err::AtomDBError> {
        let atom = self.fresh_atom()?;
        Ok(CLiteral::new(atom, true))
    }

    /// Returns a fresh literal with value true, or the maximum atom with value true.
    pub fn fresh_or_max_literal(&mut self) -> CLiteral {
        CLiteral::new(self.fresh_or_max_atom(), true)
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Adds a clause to the context.
    ///
    /// The clause is simplified relative to the literals fixed at level zero:
    /// - Duplicate literals are merged.
    /// - A clause with complementary literals is a tautology, and is not stored.
    /// - A clause with a literal fixed true is satisfied, and is not stored.
    /// - Literals fixed false are dropped.
    ///
    /// If no literal remains the context is unsatisfiable.
    /// If a single literal remains the literal is fixed at level zero, and propagated.
    ///
    /// Any decisions made are cleared before the clause is added.
    pub fn add_clause(&mut self, clause: impl Clause) -> Result<ClauseOk, ErrorKind> {
        self.add_clause_from(clause.canonical(), ClauseSource::Original)
    }

    /// Adds a clause from some source, as [add_clause](GenericContext::add_clause).
    pub(crate) fn add_clause_from(
        &mut self,
        mut clause: CClause,
        source: ClauseSource,
    ) -> Result<ClauseOk, ErrorKind> {
        for literal in &clause {
            self.check_atom(*literal)?;
        }

        match self.state {
            ContextState::Unsatisfiable(_) => return Ok(ClauseOk::Unsatisfiable),

            ContextState::Satisfiable
            | ContextState::AssumptionsFailed
            | ContextState::Unknown(_)
            | ContextState::Solving => {
                self.clear_decisions()?
            }

            ContextState::Configuration | ContextState::Input => {
                if self.trail.decision_is_made() {
                    self.clear_decisions()?;
                }
                self.state = ContextState::Input;
            }
        }

        clause.sort_unstable();
        clause.dedup();

        // Sorted, so complementary literals are adjacent.
        if clause.windows(2).any(|pair| pair[0].atom() == pair[1].atom()) {
            log::trace!(target: targets::CLAUSE_DB, "Tautology {}", clause.as_dimacs(false));
            return Ok(ClauseOk::Tautology);
        }

        if clause
            .iter()
            .any(|literal| self.atom_db.literal_value(*literal) == Some(true))
        {
            return Ok(ClauseOk::Satisfied);
        }

        let mut premises = Vec::default();
        let mut reduced = CClause::with_capacity(clause.len());
        for literal in &clause {
            match self.atom_db.literal_value(*literal) {
                Some(false) => {
                    if let Some(key) = self.atom_db.reason_of(literal.atom()).clause_key() {
                        premises.push(key);
                    }
                }
                _ => reduced.push(*literal),
            }
        }

        match reduced.len() {
            0 => {
                // Stored as given, so the reasons of each literal may be followed from the clause.
                let key = self.clause_db.store_inert(clause, source, premises);
                log::info!(target: targets::CLAUSE_DB, "Empty clause from {key}");
                self.state = ContextState::Unsatisfiable(key);
                Ok(ClauseOk::Unsatisfiable)
            }

            1 => {
                let literal = reduced[0];
                let key = self.clause_db.store(
                    reduced,
                    source,
                    premises,
                    &self.atom_db,
                    &mut self.watches,
                )?;
                self.record_assignment(literal, AssignmentSource::Clause(key));

                match self.propagate() {
                    Ok(()) => Ok(ClauseOk::Added(key)),
                    Err(err::BCPError::Conflict(conflict)) => {
                        log::info!(target: targets::PROPAGATION, "Conflict at level zero from {conflict}");
                        self.state = ContextState::Unsatisfiable(conflict);
                        Ok(ClauseOk::Unsatisfiable)
                    }
                    Err(e) => Err(ErrorKind::from(e)),
                }
            }

            _ => {
                let key = self.clause_db.store(
                    reduced,
                    source,
                    premises,
                    &self.atom_db,
                    &mut self.watches,
                )?;
                Ok(ClauseOk::Added(key))
            }
        }
    }

    /// Removes the clause at `key` from the context.
    ///
    /// A clause which is the reason for the value of some atom is kept as a reason, though takes no further part in propagation.
    pub fn remove_clause(&mut self, key: ClauseKey) -> Result<(), ErrorKind> {
        if self.trail.decision_is_made() {
            self.clear_decisions()?;
        }

        match self.clause_db.is_locked(key, &self.atom_db) {
            true => self.clause_db.deactivate(key, &mut self.watches)?,
            false => {
                self.clause_db.remove(key, &mut self.watches, true)?;
            }
        }
        Ok(())
    }

    /// Values the atom of `literal` at the current level, noting the assignment on the trail if the atom had no value.
    pub(crate) fn record_assignment(
        &mut self,
        literal: CLiteral,
        source: AssignmentSource,
    ) -> AtomValue {
        let status = self.atom_db.assign(literal, self.trail.level(), source);
        if status == AtomValue::NotSet {
            self.trail.store_assignment(literal);
        }
        status
    }
}
