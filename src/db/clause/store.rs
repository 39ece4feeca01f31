use crate::{
    db::{atom::AtomDB, keys::ClauseKey, watches::{BinaryWatch, Watches}},
    misc::log::targets,
    structures::clause::{CClause, ClauseSource},
    types::err,
};

use super::{db_clause::DbClause, ClauseDB};

/// Methods for storing clauses.
impl ClauseDB {
    /// Stores a clause, with watches initialised relative to the valuation of `atom_db`.
    ///
    /// ```rust, ignore
    /// self.clause_db.store(clause, ClauseSource::Resolution, premises, &self.atom_db, &mut self.watches);
    /// ```
    ///
    /// Any instance of storing a clause which takes part in propagation should use this method, as it maintains watched literals and counts.
    ///
    /// The two literals watched are the best candidates on the current valuation: a true literal, else a literal without a value, else the false literal of highest level.
    /// A unit clause is stored without watches.
    pub fn store(
        &mut self,
        clause: CClause,
        source: ClauseSource,
        premises: Vec<ClauseKey>,
        atom_db: &AtomDB,
        watches: &mut Watches,
    ) -> Result<ClauseKey, err::ClauseDBError> {
        if clause.is_empty() {
            log::error!(target: targets::CLAUSE_DB, "Attempt to store an empty clause with watches");
            return Err(err::ClauseDBError::EmptyClause);
        }

        let size = clause.len();
        let key = self
            .clauses
            .insert_with_key(|key| DbClause::new(key, clause, source));

        if let Some(stored) = self.clauses.get_mut(key) {
            stored.order_watch_candidates(atom_db);
            match size {
                1 => {}
                2 => {
                    watches.watch_binary(stored[0], BinaryWatch::new(stored[1], key));
                    watches.watch_binary(stored[1], BinaryWatch::new(stored[0], key));
                }
                _ => {
                    watches.watch_long(stored[0], key);
                    watches.watch_long(stored[1], key);
                }
            }
            log::trace!(target: targets::CLAUSE_DB, "Stored {source} {stored}");
        }

        self.note_addition(key, source, size, premises);
        Ok(key)
    }

    /// Stores a clause without watches, which takes no part in propagation.
    ///
    /// Used to record an empty clause, so the clause may be reported as the reason a formula is unsatisfiable.
    pub fn store_inert(
        &mut self,
        clause: CClause,
        source: ClauseSource,
        premises: Vec<ClauseKey>,
    ) -> ClauseKey {
        let size = clause.len();
        let key = self
            .clauses
            .insert_with_key(|key| DbClause::new(key, clause, source));
        log::trace!(target: targets::CLAUSE_DB, "Stored inert {source} clause {key}");
        self.note_addition(key, source, size, premises);
        key
    }

    fn note_addition(
        &mut self,
        key: ClauseKey,
        source: ClauseSource,
        size: usize,
        premises: Vec<ClauseKey>,
    ) {
        match source.is_learnt() {
            true => {
                self.learnt.push(key);
                self.learnt_count += 1;
                self.learnt_literals += size;
            }
            false => {
                self.original.push(key);
                self.original_count += 1;
                self.original_literals += size;
            }
        }

        if !premises.is_empty() {
            self.resolution_graph.insert(key, premises);
        }
    }
}
