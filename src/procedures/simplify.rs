/*!
Simplification of the clause database at level zero.

A clause satisfied by some literal fixed at level zero is satisfied on every extension of the level zero valuation, and takes no further part in a solve.

- Satisfied learnt clauses are removed.
- Satisfied original clauses are deactivated if [remove_satisfied](crate::config::dbs::ClauseDBConfig::remove_satisfied) is set.
  Original clauses are kept as premises, so an infeasible subset may be read from the database.

A clause which is the reason for the value of some atom is deactivated rather than removed.

Simplification is skipped if no literal has been fixed since the last simplification, or if too few propagations have been made since.
*/

use crate::{
    context::GenericContext,
    db::ClauseKey,
    misc::log::targets,
    types::err,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Simplifies the clause database relative to the literals fixed at level zero.
    ///
    /// Does nothing if a decision has been made.
    pub fn simplify(&mut self) -> Result<(), err::ErrorKind> {
        if self.trail.decision_is_made() {
            return Ok(());
        }
        if self.clause_db.simp_db_assigns == Some(self.trail.len()) || self.clause_db.simp_db_props > 0 {
            return Ok(());
        }

        let satisfied = |context: &Self, key: &ClauseKey| {
            context
                .clause_db
                .get(*key)
                .is_ok_and(|clause| clause.is_satisfied(&context.atom_db))
        };

        let learnt = self
            .clause_db
            .learnt_keys()
            .filter(|key| satisfied(self, key))
            .collect::<Vec<_>>();
        for key in &learnt {
            match self.clause_db.is_locked(*key, &self.atom_db) {
                true => self.clause_db.deactivate(*key, &mut self.watches)?,
                false => {
                    self.clause_db.remove(*key, &mut self.watches, false)?;
                }
            }
        }

        let mut original = Vec::default();
        if self.clause_db.config.remove_satisfied.value {
            original = self
                .clause_db
                .original_keys()
                .filter(|key| satisfied(self, key))
                .collect::<Vec<_>>();
            for key in &original {
                self.clause_db.deactivate(*key, &mut self.watches)?;
            }
        }

        log::debug!(target: targets::REDUCTION, "Simplified {} learnt and {} original clauses", learnt.len(), original.len());

        self.clause_db.sweep_watches(&mut self.watches);
        self.clause_db.simp_db_assigns = Some(self.trail.len());
        self.clause_db.simp_db_props =
            (self.clause_db.original_literals + self.clause_db.learnt_literals) as i64;
        Ok(())
    }
}
