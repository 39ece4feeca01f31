/*!
Reduction of the learnt clauses.

Learnt clauses are ordered by activity, and roughly the less active half is removed.
Any clause whose activity is below the bump divided by the count of learnt clauses is also removed.

Binary clauses are never removed, nor are [locked](crate::db::clause::ClauseDB::is_locked) clauses, as a locked clause is the reason for the value of some atom.

Removal is lazy, and the watch lists are swept once enough clauses have been detached.
*/

use crate::{context::GenericContext, misc::log::targets, types::err};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Removes roughly half of the learnt clauses, by activity.
    pub fn reduce_db(&mut self) -> Result<(), err::ErrorKind> {
        let mut keys = self.clause_db.learnt_keys().collect::<Vec<_>>();
        if keys.is_empty() {
            return Ok(());
        }
        let extra_lim = self.clause_db.config.bump.value / keys.len() as f64;

        // Clauses of size two are placed last, otherwise least active first.
        keys.sort_by(|a, b| {
            let a_rank = (self.clause_db.get(*a).map(|c| c.len() <= 2).unwrap_or(true), self.clause_db.activity_of(*a));
            let b_rank = (self.clause_db.get(*b).map(|c| c.len() <= 2).unwrap_or(true), self.clause_db.activity_of(*b));
            a_rank.0.cmp(&b_rank.0).then(a_rank.1.total_cmp(&b_rank.1))
        });

        let half = keys.len() / 2;
        let mut removed = 0;
        for (index, key) in keys.into_iter().enumerate() {
            let Ok(clause) = self.clause_db.get(key) else {
                continue;
            };
            if clause.len() <= 2 || self.clause_db.is_locked(key, &self.atom_db) {
                continue;
            }
            if index < half || clause.activity < extra_lim {
                self.clause_db.remove(key, &mut self.watches, false)?;
                removed += 1;
            }
        }
        log::info!(target: targets::REDUCTION, "Removed {removed} learnt clauses, {} remain", self.clause_db.learnt_count());

        if self.clause_db.sweep_due(&self.watches) {
            self.clause_db.sweep_watches(&mut self.watches);
        }
        Ok(())
    }
}
