use crate::{db::keys::ClauseKey, misc::log::targets};

use super::ClauseDB;

/// Methods for the activity of learnt clauses.
impl ClauseDB {
    /// Bumps the activity of the clause at `key`, rescoring the activity of every learnt clause if the bumped activity exceeds the maximum.
    pub fn bump_activity(&mut self, key: ClauseKey) {
        let bump = self.config.bump.value;
        let Some(clause) = self.clauses.get_mut(key) else {
            return;
        };
        if !clause.source().is_learnt() {
            return;
        }
        clause.activity += bump;
        if clause.activity > self.config.bump.max {
            self.rescore_activity();
        }
    }

    /// Increases the activity bump, which has the effect of decaying the activity of all clauses.
    pub fn decay_activity(&mut self) {
        self.config.bump.value /= self.config.decay.value;
    }

    /// Scales the activity of every learnt clause, and the bump, down by the maximum activity.
    pub fn rescore_activity(&mut self) {
        let factor = 1.0 / self.config.bump.max;
        log::debug!(target: targets::REDUCTION, "Clause activity rescore by {factor}");
        for key in &self.learnt {
            if let Some(clause) = self.clauses.get_mut(*key) {
                clause.activity *= factor;
            }
        }
        self.config.bump.value *= factor;
    }

    /// The activity of the clause at `key`, or zero if the clause has been removed.
    pub fn activity_of(&self, key: ClauseKey) -> f64 {
        self.clauses.get(key).map(|clause| clause.activity).unwrap_or(0.0)
    }
}
