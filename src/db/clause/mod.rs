/*!
A database of clause related things.

Clauses are kept in a [SlotMap], and so each clause has a versioned [ClauseKey].
A key to a removed clause never resolves to a clause stored later, which permits lazy removal of watches and a resolution graph which outlives the clauses it mentions.

Records of clauses are distinguished by [source](ClauseSource):
- Original clauses, from the formula.
- Learnt clauses, from resolution during analysis or from the explanation of a theory backend.

Fields of the database are private to ensure the use of methods which may be needed to uphold invariants.
*/

mod activity;
pub mod db_clause;
mod store;

use std::collections::HashMap;

use db_clause::DbClause;
use slotmap::SlotMap;

use crate::{
    config::{dbs::ClauseDBConfig, Config},
    db::{atom::AtomDB, keys::ClauseKey, watches::Watches},
    misc::log::targets::{self},
    structures::{clause::ClauseSource, consequence::AssignmentSource, literal::Literal},
    types::err::{self},
};

/// A database of clause related things.
pub struct ClauseDB {
    /// Clause database specific configuration parameters.
    pub config: ClauseDBConfig,

    clauses: SlotMap<ClauseKey, DbClause>,

    /// Keys of original clauses, some of which may have been removed.
    original: Vec<ClauseKey>,

    /// Keys of learnt clauses, some of which may have been removed.
    learnt: Vec<ClauseKey>,

    /// A count of active original clauses.
    original_count: usize,

    /// A count of active learnt clauses.
    learnt_count: usize,

    /// A count of literals in active original clauses.
    pub original_literals: usize,

    /// A count of literals in active learnt clauses.
    pub learnt_literals: usize,

    /// The premises of each clause derived from other clauses.
    ///
    /// Entries are kept after a clause is removed, as the clause may be a premise of some clause which remains.
    pub resolution_graph: HashMap<ClauseKey, Vec<ClauseKey>>,

    /// The limit on learnt clauses, beyond which learnt clauses are reduced.
    pub max_learnts: f64,

    /// The interval, in conflicts, between growths of the learnt clause limit.
    pub learntsize_adjust_confl: f64,

    /// Conflicts until the next growth of the learnt clause limit.
    pub learntsize_adjust_cnt: i64,

    /// The length of the trail at the last simplification of the database, if any.
    pub simp_db_assigns: Option<usize>,

    /// Propagations until the next simplification of the database is permitted.
    pub simp_db_props: i64,
}

impl ClauseDB {
    /// A new [ClauseDB] with local configuration options derived from `config`.
    pub fn new(config: &Config) -> Self {
        ClauseDB {
            config: config.clause_db.clone(),

            clauses: SlotMap::with_key(),
            original: Vec::default(),
            learnt: Vec::default(),

            original_count: 0,
            learnt_count: 0,
            original_literals: 0,
            learnt_literals: 0,

            resolution_graph: HashMap::default(),

            max_learnts: 0.0,
            learntsize_adjust_confl: 0.0,
            learntsize_adjust_cnt: 0,

            simp_db_assigns: None,
            simp_db_props: 0,
        }
    }

    /// The clause stored at `key`, if it remains in the database.
    pub fn get(&self, key: ClauseKey) -> Result<&DbClause, err::ClauseDBError> {
        self.clauses.get(key).ok_or(err::ClauseDBError::Missing)
    }

    /// A mutable borrow of the clause stored at `key`, if it remains in the database.
    pub fn get_mut(&mut self, key: ClauseKey) -> Result<&mut DbClause, err::ClauseDBError> {
        self.clauses.get_mut(key).ok_or(err::ClauseDBError::Missing)
    }

    /// Whether the clause at `key` remains and takes part in propagation.
    pub fn is_active(&self, key: ClauseKey) -> bool {
        self.clauses.get(key).is_some_and(|clause| clause.is_active())
    }

    /// A count of active original clauses.
    pub fn original_count(&self) -> usize {
        self.original_count
    }

    /// A count of active learnt clauses.
    pub fn learnt_count(&self) -> usize {
        self.learnt_count
    }

    /// A count of every clause stored, active or not.
    pub fn stored_count(&self) -> usize {
        self.clauses.len()
    }

    /// Keys to the active original clauses.
    pub fn original_keys(&self) -> impl Iterator<Item = ClauseKey> + '_ {
        self.original
            .iter()
            .copied()
            .filter(|key| self.is_active(*key))
    }

    /// Keys to the active learnt clauses.
    pub fn learnt_keys(&self) -> impl Iterator<Item = ClauseKey> + '_ {
        self.learnt.iter().copied().filter(|key| self.is_active(*key))
    }

    /// Every stored clause, active or not.
    pub fn all_clauses(&self) -> impl Iterator<Item = &DbClause> {
        self.clauses.values()
    }

    /// The premises of the clause at `key`, if any were recorded.
    pub fn premises_of(&self, key: ClauseKey) -> &[ClauseKey] {
        self.resolution_graph
            .get(&key)
            .map(|premises| premises.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the clause is the reason for the value of some atom.
    ///
    /// The implied literal of a long clause is always the first literal, while either literal of a binary clause may be implied.
    pub fn is_locked(&self, key: ClauseKey, atom_db: &AtomDB) -> bool {
        let Some(clause) = self.clauses.get(key) else {
            return false;
        };
        clause.iter().take(2).any(|literal| {
            atom_db.reason_of(literal.atom()) == AssignmentSource::Clause(key)
                && atom_db.literal_value(*literal) == Some(true)
        })
    }

    fn note_removal(&mut self, clause: &DbClause) {
        match clause.source().is_learnt() {
            true => {
                self.learnt_count -= 1;
                self.learnt_literals -= clause.len();
            }
            false => {
                self.original_count -= 1;
                self.original_literals -= clause.len();
            }
        }
    }

    fn unwatch(clause: &DbClause, watches: &mut Watches, strict: bool) {
        match clause.len() {
            0 | 1 => {}
            2 => {
                watches.unwatch_binary(clause[0], clause.key());
                watches.unwatch_binary(clause[1], clause.key());
            }
            _ => match strict {
                true => {
                    if let Some((a, b)) = clause.watched() {
                        watches.unwatch_long(a, clause.key());
                        watches.unwatch_long(b, clause.key());
                    }
                }
                false => watches.detached += 1,
            },
        }
    }

    /// Removes the clause at `key` from the database.
    ///
    /// If `strict` the watches of the clause are removed immediately, otherwise the watches of a long clause are left for BCP or a sweep to drop.
    /// The clause is returned, though the premises of the clause remain in the resolution graph.
    pub fn remove(
        &mut self,
        key: ClauseKey,
        watches: &mut Watches,
        strict: bool,
    ) -> Result<DbClause, err::ClauseDBError> {
        let clause = match self.clauses.remove(key) {
            Some(clause) => clause,
            None => {
                log::error!(target: targets::CLAUSE_DB, "Remove called on a missing clause {key}");
                return Err(err::ClauseDBError::Missing);
            }
        };
        log::trace!(target: targets::CLAUSE_DB, "Removed {clause}");

        if clause.is_active() {
            Self::unwatch(&clause, watches, strict);
            self.note_removal(&clause);
        }
        Ok(clause)
    }

    /// Removes the clause at `key` from propagation, while keeping the clause as a reason or premise.
    pub fn deactivate(
        &mut self,
        key: ClauseKey,
        watches: &mut Watches,
    ) -> Result<(), err::ClauseDBError> {
        let clause = self.clauses.get_mut(key).ok_or(err::ClauseDBError::Missing)?;
        if !clause.is_active() {
            return Ok(());
        }
        clause.deactivate();
        log::trace!(target: targets::CLAUSE_DB, "Deactivated {key}");

        let clause = self.clauses.get(key).ok_or(err::ClauseDBError::Missing)?;
        Self::unwatch(clause, watches, false);
        let (learnt, len) = (clause.source().is_learnt(), clause.len());
        match learnt {
            true => {
                self.learnt_count -= 1;
                self.learnt_literals -= len;
            }
            false => {
                self.original_count -= 1;
                self.original_literals -= len;
            }
        }
        Ok(())
    }

    /// Drops keys to removed or inactive clauses from the lists of original and learnt keys.
    pub fn compact_keys(&mut self) {
        let clauses = &self.clauses;
        self.original
            .retain(|key| clauses.get(*key).is_some_and(|clause| clause.is_active()));
        self.learnt
            .retain(|key| clauses.get(*key).is_some_and(|clause| clause.is_active()));
    }

    /// Whether enough clauses have been detached to warrant a sweep of the watch lists.
    pub fn sweep_due(&self, watches: &Watches) -> bool {
        watches.detached as f64
            > (self.original_count + self.learnt_count) as f64 * self.config.garbage_frac.value
    }

    /// Drops stale watches from every watch list.
    pub fn sweep_watches(&mut self, watches: &mut Watches) {
        self.compact_keys();
        let clauses = &self.clauses;
        watches.sweep(|key| clauses.get(key).is_some_and(|clause| clause.is_active()));
    }
}
