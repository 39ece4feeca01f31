/*!
A clause together with some metadata, as stored in the [clause database](crate::db::clause::ClauseDB).

# Watched literals

The approach to watched literals follows [Optimal implementation of watched literals and more general techniques](https://www.jair.org/index.php/jair/article/view/10839).

In short:
- The clause is stored using a mutable, indexable data structure, here a vector.
- A watched literal 'watch A' is kept at the first index.
- A watched literal 'watch B' is identified by a mutable index, `watch_ptr`.
- An update to the watched literals is called when one of the watched literals becomes false.
- When doing so, watch A is updated to be the *other* watched literal.
- And, after doing so the index to watch B makes a circular sweep forward over the clause (skipping watch A) in search of a new watch candidate.
  The index is updated if some candidate is found, and remains unchanged otherwise.

So, there are two key invariants:
1. The first literal and the literal at the index of watch_ptr are watch candidates, if any exist.
2. If no candidate for watch B is found, the clause is either satisfied by, asserts, or conflicts on the first literal.
*/

use crate::{
    config::Activity,
    db::{atom::AtomDB, keys::ClauseKey, watches::Watches},
    structures::{
        atom::Atom,
        clause::{CClause, Clause, ClauseSource},
        literal::{CLiteral, Literal},
    },
};

/// A clause with metadata.
pub struct DbClause {
    key: ClauseKey,

    clause: CClause,

    source: ClauseSource,

    /// Whether the clause takes part in propagation.
    ///
    /// An inactive clause is kept only as a reason or premise of some other clause.
    active: bool,

    /// The index of watch B.
    watch_ptr: usize,

    /// The activity of the clause, relevant only to learnt clauses.
    pub activity: Activity,
}

/// The result of an update to the watched literals of a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchUpdate {
    /// Watch B moved to the given literal.
    Moved(CLiteral),

    /// No candidate for watch B was found.
    /// After the update, the first literal is the only literal of interest.
    Unmoved,
}

impl DbClause {
    pub(super) fn new(key: ClauseKey, clause: CClause, source: ClauseSource) -> Self {
        DbClause {
            key,
            clause,
            source,
            active: true,
            watch_ptr: 1,
            activity: 0.0,
        }
    }

    pub fn key(&self) -> ClauseKey {
        self.key
    }

    pub fn source(&self) -> ClauseSource {
        self.source
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(super) fn deactivate(&mut self) {
        self.active = false;
    }

    /// The literals of the clause, in the current order.
    pub fn literals_slice(&self) -> &[CLiteral] {
        &self.clause
    }

    /// The currently watched literals, if the clause is watched.
    pub fn watched(&self) -> Option<(CLiteral, CLiteral)> {
        match self.clause.len() {
            0 | 1 => None,
            _ => Some((self.clause[0], self.clause[self.watch_ptr])),
        }
    }

    /// The first literal of the clause, which is watch A.
    pub fn first(&self) -> Option<CLiteral> {
        self.clause.first().copied()
    }

    /// Orders the literals of the clause so the two best watch candidates are at indices 0 and 1.
    ///
    /// A true literal is preferred to a literal without a value, which is preferred to a false literal.
    /// Ties between true or false literals are broken by preferring higher levels.
    pub(super) fn order_watch_candidates(&mut self, atom_db: &AtomDB) {
        let rank = |literal: &CLiteral| -> (u8, u32) {
            match atom_db.literal_value(*literal) {
                Some(true) => (2, atom_db.level_of(literal.atom()).unwrap_or(0)),
                None => (1, 0),
                Some(false) => (0, atom_db.level_of(literal.atom()).unwrap_or(0)),
            }
        };

        for position in 0..std::cmp::min(2, self.clause.len()) {
            let mut best = position;
            for index in position + 1..self.clause.len() {
                if rank(&self.clause[index]) > rank(&self.clause[best]) {
                    best = index;
                }
            }
            self.clause.swap(position, best);
        }
        self.watch_ptr = 1;
    }

    /// On the assumption the literal of `atom` is a watched literal which is now false, updates the watched literals.
    ///
    /// If watch B moves, the clause is noted as watching the new literal.
    /// The watch of the false literal is left for the caller to remove.
    pub fn update_watch(
        &mut self,
        atom: Atom,
        atom_db: &AtomDB,
        watches: &mut Watches,
    ) -> WatchUpdate {
        if self.clause[0].atom() == atom {
            self.clause.swap(0, self.watch_ptr);
        }

        let watch_ptr_cache = self.watch_ptr;
        let clause_length = self.clause.len();
        loop {
            self.watch_ptr += 1;
            if self.watch_ptr == clause_length {
                self.watch_ptr = 1 // skip 0
            }
            if self.watch_ptr == watch_ptr_cache {
                break WatchUpdate::Unmoved;
            }

            let literal = self.clause[self.watch_ptr];
            match atom_db.literal_value(literal) {
                Some(false) => {}
                None | Some(true) => {
                    watches.watch_long(literal, self.key);
                    break WatchUpdate::Moved(literal);
                }
            }
        }
    }

    /// Whether the clause is satisfied on the current valuation.
    pub fn is_satisfied(&self, atom_db: &AtomDB) -> bool {
        self.clause
            .iter()
            .any(|literal| atom_db.literal_value(*literal) == Some(true))
    }
}

impl Clause for DbClause {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.clause.iter()
    }

    fn size(&self) -> usize {
        self.clause.len()
    }

    fn canonical(self) -> CClause {
        self.clause
    }
}

impl std::ops::Deref for DbClause {
    type Target = [CLiteral];

    fn deref(&self) -> &Self::Target {
        &self.clause
    }
}

impl std::fmt::Display for DbClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.key, self.clause.as_dimacs(false))
    }
}
