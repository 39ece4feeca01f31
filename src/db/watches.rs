/*!
Watch lists, recording which clauses watch which literals.

# Theory

A core part of a solve is [Boolean Constraint Propagation](crate::procedures::bcp).
In short, BCP is the observation that some literal in a clause must be true due to all other literals in the clause being false.

BCP only applies when exactly one literal has no value and all other literals conflict with the valuation.
So, it is enough for a clause to watch two literals which do not conflict with the valuation, if possible, and to revise the watches only when a watched literal becomes false.

# Implementation

Each atom has a [WatchDB], split in two ways:

1. Between binary clauses and other (long) clauses.
   A binary clause never revises its watches, and so the *other* literal is recorded with the watch to avoid a trip to the clause database.
2. Between the polarity of the watched literal.

A unit clause, or an empty clause, never watches any literal.

Long watches are removed lazily.
When a long clause is removed from the clause database its watches may remain, and are dropped by BCP when the key fails to resolve, or by a [sweep](Watches::sweep) of every list.
A count of clauses with stale watches is kept to help decide when a sweep is worthwhile.
*/

use crate::{
    db::ClauseKey,
    structures::literal::{CLiteral, Literal},
};

/// A binary clause together with the *other* literal in the clause.
#[derive(Clone, Copy, Debug)]
pub struct BinaryWatch {
    pub literal: CLiteral,
    pub key: ClauseKey,
}

impl BinaryWatch {
    pub fn new(literal: CLiteral, key: ClauseKey) -> Self {
        Self { literal, key }
    }
}

/// A long clause watch of a literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongWatch {
    pub key: ClauseKey,
}

impl LongWatch {
    pub fn new(key: ClauseKey) -> Self {
        LongWatch { key }
    }
}

/// The watches of an atom, by polarity and by kind of clause.
#[derive(Default)]
pub struct WatchDB {
    positive_binary: Vec<BinaryWatch>,
    negative_binary: Vec<BinaryWatch>,
    positive_long: Vec<LongWatch>,
    negative_long: Vec<LongWatch>,
}

#[derive(Default)]
pub struct Watches {
    dbs: Vec<WatchDB>,

    /// A count of long clauses removed since the last sweep, whose watches may remain.
    pub detached: usize,
}

impl Watches {
    /// Adds a [WatchDB] for a fresh atom.
    pub fn grow(&mut self) {
        self.dbs.push(WatchDB::default());
    }

    fn binary_list_mut(&mut self, literal: CLiteral) -> &mut Vec<BinaryWatch> {
        let db = &mut self.dbs[literal.atom() as usize];
        match literal.polarity() {
            true => &mut db.positive_binary,
            false => &mut db.negative_binary,
        }
    }

    fn long_list_mut(&mut self, literal: CLiteral) -> &mut Vec<LongWatch> {
        let db = &mut self.dbs[literal.atom() as usize];
        match literal.polarity() {
            true => &mut db.positive_long,
            false => &mut db.negative_long,
        }
    }

    /// Notes `literal` is watched by the binary clause in `watch`.
    pub fn watch_binary(&mut self, literal: CLiteral, watch: BinaryWatch) {
        self.binary_list_mut(literal).push(watch);
    }

    /// Notes `literal` is watched by the long clause `key`.
    ///
    /// The counterpart of [unwatch_long](Watches::unwatch_long).
    pub fn watch_long(&mut self, literal: CLiteral, key: ClauseKey) {
        self.long_list_mut(literal).push(LongWatch::new(key));
    }

    /// Removes every watch of `literal` by the long clause `key`.
    ///
    /// As this shuffles the list any heuristics on traversal order of watches is void.
    pub fn unwatch_long(&mut self, literal: CLiteral, key: ClauseKey) {
        let list = self.long_list_mut(literal);
        let mut index = 0;
        while index < list.len() {
            if list[index].key == key {
                list.swap_remove(index);
            } else {
                index += 1;
            }
        }
    }

    /// Removes every watch of `literal` by the binary clause `key`.
    pub fn unwatch_binary(&mut self, literal: CLiteral, key: ClauseKey) {
        self.binary_list_mut(literal).retain(|watch| watch.key != key);
    }

    /// The binary clauses watching the negation of `literal`.
    ///
    /// That is, the binary clauses of interest when `literal` has been made true.
    pub fn binary_watchers(&self, literal: CLiteral) -> &[BinaryWatch] {
        let db = &self.dbs[literal.atom() as usize];
        match literal.polarity() {
            true => &db.negative_binary,
            false => &db.positive_binary,
        }
    }

    /// Takes the long clauses watching the negation of `literal`, leaving an empty list in place.
    ///
    /// The list is to be returned with [restore_long_watchers](Watches::restore_long_watchers).
    pub fn take_long_watchers(&mut self, literal: CLiteral) -> Vec<LongWatch> {
        std::mem::take(self.long_list_mut(literal.negate()))
    }

    /// Returns a list taken by [take_long_watchers](Watches::take_long_watchers).
    ///
    /// Any watches noted while the list was taken are kept.
    pub fn restore_long_watchers(&mut self, literal: CLiteral, mut taken: Vec<LongWatch>) {
        let list = self.long_list_mut(literal.negate());
        if !list.is_empty() {
            taken.append(list);
        }
        *list = taken;
    }

    /// Drops every watch whose key is not live.
    pub fn sweep(&mut self, is_live: impl Fn(ClauseKey) -> bool) {
        log::debug!(target: crate::misc::log::targets::CLAUSE_DB, "Sweep of watches with {} detached", self.detached);
        for db in &mut self.dbs {
            db.positive_long.retain(|watch| is_live(watch.key));
            db.negative_long.retain(|watch| is_live(watch.key));
            db.positive_binary.retain(|watch| is_live(watch.key));
            db.negative_binary.retain(|watch| is_live(watch.key));
        }
        self.detached = 0;
    }

    /// A count of long watches of `literal`.
    pub fn long_count(&self, literal: CLiteral) -> usize {
        let db = &self.dbs[literal.atom() as usize];
        match literal.polarity() {
            true => db.positive_long.len(),
            false => db.negative_long.len(),
        }
    }

    /// Whether `literal` is watched by the long clause `key`.
    pub fn is_watched_long(&self, literal: CLiteral, key: ClauseKey) -> bool {
        let db = &self.dbs[literal.atom() as usize];
        let list = match literal.polarity() {
            true => &db.positive_long,
            false => &db.negative_long,
        };
        list.iter().any(|watch| watch.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn take_and_restore() {
        let mut keys: SlotMap<ClauseKey, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());

        let mut watches = Watches::default();
        watches.grow();
        watches.grow();

        let p = CLiteral::new(1, true);
        watches.watch_long(-p, a);

        let taken = watches.take_long_watchers(p);
        assert_eq!(taken, vec![LongWatch::new(a)]);
        assert_eq!(watches.long_count(-p), 0);

        watches.watch_long(-p, b);
        watches.restore_long_watchers(p, taken);
        assert_eq!(watches.long_count(-p), 2);

        watches.unwatch_long(-p, a);
        assert!(!watches.is_watched_long(-p, a));
        assert!(watches.is_watched_long(-p, b));
    }

    #[test]
    fn sweep_drops_dead_keys() {
        let mut keys: SlotMap<ClauseKey, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());

        let mut watches = Watches::default();
        watches.grow();
        let p = CLiteral::new(0, true);
        watches.watch_long(p, a);
        watches.watch_long(p, b);
        watches.watch_binary(p, BinaryWatch::new(-p, a));
        watches.detached = 1;

        keys.remove(a);
        watches.sweep(|key| keys.contains_key(key));

        assert_eq!(watches.long_count(p), 1);
        assert!(watches.binary_watchers(-p).is_empty());
        assert_eq!(watches.detached, 0);
    }
}
