/*!
A context method to aid boolean constraint propagation

See [GenericContext::bcp] for the relevant context method.

# Overview
Propagates an atom being assigned some value, given as a literal.

This is done by examining clauses watching the atom with the opposite polarity and updating the watches of the clause, if possible, queuing the consequence of the asserting clause, or identifying the clause conflicts with the current valuation.

# Complications

The list of long watches of interest is taken from the watch database for the duration of the call, and returned afterwards.
This avoids a mutable borrow of the watch database for the list conflicting with a mutable borrow to update the watches of a clause.

The taken list is never the target of an update.
For, the literal bcp is called on has been given some value, and the list taken is for the literal with the opposite value.
And, that literal is not a candidate for a watch, as it is false on the current valuation.

# Heuristics

Propagation happens in two steps, distinguished by clauses length:
- First, with respect to binary clauses.
- Second, with respect to long clauses.

Binary clauses never revise their watches, and record the *other* literal alongside the watch, so require no access to the clause database.

Before a long clause is updated, the other watched literal is checked.
If the other watch is true, the clause is satisfied and the watch is kept as is.

# Example

bcp is a mutating method, and a typical application will match against the result of the mutation.
For example, a conflict may lead to conflict analysis and no conflict may lead to a decision being made.

```rust,ignore
match self.propagate() {
    Err(err::BCPError::Conflict(key)) => {
        if self.trail.decision_is_made() {
            self.resolve_conflict(key)?;
            ...
        }
    }
    ...
    Ok(()) => {
        match self.make_decision() {
            ...
        }
    }
}
```
*/

use crate::{
    context::GenericContext,
    db::{atom::AtomValue, clause::db_clause::WatchUpdate},
    misc::log::targets::{self},
    structures::{
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// For documentation see [procedures::bcp](crate::procedures::bcp).
    ///
    /// # Soundness
    /// The implementation of BCP requires the literal at index 0 of a long clause is a watched literal.
    pub fn bcp(&mut self, literal: CLiteral) -> Result<(), err::BCPError> {
        let level = self.trail.level();

        // Binary clause block.
        for watch in self.watches.binary_watchers(literal) {
            match self
                .atom_db
                .assign(watch.literal, level, AssignmentSource::Clause(watch.key))
            {
                AtomValue::NotSet => self.trail.store_assignment(watch.literal),

                AtomValue::Same => {}

                AtomValue::Different => {
                    log::trace!(target: targets::PROPAGATION, "Consequence of {} and {literal} is contradiction.", watch.key);
                    return Err(err::BCPError::Conflict(watch.key));
                }
            }
        }

        // Long clause block.
        let mut list = self.watches.take_long_watchers(literal);
        let mut result = Ok(());
        let mut index = 0;

        'long_loop: while index < list.len() {
            let key = list[index].key;

            let db_clause = match self.clause_db.get_mut(key) {
                Ok(stored) if stored.is_active() => stored,
                _ => {
                    list.swap_remove(index);
                    continue 'long_loop;
                }
            };

            let Some((a, b)) = db_clause.watched() else {
                log::error!(target: targets::PROPAGATION, "Long watch on {key} without watched literals.");
                result = Err(err::BCPError::CorruptWatch);
                break 'long_loop;
            };
            let other = match a.atom() == literal.atom() {
                true => b,
                false => a,
            };
            if self.atom_db.literal_value(other) == Some(true) {
                index += 1;
                continue 'long_loop;
            }

            match db_clause.update_watch(literal.atom(), &self.atom_db, &mut self.watches) {
                WatchUpdate::Moved(_) => {
                    list.swap_remove(index);
                    continue 'long_loop;
                }

                WatchUpdate::Unmoved => {
                    // After the call to update_watch, the only literal which may not be false is in position 0.
                    let watch = db_clause[0];

                    match self
                        .atom_db
                        .assign(watch, level, AssignmentSource::Clause(key))
                    {
                        AtomValue::NotSet => self.trail.store_assignment(watch),

                        AtomValue::Same => {}

                        AtomValue::Different => {
                            log::trace!(target: targets::PROPAGATION, "Conflict on {key} from {literal}.");
                            result = Err(err::BCPError::Conflict(key));
                            break 'long_loop;
                        }
                    }
                }
            }

            index += 1;
        }

        self.watches.restore_long_watchers(literal, list);
        result
    }

    /// Propagates literals in the queue until the queue is exhausted or a conflict is found.
    ///
    /// In the case of conflict the queue is exhausted regardless, as the literals queued will be cleared or revisited on backjump.
    pub fn propagate(&mut self) -> Result<(), err::BCPError> {
        while let Some(literal) = self.trail.next_unpropagated() {
            self.counters.propagations += 1;
            self.clause_db.simp_db_props -= 1;

            if let Err(e) = self.bcp(literal) {
                self.trail.exhaust_queue();
                return Err(e);
            }
        }
        Ok(())
    }
}
