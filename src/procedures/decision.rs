/*!
Methods for choosing the value of an atom.

# Overview

The core decision procedure is straightforward:
- Find an atom which is eligible for decisions and is not assigned a value, and assign either true or false.

# Decisions as literals

Strictly a decision is to value some atom *a* with value *v*.
Still, it is convenient to represent such a decision as a literal with atom *a* and polarity *v*.
For example, a decision to value *p* with value *false* can be represented with the literal *-p*.

# Heuristics

## Activity

Atoms are selected by activity, and the [atom database](crate::db::atom) stores atoms without a value on a max activity heap in order to support quick access to the most active atom without a value.
Though, as the heap may hold atoms which have been valued since they were placed on the heap, it may take some work to find the relevant atom.

```rust,ignore
while let Some(atom) = self.atom_db.heap_pop_most_active() {
    if self.atom_db.value_of(atom).is_none() {
        return Some(atom);
    }
}
```

## Phase saving

An atom is valued with its previous value, which is either the value saved on some backjump or an initial value.
Initial values are drawn with [Config::polarity_lean](crate::config::Config::polarity_lean).

## Randomness

With probability [random_decision_bias](crate::config::Config::random_decision_bias) the atom is chosen at random from the atoms without a value, rather than by activity.
*/

use rand::seq::IteratorRandom;

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets,
    structures::{
        atom::Atom,
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
        valuation::Valuation,
    },
    types::err::{self},
};

/// Possible 'Ok' results from choosing a truth value to assign an atom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionOk {
    /// Some truth value was assigned to some atom.
    Literal(CLiteral),

    /// All atoms eligible for decisions had already been assigned truth values, so no decision could be made.
    Exhausted,
}

/// Methods related to making decisions.
impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Chooses an atom without a value and makes a decision on the atom, opening a new level.
    ///
    /// ```rust, ignore
    /// match self.make_decision()? {
    ///     DecisionOk::Literal(_) => continue,
    ///     DecisionOk::Exhausted => break,
    /// }
    /// ```
    pub fn make_decision(&mut self) -> Result<DecisionOk, err::ErrorKind> {
        match self.atom_without_value() {
            Some(atom) => {
                let decision = CLiteral::new(atom, self.atom_db.previous_value_of(atom));
                self.decide(decision)?;
                Ok(DecisionOk::Literal(decision))
            }

            None => Ok(DecisionOk::Exhausted),
        }
    }

    /// Returns an atom which is eligible for decisions and has no value on the current valuation, either by random choice or by most activity.
    pub fn atom_without_value(&mut self) -> Option<Atom> {
        if self.rng.random_bool(self.config.random_decision_bias.value) {
            // Takes ownership of rng to satisfy the borrow checker.
            let mut rng = std::mem::take(&mut self.rng);
            let chosen = self
                .atom_db
                .valuation()
                .unvalued_atoms()
                .filter(|atom| self.atom_db.is_decision_eligible(*atom))
                .choose(&mut rng);
            self.rng = rng;

            if chosen.is_some() {
                self.counters.random_decisions += 1;
                return chosen;
            }
        }

        while let Some(atom) = self.atom_db.heap_pop_most_active() {
            if self.atom_db.value_of(atom).is_none() && self.atom_db.is_decision_eligible(atom) {
                return Some(atom);
            }
        }
        None
    }

    /// Makes a decision on the atom of `literal`, valuing the atom with the polarity of the literal on a new level.
    ///
    /// The atom must not have a value.
    pub fn decide(&mut self, literal: CLiteral) -> Result<(), err::ErrorKind> {
        self.check_atom(literal)?;
        if self.atom_db.value_of(literal.atom()).is_some() {
            log::warn!(target: targets::DECISION, "Decision on valued {literal}");
            return Err(err::ErrorKind::InvalidState);
        }

        self.trail.push_level();
        self.record_assignment(literal, AssignmentSource::Decision);
        self.counters.total_decisions += 1;
        log::trace!(target: targets::DECISION, "Decision {literal} at {}", self.trail.level());
        Ok(())
    }

    /// Resets all decisions and consequences of those choices.
    ///
    /// In other words, backjumps to before any decision was made.
    pub fn clear_decisions(&mut self) -> Result<(), err::ErrorKind> {
        self.backjump(0)?;
        self.state = ContextState::Input;
        Ok(())
    }
}
