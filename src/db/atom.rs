/*!
A database of 'atom related' things, accessed via fields on an [AtomDB] struct.

Things include:
- A current (often partial) [valuation](crate::structures::valuation).
- The decision level on which each valued atom was valued, and the [source](AssignmentSource) of the value.
- The previous value of each atom (or some initial value), for phase saving.
- Whether an atom may be chosen when making a decision.
- An [IndexHeap] recording the activty of atoms.
  Every atom without a value which is eligible for decisions is 'active' on the heap, though some atoms with a value may also be active.

The atom database does not record the order in which atoms are valued, that is the [trail](crate::db::trail).
*/

use crate::{
    config::{dbs::AtomDBConfig, Activity, Config},
    db::LevelIndex,
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::{
        atom::{Atom, ATOM_MAX},
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
        valuation::{CValuation, Valuation},
    },
    types::err::{self},
};

/// The atom database.
pub struct AtomDB {
    /// A current (often partial) valuation.
    valuation: CValuation,

    /// The previous value of each atom (or some initial value).
    previous_valuation: Vec<bool>,

    /// The level on which an atom was valued.
    levels: Vec<Option<LevelIndex>>,

    /// The source of the value of an atom.
    reasons: Vec<AssignmentSource>,

    /// Whether an atom may be chosen as a decision.
    decision_eligible: Vec<bool>,

    /// An [IndexHeap] recording the activty of atoms.
    activity_heap: IndexHeap<Activity>,

    /// A local configuration, derived from the configuration of a context.
    ///
    /// The bump is revised during a solve.
    pub config: AtomDBConfig,
}

/// The status of the valuation of an atom, relative to some literal.
#[derive(Debug, PartialEq, Eq)]
pub enum AtomValue {
    /// The atom had no value.
    NotSet,

    /// The value of the atom is the polarity of the literal.
    Same,

    /// The value of the atom is the negation of the polarity of the literal.
    Different,
}

impl AtomDB {
    pub fn new(config: &Config) -> Self {
        AtomDB {
            valuation: CValuation::default(),
            previous_valuation: Vec::default(),
            levels: Vec::default(),
            reasons: Vec::default(),
            decision_eligible: Vec::default(),
            activity_heap: IndexHeap::default(),
            config: config.atom_db.clone(),
        }
    }

    /// A fresh atom, without a value, eligible for decisions.
    pub fn fresh_atom(
        &mut self,
        previous_value: bool,
        activity: Activity,
    ) -> Result<Atom, err::AtomDBError> {
        let atom = self.valuation.len();
        if atom as u64 > ATOM_MAX as u64 {
            log::error!(target: targets::VALUATION, "Atoms exhausted at {atom}");
            return Err(err::AtomDBError::AtomsExhausted);
        }
        let atom = atom as Atom;

        self.valuation.push(None);
        self.previous_valuation.push(previous_value);
        self.levels.push(None);
        self.reasons.push(AssignmentSource::None);
        self.decision_eligible.push(true);

        self.activity_heap.add(atom as usize, activity);
        self.activity_heap.activate(atom as usize);

        Ok(atom)
    }

    /// A count of atoms in the database.
    pub fn count(&self) -> usize {
        self.valuation.len()
    }

    /// The current valuation.
    pub fn valuation(&self) -> &CValuation {
        &self.valuation
    }

    /// The value of `atom`, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation.value_of(atom)
    }

    /// The value of `literal`, if its atom has a value.
    pub fn literal_value(&self, literal: CLiteral) -> Option<bool> {
        self.valuation.literal_value(literal)
    }

    /// The level on which `atom` was valued, if valued.
    pub fn level_of(&self, atom: Atom) -> Option<LevelIndex> {
        self.levels[atom as usize]
    }

    /// The source of the value of `atom`.
    pub fn reason_of(&self, atom: Atom) -> AssignmentSource {
        self.reasons[atom as usize]
    }

    /// The previous value of `atom`, or its initial value.
    pub fn previous_value_of(&self, atom: Atom) -> bool {
        self.previous_valuation[atom as usize]
    }

    /// Values the atom of `literal` with the polarity of `literal`, if the atom has no value.
    ///
    /// The status of the atom prior to the call is returned, and the atom is only valued if the status is [NotSet](AtomValue::NotSet).
    pub fn assign(
        &mut self,
        literal: CLiteral,
        level: LevelIndex,
        source: AssignmentSource,
    ) -> AtomValue {
        let atom = literal.atom() as usize;
        match self.valuation[atom] {
            Some(value) if value == literal.polarity() => AtomValue::Same,
            Some(_) => AtomValue::Different,
            None => {
                log::trace!(target: targets::VALUATION, "{literal} at {level}");
                self.valuation[atom] = Some(literal.polarity());
                self.levels[atom] = Some(level);
                self.reasons[atom] = source;
                AtomValue::NotSet
            }
        }
    }

    /// Clears the value of `atom`, saving the value as the previous value if `save` is set.
    ///
    /// The atom is returned to the activity heap if eligible for decisions.
    pub fn drop_value(&mut self, atom: Atom, save: bool) {
        let index = atom as usize;
        if save {
            if let Some(value) = self.valuation[index] {
                self.previous_valuation[index] = value;
            }
        }
        self.valuation[index] = None;
        self.levels[index] = None;
        self.reasons[index] = AssignmentSource::None;

        if self.decision_eligible[index] {
            self.activity_heap.activate(index);
        }
    }

    /// Sets whether `atom` may be chosen as a decision.
    pub fn set_decision_eligibility(&mut self, atom: Atom, eligible: bool) {
        let index = atom as usize;
        self.decision_eligible[index] = eligible;
        match eligible {
            true => {
                if self.valuation[index].is_none() {
                    self.activity_heap.activate(index);
                }
            }
            false => {
                self.activity_heap.remove(index);
            }
        }
    }

    /// Whether `atom` may be chosen as a decision.
    pub fn is_decision_eligible(&self, atom: Atom) -> bool {
        self.decision_eligible[atom as usize]
    }
}

/// Methods for inspecting and mutating the activity of atoms.
///
/// The role of these methods is tied to the use of [VSIDS](crate::config::vsids).
impl AtomDB {
    /// The acitivty of an atom, regardless of whether it is on the activity heap.
    pub fn activity_of(&self, atom: Atom) -> Activity {
        *self.activity_heap.value_at(atom as usize)
    }

    /// Bumps the activity of an atom and updates its position on the activity heap, if the atom is on the activity heap.
    ///
    /// If the bumped activity would be greater than the maximum allowed activity, the activity of every atom is rescored.
    pub fn bump_activity(&mut self, atom: Atom) {
        let bumped = self.activity_of(atom) + self.config.bump.value;
        self.activity_heap.revalue(atom as usize, bumped);
        if bumped > self.config.bump.max {
            self.rescore_activity();
        }
        self.activity_heap.heapify_if_active(atom as usize);
    }

    /// Bumps the activity of each atom in the given iterator.
    pub fn bump_relative(&mut self, atoms: impl Iterator<Item = Atom>) {
        for atom in atoms {
            self.bump_activity(atom);
        }
    }

    /// Increase the activity bump applied to atoms, which has the effect of decaying the activity of all atoms.
    pub fn decay_activity(&mut self) {
        self.config.bump.value /= self.config.decay.value;
    }

    /// Scales the activity of all atoms and the activity bump down, preserving order.
    pub fn rescore_activity(&mut self) {
        let factor = 1.0 / self.config.bump.max;
        log::debug!(target: targets::VALUATION, "Activity rescore by {factor}");
        self.activity_heap.apply_to_all(|v| v * factor);
        self.config.bump.value *= factor;
    }

    /// Pops the most active atom from the activity heap.
    pub fn heap_pop_most_active(&mut self) -> Option<Atom> {
        self.activity_heap.pop_max().map(|index| index as Atom)
    }

    /// A count of atoms on the activity heap.
    pub fn heap_count(&self) -> usize {
        self.activity_heap.active_count()
    }
}
