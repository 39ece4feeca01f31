/*!
Valuations, partial functions from atoms to truth values.

The canonical valuation is a vector indexed by atoms.
*/

use crate::structures::{
    atom::Atom,
    literal::{CLiteral, Literal},
};

/// The canonical representation of a valuation.
pub type CValuation = Vec<Option<bool>>;

/// Methods common to a representation of a valuation.
pub trait Valuation {
    /// The value of `atom`, if any.
    fn value_of(&self, atom: Atom) -> Option<bool>;

    /// The number of atoms in the domain of the valuation, valued or not.
    fn atom_count(&self) -> usize;

    /// The value of `literal`, if its atom has a value.
    fn literal_value(&self, literal: CLiteral) -> Option<bool> {
        self.value_of(literal.atom())
            .map(|value| value == literal.polarity())
    }

    /// The atoms without a value.
    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom>;

    /// The literals true on the valuation, in order of atom.
    fn true_literals(&self) -> impl Iterator<Item = CLiteral>;
}

impl Valuation for [Option<bool>] {
    fn value_of(&self, atom: Atom) -> Option<bool> {
        self.get(atom as usize).copied().flatten()
    }

    fn atom_count(&self) -> usize {
        self.len()
    }

    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> {
        self.iter()
            .enumerate()
            .filter(|(_, value)| value.is_none())
            .map(|(atom, _)| atom as Atom)
    }

    fn true_literals(&self) -> impl Iterator<Item = CLiteral> {
        self.iter()
            .enumerate()
            .filter_map(|(atom, value)| value.map(|v| CLiteral::new(atom as Atom, v)))
    }
}

impl Valuation for CValuation {
    fn value_of(&self, atom: Atom) -> Option<bool> {
        self.as_slice().value_of(atom)
    }

    fn atom_count(&self) -> usize {
        self.len()
    }

    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> {
        self.as_slice().unvalued_atoms()
    }

    fn true_literals(&self) -> impl Iterator<Item = CLiteral> {
        self.as_slice().true_literals()
    }
}
