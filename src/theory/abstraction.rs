/*!
The abstraction map, between Boolean literals and interned constraints.

Each atom created for a constraint stands for a *pair* of constraints in normal form, one the negation of the other:
- The positive literal of the atom stands for the `=` or `≤` member of the pair.
- The negative literal of the atom stands for the `≠` or `<` member of the pair.

As both members are registered when the atom is created, the literal of the negation of a constraint is always the negation of the literal of the constraint.

Alongside the interned constraint, each literal records the constraint as first given (its *origin*), which is useful when reporting explanations.

The map never shrinks while a context lives.
*/

use std::collections::HashMap;

use crate::{
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
    theory::{Constraint, ConstraintKey},
};

/// The abstraction of a literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Abstraction {
    /// The interned constraint, in normal form.
    pub constraint: ConstraintKey,

    /// The constraint as first given.
    pub origin: Constraint,
}

struct Pair {
    positive: Abstraction,
    negative: Abstraction,
}

#[derive(Default)]
pub struct AbstractionMap {
    literals: HashMap<ConstraintKey, CLiteral>,
    atoms: HashMap<Atom, Pair>,
}

impl AbstractionMap {
    /// The literal standing for an interned constraint, if any.
    pub fn literal_of(&self, key: ConstraintKey) -> Option<CLiteral> {
        self.literals.get(&key).copied()
    }

    /// The abstraction of `literal`, if the atom of the literal stands for a pair of constraints.
    pub fn abstraction_of(&self, literal: CLiteral) -> Option<&Abstraction> {
        self.atoms.get(&literal.atom()).map(|pair| match literal.polarity() {
            true => &pair.positive,
            false => &pair.negative,
        })
    }

    /// The interned constraint of `literal`, if any.
    pub fn constraint_of(&self, literal: CLiteral) -> Option<ConstraintKey> {
        self.abstraction_of(literal)
            .map(|abstraction| abstraction.constraint)
    }

    /// Whether `atom` stands for a pair of constraints.
    pub fn is_abstracted(&self, atom: Atom) -> bool {
        self.atoms.contains_key(&atom)
    }

    /// Registers `atom` as standing for the given pair of constraints.
    pub fn register(&mut self, atom: Atom, positive: Abstraction, negative: Abstraction) {
        self.literals
            .insert(positive.constraint, CLiteral::new(atom, true));
        self.literals
            .insert(negative.constraint, CLiteral::new(atom, false));
        self.atoms.insert(atom, Pair { positive, negative });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{ConstraintPool, Polynomial, Relation, Sort};

    #[test]
    fn both_polarities_are_registered() {
        let mut pool = ConstraintPool::default();
        let x = Polynomial::variable(pool.variable("x", Sort::Real));

        let leq = Constraint::new(x.clone(), Relation::Leq);
        let greater = leq.clone().negate();
        let positive = pool.intern(leq.clone().normalize());
        let negative = pool.intern(greater.clone().normalize());

        let mut map = AbstractionMap::default();
        map.register(
            3,
            Abstraction { constraint: positive, origin: leq },
            Abstraction { constraint: negative, origin: greater.clone() },
        );

        let literal = map.literal_of(positive).unwrap();
        assert_eq!(literal, CLiteral::new(3, true));
        assert_eq!(map.literal_of(negative), Some(-literal));
        assert_eq!(map.constraint_of(-literal), Some(negative));
        assert_eq!(map.abstraction_of(-literal).map(|a| &a.origin), Some(&greater));
        assert!(map.is_abstracted(3));
        assert!(!map.is_abstracted(2));
    }
}
