/*!
Literals, an atom paired with a polarity.

The canonical literal, [CLiteral], packs the pair into a single u32: the atom shifted left by one, with the low bit set for negative polarity.
So, the two literals of an atom are adjacent integers, and [index](Literal::index) is suitable for indexing watch lists.

```rust
# use otter_smt::structures::literal::{CLiteral, Literal};
let p = CLiteral::new(3, true);
let not_p = -p;

assert_eq!(not_p.atom(), 3);
assert!(!not_p.polarity());
assert_eq!(p.index() + 1, not_p.index());
assert_eq!(format!("{not_p}"), "-3");
```
*/

use crate::structures::atom::Atom;

/// Methods common to a representation of a literal.
pub trait Literal: std::cmp::Ord + std::hash::Hash {
    /// A fresh literal, specified by pairing an atom with a boolean.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;

    /// A small integer unique to the literal, suitable for indexing.
    fn index(&self) -> usize;

    /// The literal in its integer form, with sign indicating polarity.
    fn as_int(&self) -> isize;
}

/// The canonical representation of a literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CLiteral {
    code: u32,
}

impl Literal for CLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        CLiteral {
            code: (atom << 1) | (!polarity as u32),
        }
    }

    fn negate(&self) -> Self {
        CLiteral {
            code: self.code ^ 1,
        }
    }

    fn atom(&self) -> Atom {
        self.code >> 1
    }

    fn polarity(&self) -> bool {
        self.code & 1 == 0
    }

    fn index(&self) -> usize {
        self.code as usize
    }

    fn as_int(&self) -> isize {
        match self.polarity() {
            true => self.atom() as isize,
            false => -(self.atom() as isize),
        }
    }
}

impl std::ops::Neg for CLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for CLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_int())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_is_an_involution() {
        for atom in [0, 1, 7, 4096] {
            for polarity in [true, false] {
                let literal = CLiteral::new(atom, polarity);
                assert_eq!(literal.negate().negate(), literal);
                assert_ne!(literal.negate(), literal);
                assert_eq!(literal.negate().atom(), atom);
                assert_eq!(literal.negate().polarity(), !polarity);
            }
        }
    }

    #[test]
    fn ordering_groups_atoms() {
        let mut literals = vec![
            CLiteral::new(2, false),
            CLiteral::new(1, true),
            CLiteral::new(2, true),
            CLiteral::new(1, false),
        ];
        literals.sort();
        let ints = literals.iter().map(|l| l.as_int()).collect::<Vec<_>>();
        assert_eq!(ints, vec![1, -1, 2, -2]);
    }
}
