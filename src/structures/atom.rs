/*!
(The internal representation of) an atom, aka. a Boolean variable.

Each atom is a u32 *u* such that either *u* is 0, or *u - 1* is an atom.
So, the atoms of a context are [0..*m*) for some *m*, and atoms may be used directly as indicies.

Atoms are created on first reference to a Boolean symbol or to a theory constraint, and are never destroyed.

```rust
# use otter_smt::structures::atom::Atom;
let atoms = (0..97).collect::<Vec<Atom>>();
assert_eq!(atoms.len(), 97);
```

# Notes
- The atom `0` is fixed with a value of true from the creation of a context, and ground constraints abstract to it.
- In the SAT literature these are often called 'variables', while in the SMT literature 'atom' is often reserved for theory propositions.
  Here, a theory proposition is a [constraint](crate::theory::Constraint), and an atom is always Boolean.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The atom `0` is fixed internally with a value of true.
pub const TOP_ATOM: Atom = 0;

/// The maximum instance of an atom.
///
/// One bit is reserved for the polarity of a [literal](crate::structures::literal).
pub const ATOM_MAX: Atom = Atom::MAX >> 1;
