/*!
Clauses, disjunctions of literals.

The canonical clause is a vector of [literals](crate::structures::literal::CLiteral).
A single literal is also a clause, which is convenient when adding unit clauses to a context.

```rust
# use otter_smt::structures::clause::{CClause, Clause};
# use otter_smt::structures::literal::{CLiteral, Literal};
let p = CLiteral::new(1, true);
let q = CLiteral::new(2, false);
let clause: CClause = vec![p, q];

assert_eq!(clause.size(), 2);
assert_eq!(clause.as_dimacs(true), "1 -2 0");
assert_eq!(p.canonical(), vec![p]);
```
*/

use crate::structures::{
    atom::Atom,
    literal::{CLiteral, Literal},
};

/// The canonical representation of a clause.
pub type CClause = Vec<CLiteral>;

/// Methods common to a representation of a clause.
pub trait Clause {
    /// The literals of the clause, in order.
    fn literals(&self) -> impl Iterator<Item = &CLiteral>;

    /// The number of literals in the clause.
    fn size(&self) -> usize;

    /// The atoms of the clause, in the order of the literals.
    fn atoms(&self) -> impl Iterator<Item = Atom> {
        self.literals().map(|literal| literal.atom())
    }

    /// The clause as a string of integers, terminated by zero if `zero` is set.
    fn as_dimacs(&self, zero: bool) -> String {
        let mut dimacs = self
            .literals()
            .map(|literal| literal.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        if zero {
            if !dimacs.is_empty() {
                dimacs.push(' ');
            }
            dimacs.push('0');
        }
        dimacs
    }

    /// The clause in its canonical form.
    fn canonical(self) -> CClause;
}

impl Clause for CClause {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn canonical(self) -> CClause {
        self
    }
}

impl Clause for CLiteral {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        std::iter::once(self)
    }

    fn size(&self) -> usize {
        1
    }

    fn canonical(self) -> CClause {
        vec![self]
    }
}

/// The source of a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseSource {
    /// A clause added to the context as part of a formula.
    Original,

    /// A clause derived via resolution during conflict analysis.
    Resolution,

    /// A clause synthesized from the explanation of a theory backend.
    Theory,
}

impl ClauseSource {
    /// Whether clauses from the source count towards the learnt clause budget.
    pub fn is_learnt(&self) -> bool {
        !matches!(self, Self::Original)
    }
}

impl std::fmt::Display for ClauseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original => write!(f, "Original"),
            Self::Resolution => write!(f, "Resolution"),
            Self::Theory => write!(f, "Theory"),
        }
    }
}
