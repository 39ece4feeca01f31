/*!
The constraint pool, interning theory variables and constraints for a context.

Variables are interned by name, and constraints by structure (normalized polynomial and relation).
So, two structurally equal constraints share a [ConstraintKey], and keys may be compared in place of constraints.

The pool belongs to a single context, and nothing in the pool is removed while the context lives.

```rust
# use otter_smt::theory::{Constraint, ConstraintPool, Polynomial, Relation, Sort};
let mut pool = ConstraintPool::default();
let x = pool.variable("x", Sort::Real);
assert_eq!(pool.variable("x", Sort::Real), x);

let a = pool.intern(Constraint::new(Polynomial::variable(x), Relation::Leq));
let b = pool.intern(Constraint::new(Polynomial::variable(x), Relation::Leq));
assert_eq!(a, b);
assert_eq!(pool.constraint_count(), 1);
```
*/

use std::collections::HashMap;

use crate::theory::{Constraint, Sort, Variable};

/// A key to a constraint interned in a [ConstraintPool].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintKey(u32);

impl ConstraintKey {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ConstraintKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "k{}", self.0)
    }
}

#[derive(Default)]
pub struct ConstraintPool {
    variables: Vec<(String, Sort)>,
    variable_names: HashMap<String, Variable>,

    constraints: Vec<Constraint>,
    constraint_keys: HashMap<Constraint, ConstraintKey>,
}

impl ConstraintPool {
    /// The variable named `name`, created with `sort` if no such variable exists.
    ///
    /// The sort of an existing variable is unchanged.
    pub fn variable(&mut self, name: &str, sort: Sort) -> Variable {
        if let Some(variable) = self.variable_names.get(name) {
            return *variable;
        }
        let variable = Variable::from_index(self.variables.len());
        self.variables.push((name.to_string(), sort));
        self.variable_names.insert(name.to_string(), variable);
        variable
    }

    /// The variable named `name`, if it exists.
    pub fn find_variable(&self, name: &str) -> Option<Variable> {
        self.variable_names.get(name).copied()
    }

    pub fn name_of(&self, variable: Variable) -> Option<&str> {
        self.variables
            .get(variable.index())
            .map(|(name, _)| name.as_str())
    }

    /// The sort of `variable`, with variables unknown to the pool taken to be real.
    pub fn sort_of(&self, variable: Variable) -> Sort {
        self.variables
            .get(variable.index())
            .map(|(_, sort)| *sort)
            .unwrap_or(Sort::Real)
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// The key of `constraint`, interning the constraint if required.
    ///
    /// The constraint is interned as given, and so is expected to be in normal form.
    pub fn intern(&mut self, constraint: Constraint) -> ConstraintKey {
        if let Some(key) = self.constraint_keys.get(&constraint) {
            return *key;
        }
        let key = ConstraintKey(self.constraints.len() as u32);
        self.constraints.push(constraint.clone());
        self.constraint_keys.insert(constraint, key);
        key
    }

    /// The key of `constraint`, if interned.
    pub fn key_of(&self, constraint: &Constraint) -> Option<ConstraintKey> {
        self.constraint_keys.get(constraint).copied()
    }

    pub fn constraint(&self, key: ConstraintKey) -> Option<&Constraint> {
        self.constraints.get(key.index())
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Drops every variable and constraint.
    pub fn clear(&mut self) {
        self.variables.clear();
        self.variable_names.clear();
        self.constraints.clear();
        self.constraint_keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{Polynomial, Relation};

    #[test]
    fn variables_keep_their_first_sort() {
        let mut pool = ConstraintPool::default();
        let n = pool.variable("n", Sort::Int);
        assert_eq!(pool.variable("n", Sort::Real), n);
        assert_eq!(pool.sort_of(n), Sort::Int);
        assert_eq!(pool.name_of(n), Some("n"));
        assert_eq!(pool.find_variable("m"), None);
    }

    #[test]
    fn distinct_constraints_distinct_keys() {
        let mut pool = ConstraintPool::default();
        let x = Polynomial::variable(pool.variable("x", Sort::Real));
        let a = pool.intern(Constraint::new(x.clone(), Relation::Leq));
        let b = pool.intern(Constraint::new(x.clone(), Relation::Less));
        assert_ne!(a, b);
        assert_eq!(pool.key_of(&Constraint::new(x, Relation::Less)), Some(b));
        assert_eq!(pool.constraint(a).map(|c| c.relation()), Some(Relation::Leq));

        pool.clear();
        assert_eq!(pool.constraint_count(), 0);
    }
}
