/*!
Theory variables, and the sorts they range over.

A theory variable is an index into the [constraint pool](crate::theory::pool), which holds the name and sort of the variable.
Variables are interned by name, so two references to the same name in a context are the same variable.

```rust
# use otter_smt::theory::Sort;
# use std::str::FromStr;
assert_eq!(Sort::from_str("Int"), Ok(Sort::Int));
assert!(Sort::from_str("Bool").is_err());
```
*/

use crate::types::err;

/// A theory variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(u32);

impl Variable {
    pub(crate) fn from_index(index: usize) -> Self {
        Variable(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Variable {
    fn from(index: u32) -> Self {
        Variable(index)
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// The domain of a theory variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sort {
    Real,
    Int,
}

impl std::fmt::Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real => write!(f, "Real"),
            Self::Int => write!(f, "Int"),
        }
    }
}

impl std::str::FromStr for Sort {
    type Err = err::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Real" | "real" => Ok(Self::Real),
            "Int" | "int" => Ok(Self::Int),
            _ => Err(err::ParseError::Sort(s.to_string())),
        }
    }
}
