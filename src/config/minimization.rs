use std::str::FromStr;

/// How a learnt clause is minimized after resolution.
///
/// A literal may be removed from a learnt clause if its negation is implied by the negations of the remaining literals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Minimization {
    /// Keep every literal.
    None = 0,

    /// Remove a literal if every other literal of its reason is in the clause, or fixed at level zero.
    Basic,

    /// Remove a literal if it is implied through any chain of reasons which ends in the clause, or at level zero.
    Deep,
}

impl Minimization {
    pub const MIN: Minimization = Minimization::None;
    pub const MAX: Minimization = Minimization::Deep;
}

impl std::fmt::Display for Minimization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Basic => write!(f, "Basic"),
            Self::Deep => write!(f, "Deep"),
        }
    }
}

impl FromStr for Minimization {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" | "0" => Ok(Self::None),
            "Basic" | "1" => Ok(Self::Basic),
            "Deep" | "2" => Ok(Self::Deep),
            _ => Err(()),
        }
    }
}
