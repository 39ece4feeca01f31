use std::str::FromStr;

/// Which unassigned atoms remember their value as the polarity of a future decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PhaseSaving {
    /// Decisions always use the initial polarity of an atom.
    None = 0,

    /// Only atoms unassigned from the top level of a backjump are saved.
    Limited,

    /// Every atom unassigned during a backjump is saved.
    Full,
}

impl PhaseSaving {
    pub const MIN: PhaseSaving = PhaseSaving::None;
    pub const MAX: PhaseSaving = PhaseSaving::Full;
}

impl std::fmt::Display for PhaseSaving {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Limited => write!(f, "Limited"),
            Self::Full => write!(f, "Full"),
        }
    }
}

impl FromStr for PhaseSaving {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" | "0" => Ok(Self::None),
            "Limited" | "1" => Ok(Self::Limited),
            "Full" | "2" => Ok(Self::Full),
            _ => Err(()),
        }
    }
}
