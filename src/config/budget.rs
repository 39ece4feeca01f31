use std::time::Duration;

/// Limits on a solve, checked at each restart decision point.
///
/// Exceeding a limit ends a solve with an unknown result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    /// A limit on the total conflicts of a context.
    pub conflicts: Option<usize>,

    /// A limit on the total propagations of a context.
    pub propagations: Option<usize>,

    /// A limit on the time taken by a single solve.
    pub time: Option<Duration>,
}
