use std::time::Duration;

/// Counts for various things which count, roughly.
pub struct Counters {
    /// A count of every conflict analysed, across solves.
    pub total_conflicts: usize,

    /// A count of conflicts seen since the last restart.
    ///
    /// As u32 rather than a usize for easier interaction with scheduling variables.
    pub fresh_conflicts: u32,

    /// A count of all decisions made.
    pub total_decisions: usize,

    /// A count of decisions made on a randomly chosen atom.
    pub random_decisions: usize,

    /// A count of literals propagated.
    pub propagations: usize,

    /// The total number of iterations through a solve.
    pub total_iterations: usize,

    /// The number of restarts through a solve.
    pub restarts: usize,

    /// A count of full checks of a theory backend.
    pub theory_checks: usize,

    /// A count of clauses learnt from theory explanations.
    pub theory_lemmas: usize,

    /// A count of literals in learnt clauses before minimization.
    pub max_literals: usize,

    /// A count of literals in learnt clauses after minimization.
    pub tot_literals: usize,

    /// The time taken during the last solve.
    pub time: Duration,

    /// The current element in the luby sequence.
    pub luby: crate::generic::luby::Luby,
}

impl Default for Counters {
    fn default() -> Self {
        Counters {
            total_conflicts: 0,
            fresh_conflicts: 0,

            total_decisions: 0,
            random_decisions: 0,
            propagations: 0,
            total_iterations: 0,

            restarts: 0,

            theory_checks: 0,
            theory_lemmas: 0,

            max_literals: 0,
            tot_literals: 0,

            time: Duration::from_secs(0),

            luby: crate::generic::luby::Luby::default(),
        }
    }
}
