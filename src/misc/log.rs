/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, always with one of the [targets] below.
No log implementation is provided; for more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [BCP](crate::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [analysis](crate::procedures::analysis)
    pub const ANALYSIS: &str = "analysis";

    /// Logs related to [minimization](crate::procedures::minimization)
    pub const MINIMIZATION: &str = "minimization";

    /// Logs related to clause deletion
    pub const REDUCTION: &str = "reduction";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to a valuation
    pub const VALUATION: &str = "valuation";

    /// Logs related to [backjumping](crate::procedures::backjump)
    pub const BACKJUMP: &str = "backjump";

    /// Logs related to [decisions](crate::procedures::decision)
    pub const DECISION: &str = "decision";

    /// Logs related to [assumptions](crate::procedures::assumptions)
    pub const ASSUMPTION: &str = "assumption";

    /// Logs related to restarts
    pub const RESTART: &str = "restart";

    /// Logs related to [theory consultation](crate::procedures::theory)
    pub const THEORY: &str = "theory";

    /// Logs related to the [abstraction map](crate::theory::abstraction)
    pub const ABSTRACTION: &str = "abstraction";

    /// Logs related to [infeasible subsets](crate::procedures::core)
    pub const CORE: &str = "core";
}
