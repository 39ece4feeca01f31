//! Configuration of databases, typically derived from the configuration of a context.

use crate::context::ContextState;

use super::{Activity, ConfigOption};

/// Configuration for the atom database.
#[derive(Clone)]
pub struct AtomDBConfig {
    /// The activity with which the next atom bumped will be bumped by, dynamically adjusted.
    pub bump: ConfigOption<Activity>,

    /// The decay to the activity of atoms each conflict.
    ///
    /// Decay is applied by dividing the bump by the decay.
    pub decay: ConfigOption<Activity>,
}

impl Default for AtomDBConfig {
    fn default() -> Self {
        AtomDBConfig {
            bump: ConfigOption {
                name: "atom_bump",
                min: Activity::MIN,
                max: 1e100,
                max_state: ContextState::Configuration,
                value: 1.0,
            },

            decay: ConfigOption {
                name: "var_decay",
                min: 0.0,
                max: 1.0,
                max_state: ContextState::Configuration,
                value: 0.95,
            },
        }
    }
}

/// Configuration for the clause database.
#[derive(Clone)]
pub struct ClauseDBConfig {
    /// The activity with which the next clause bumped will be bumped by, dynamically adjusted.
    pub bump: ConfigOption<Activity>,

    /// The decay to the activity of clauses each conflict.
    pub decay: ConfigOption<Activity>,

    /// The initial limit on learnt clauses, as a fraction of original clauses.
    pub learntsize_factor: ConfigOption<f64>,

    /// The growth of the limit on learnt clauses.
    pub learntsize_inc: ConfigOption<f64>,

    /// Conflicts before the first growth of the limit on learnt clauses.
    pub learntsize_adjust_start: ConfigOption<f64>,

    /// The growth of the interval between growths of the limit on learnt clauses.
    pub learntsize_adjust_inc: ConfigOption<f64>,

    /// The fraction of detached clauses with stale watches which triggers a sweep of the watch lists.
    pub garbage_frac: ConfigOption<f64>,

    /// Remove clauses satisfied at level zero during simplification.
    pub remove_satisfied: ConfigOption<bool>,
}

impl Default for ClauseDBConfig {
    fn default() -> Self {
        ClauseDBConfig {
            bump: ConfigOption {
                name: "clause_bump",
                min: Activity::MIN,
                max: 1e20,
                max_state: ContextState::Configuration,
                value: 1.0,
            },

            decay: ConfigOption {
                name: "cla_decay",
                min: 0.0,
                max: 1.0,
                max_state: ContextState::Configuration,
                value: 0.999,
            },

            learntsize_factor: ConfigOption {
                name: "learntsize_factor",
                min: 0.0,
                max: f64::MAX,
                max_state: ContextState::Input,
                value: 1.0 / 3.0,
            },

            learntsize_inc: ConfigOption {
                name: "learntsize_inc",
                min: 1.0,
                max: f64::MAX,
                max_state: ContextState::Input,
                value: 1.1,
            },

            learntsize_adjust_start: ConfigOption {
                name: "learntsize_adjust_start",
                min: 1.0,
                max: f64::MAX,
                max_state: ContextState::Input,
                value: 100.0,
            },

            learntsize_adjust_inc: ConfigOption {
                name: "learntsize_adjust_inc",
                min: 1.0,
                max: f64::MAX,
                max_state: ContextState::Input,
                value: 1.5,
            },

            garbage_frac: ConfigOption {
                name: "gc_frac",
                min: 0.0,
                max: f64::MAX,
                max_state: ContextState::Configuration,
                value: 0.20,
            },

            remove_satisfied: ConfigOption {
                name: "remove_satisfied",
                min: false,
                max: true,
                max_state: ContextState::Input,
                value: true,
            },
        }
    }
}
