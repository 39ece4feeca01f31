/*!
Configuration of a context.

All configuration for a context is contained within a [Config], given when the context is created.
Some databases keep a copy of the part of the configuration relevant to them, e.g. to adjust activity bumps as a solve progresses.

Each option has bounds, and the latest [state](ContextState) of a context in which the option may be revised.
Options read when a context is created, or copied to a database, may only be revised during configuration.
Other options may be revised until a solve, and through [set_config](crate::context::GenericContext::set_config) after a solve when input is given.

```rust
# use otter_smt::config::{Config, Minimization};
# use otter_smt::context::ContextState;
let mut config = Config::default();
assert_eq!(config.minimization.value, Minimization::Deep);

assert!(config.restart_inc.set(1.5, ContextState::Configuration).is_ok());
assert!(config.restart_inc.set(0.5, ContextState::Configuration).is_err());
assert_eq!(config.restart_inc.value, 1.5);
```
*/

mod config_option;
pub use config_option::ConfigOption;

pub mod dbs;
use dbs::{AtomDBConfig, ClauseDBConfig};

pub mod vsids;
use vsids::VSIDS;

mod budget;
pub use budget::Budget;

mod minimization;
pub use minimization::Minimization;

mod phase_saving;
pub use phase_saving::PhaseSaving;

use crate::context::ContextState;

/// Representation of activity, for atoms and clauses.
pub type Activity = f64;

/// Representation for the probability of choosing `true`
pub type PolarityLean = f64;

/// Representation for the probability of making a random decision
pub type RandomDecisionBias = f64;

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// Configuration of the atom database.
    pub atom_db: AtomDBConfig,

    /// Configuration of the clause database.
    pub clause_db: ClauseDBConfig,

    /// Limits on a solve.
    pub budget: Budget,

    /// Use the luby sequence to schedule restarts, otherwise a geometric sequence.
    pub luby_restarts: ConfigOption<bool>,

    /// How learnt clauses are minimized.
    pub minimization: ConfigOption<Minimization>,

    /// Which atoms remember their value as the polarity of a future decision.
    pub phase_saving: ConfigOption<PhaseSaving>,

    /// The probability of an atom having positive initial polarity.
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// The probability of choosing a random atom when making a decision.
    pub random_decision_bias: ConfigOption<RandomDecisionBias>,

    /// Give each atom a small random initial activity.
    pub random_initial_activity: ConfigOption<bool>,

    /// The seed of the source of randomness of a context, read when the context is created.
    pub random_seed: ConfigOption<u64>,

    /// The base restart interval, in conflicts.
    pub restart_first: ConfigOption<u32>,

    /// The growth factor of the restart interval.
    pub restart_inc: ConfigOption<f64>,

    /// Permit (scheduled) restarts.
    pub restarts: ConfigOption<bool>,

    /// Which VSIDS variant to use during resolution based analysis
    pub vsids_variant: ConfigOption<VSIDS>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            atom_db: AtomDBConfig::default(),
            clause_db: ClauseDBConfig::default(),
            budget: Budget::default(),

            luby_restarts: ConfigOption {
                name: "luby",
                min: false,
                max: true,
                max_state: ContextState::Input,
                value: true,
            },

            minimization: ConfigOption {
                name: "ccmin_mode",
                min: Minimization::MIN,
                max: Minimization::MAX,
                max_state: ContextState::Input,
                value: Minimization::Deep,
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: PhaseSaving::MIN,
                max: PhaseSaving::MAX,
                max_state: ContextState::Input,
                value: PhaseSaving::Full,
            },

            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                max_state: ContextState::Input,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "rnd_freq",
                min: 0.0,
                max: 1.0,
                max_state: ContextState::Input,
                value: 0.0,
            },

            random_initial_activity: ConfigOption {
                name: "rnd_init",
                min: false,
                max: true,
                max_state: ContextState::Input,
                value: false,
            },

            random_seed: ConfigOption {
                name: "rnd_seed",
                min: 1,
                max: u64::MAX,
                max_state: ContextState::Configuration,
                value: 91648253,
            },

            restart_first: ConfigOption {
                name: "rfirst",
                min: 1,
                max: u32::MAX,
                max_state: ContextState::Input,
                value: 100,
            },

            restart_inc: ConfigOption {
                name: "rinc",
                min: 1.0,
                max: f64::MAX,
                max_state: ContextState::Input,
                value: 2.0,
            },

            restarts: ConfigOption {
                name: "restart",
                min: false,
                max: true,
                max_state: ContextState::Input,
                value: true,
            },

            vsids_variant: ConfigOption {
                name: "vsids",
                min: VSIDS::MIN,
                max: VSIDS::MAX,
                max_state: ContextState::Input,
                value: VSIDS::MiniSAT,
            },
        }
    }
}
