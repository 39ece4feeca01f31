use crate::{
    config::Config,
    generic::random::MinimalPCG32,
    theory::{Backend, Pipeline},
};

use rand::SeedableRng;

use super::GenericContext;

/// A context which uses [MinimalPCG32] as a source of randomness.
pub type Context = GenericContext<MinimalPCG32>;

impl Context {
    /// Creates a context from some given configuration, with an empty pipeline of theory backends.
    ///
    /// Such a context decides formulas without constraints, and is unsure of any formula which requires a constraint to hold.
    pub fn from_config(config: Config) -> Self {
        Self::with_backend(config, Pipeline::default())
    }

    /// Creates a context from some given configuration and theory backend.
    pub fn with_backend(config: Config, backend: impl Backend + 'static) -> Self {
        let rng = MinimalPCG32::from_seed(config.random_seed.value.to_le_bytes());
        Self::from_parts(config, rng, backend)
    }
}
