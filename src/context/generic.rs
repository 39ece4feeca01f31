use std::{
    collections::HashMap,
    sync::{atomic::AtomicBool, Arc},
};

use crate::{
    config::{Config, ConfigOption},
    db::{atom::AtomDB, clause::ClauseDB, trail::Trail, watches::Watches, ClauseKey},
    reports::{Model, Report},
    resolution_buffer::ResolutionBuffer,
    structures::{
        atom::{Atom, TOP_ATOM},
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
    theory::{AbstractionMap, ConstraintPool, TheoryBoundary},
    types::err::{self, ErrorKind},
};

use super::{callbacks::CallbackTerminate, ContextState, Counters};

/// A generic context, parameratised to a source of randomness.
///
/// Requires a source of [rng](rand::Rng) which (also) implements [Default].
///
/// # Example
///
/// ```rust
/// # use otter_smt::context::GenericContext;
/// # use otter_smt::generic::random::MinimalPCG32;
/// # use otter_smt::config::Config;
/// # use otter_smt::theory::Pipeline;
/// let context = GenericContext::<MinimalPCG32>::from_parts(Config::default(), MinimalPCG32::default(), Pipeline::default());
/// assert_eq!(context.atom_db.count(), 1);
/// ```
pub struct GenericContext<R: rand::Rng + std::default::Default> {
    /// The configuration of a context.
    pub config: Config,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The atom database.
    /// See [db::atom](crate::db::atom) for details.
    pub atom_db: AtomDB,

    /// Watch lists for each literal.
    /// See [db::watches](crate::db::watches) for details.
    pub watches: Watches,

    /// The clause database.
    /// See [db::clause](crate::db::clause) for details.
    pub clause_db: ClauseDB,

    /// The trail.
    /// See [db::trail](crate::db::trail) for details.
    pub trail: Trail,

    /// The status of the context.
    pub state: ContextState,

    /// The source of rng.
    pub rng: R,

    /// A buffer for resolution
    pub resolution_buffer: ResolutionBuffer,

    /// Theory variables and interned constraints.
    pub pool: ConstraintPool,

    /// The map between literals and constraints.
    pub abstraction: AbstractionMap,

    /// The theory backend, and the constraints passed to it.
    pub theory: TheoryBoundary,

    /// Atoms of named Boolean symbols.
    pub(crate) symbols: HashMap<String, Atom>,

    /// Literals assumed true for the next solve, in order.
    pub(crate) assumptions: Vec<CLiteral>,

    /// The assumptions which failed during the last solve, if any.
    pub(crate) failed_assumptions: Vec<CLiteral>,

    /// Set to request the end of a solve at the next restart decision point.
    pub(super) interrupt: Arc<AtomicBool>,

    /// Terminates procedures, if true.
    pub(super) callback_terminate: Option<Box<CallbackTerminate>>,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A context with the given configuration, source of randomness, and theory backend.
    pub fn from_parts(config: Config, rng: R, backend: impl crate::theory::Backend + 'static) -> Self {
        let mut context = Self {
            atom_db: AtomDB::new(&config),
            clause_db: ClauseDB::new(&config),

            config,

            counters: Counters::default(),
            watches: Watches::default(),
            trail: Trail::default(),
            state: ContextState::Configuration,
            rng,
            resolution_buffer: ResolutionBuffer::default(),

            pool: ConstraintPool::default(),
            abstraction: AbstractionMap::default(),
            theory: TheoryBoundary::new(backend),
            symbols: HashMap::default(),
            assumptions: Vec::default(),
            failed_assumptions: Vec::default(),

            interrupt: Arc::new(AtomicBool::new(false)),
            callback_terminate: None,
        };
        context.init();
        context
    }

    /// Creates the top atom, valued true at level zero.
    fn init(&mut self) {
        self.atom_db.fresh_atom(true, 0.0).ok();
        self.watches.grow();
        self.resolution_buffer.grow_to(1);

        let top = CLiteral::new(TOP_ATOM, true);
        self.atom_db.set_decision_eligibility(TOP_ATOM, false);
        self.atom_db.assign(top, 0, AssignmentSource::Fundamental);
        self.trail.store_assignment(top);
        self.trail.exhaust_queue();
        self.theory.head = self.trail.len();
    }

    /// A report on the state of the context.
    pub fn report(&self) -> Report {
        Report::from(self.state)
    }

    /// The clause with which unsatisfiability of the context was determined by.
    pub fn unsatisfiable_clause(&self) -> Result<ClauseKey, ErrorKind> {
        match self.state {
            ContextState::Unsatisfiable(key) => Ok(key),
            _ => Err(ErrorKind::InvalidState),
        }
    }

    /// Revises the option of the configuration of the context returned by `option` to `value`.
    ///
    /// The revision is rejected if out of bounds, or if the state of the context is past the latest state the option permits.
    /// Options copied to a database are revised on the copy, leaving any value adjusted during a solve untouched.
    ///
    /// ```rust
    /// # use otter_smt::config::Config;
    /// # use otter_smt::context::Context;
    /// let mut the_context = Context::from_config(Config::default());
    /// assert!(the_context.set_config(|config| &mut config.clause_db.garbage_frac, 0.5).is_ok());
    /// assert_eq!(the_context.clause_db.config.garbage_frac.value, 0.5);
    /// ```
    pub fn set_config<T: Clone + PartialOrd>(
        &mut self,
        option: fn(&mut Config) -> &mut ConfigOption<T>,
        value: T,
    ) -> Result<(), ErrorKind> {
        option(&mut self.config).set(value.clone(), self.state)?;

        std::mem::swap(&mut self.config.atom_db, &mut self.atom_db.config);
        std::mem::swap(&mut self.config.clause_db, &mut self.clause_db.config);
        option(&mut self.config).value = value;
        std::mem::swap(&mut self.config.atom_db, &mut self.atom_db.config);
        std::mem::swap(&mut self.config.clause_db, &mut self.clause_db.config);

        Ok(())
    }

    /// The value of `atom` on the current valuation, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.atom_db.value_of(atom)
    }

    /// The value of `literal` on the current valuation, if any.
    pub fn literal_value(&self, literal: CLiteral) -> Option<bool> {
        self.atom_db.literal_value(literal)
    }

    /// The model found by the last solve, if the context is satisfiable.
    pub fn model(&self) -> Result<Model, ErrorKind> {
        match self.state {
            ContextState::Satisfiable => Ok(Model {
                boolean: self.atom_db.valuation().clone(),
                theory: self.theory.model(&self.pool).unwrap_or_default(),
            }),
            _ => Err(ErrorKind::InvalidState),
        }
    }

    /// Checks the atom of `literal` has been created.
    pub(crate) fn check_atom(&self, literal: CLiteral) -> Result<(), err::AtomDBError> {
        match (literal.atom() as usize) < self.atom_db.count() {
            true => Ok(()),
            false => Err(err::AtomDBError::UnknownAtom(literal.atom())),
        }
    }
}
