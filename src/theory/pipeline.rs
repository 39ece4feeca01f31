/*!
A sequence of backends, chained.

Every backend of a pipeline receives every constraint informed, asserted, and retracted, so each backend holds the same stack of asserted constraints.
A check consults the backends in order, and the first *decisive* answer ([Sat](TheoryAnswer::Sat) or [Unsat](TheoryAnswer::Unsat)) is the answer of the pipeline.
An explanation, or a model, is then taken from the backend which decided.

With no backends, a pipeline is consistent only when nothing is asserted.
*/

use crate::{
    misc::log::targets,
    theory::{
        backend::{AssertionStack, Backend, TheoryAnswer, TheoryModel},
        ConstraintKey, ConstraintPool,
    },
    types::err,
};

#[derive(Default)]
pub struct Pipeline {
    backends: Vec<Box<dyn Backend>>,

    /// The index of the backend which decided the last check, or rejected the last assertion.
    decisive: Option<usize>,

    asserted: AssertionStack,
}

impl Pipeline {
    /// Appends a backend to the pipeline.
    ///
    /// A backend should be added before any constraint is asserted.
    pub fn push(&mut self, backend: impl Backend + 'static) {
        self.backends.push(Box::new(backend));
    }

    pub fn with(mut self, backend: impl Backend + 'static) -> Self {
        self.push(backend);
        self
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// The backend which decided the last check, if any.
    pub fn decisive(&self) -> Option<&dyn Backend> {
        self.decisive
            .and_then(|index| self.backends.get(index))
            .map(|backend| backend.as_ref())
    }
}

impl Backend for Pipeline {
    fn name(&self) -> &str {
        "pipeline"
    }

    fn inform(&mut self, key: ConstraintKey, pool: &ConstraintPool) -> bool {
        let mut consistent = true;
        for backend in &mut self.backends {
            consistent &= backend.inform(key, pool);
        }
        consistent
    }

    fn assert(&mut self, key: ConstraintKey, pool: &ConstraintPool) -> bool {
        self.asserted.push(key);
        let mut consistent = true;
        for (index, backend) in self.backends.iter_mut().enumerate() {
            if !backend.assert(key, pool) && consistent {
                log::debug!(target: targets::THEORY, "{} rejected {key}", backend.name());
                self.decisive = Some(index);
                consistent = false;
            }
        }
        if consistent {
            self.decisive = None;
        }
        consistent
    }

    fn check(&mut self, pool: &ConstraintPool) -> TheoryAnswer {
        self.decisive = None;
        if self.backends.is_empty() {
            return match self.asserted.is_empty() {
                true => TheoryAnswer::Sat,
                false => TheoryAnswer::Unknown,
            };
        }

        for (index, backend) in self.backends.iter_mut().enumerate() {
            match backend.check(pool) {
                TheoryAnswer::Unknown => {
                    log::trace!(target: targets::THEORY, "{} is unsure", backend.name());
                }
                decisive => {
                    log::trace!(target: targets::THEORY, "{} decided {decisive}", backend.name());
                    self.decisive = Some(index);
                    return decisive;
                }
            }
        }
        TheoryAnswer::Unknown
    }

    fn explain(&self) -> Vec<ConstraintKey> {
        match self.decisive() {
            Some(backend) => backend.explain(),
            None => Vec::default(),
        }
    }

    fn retract(&mut self, key: ConstraintKey, pool: &ConstraintPool) -> Result<(), err::TheoryError> {
        self.asserted.pop(key)?;
        self.decisive = None;
        for backend in &mut self.backends {
            backend.retract(key, pool)?;
        }
        Ok(())
    }

    fn model(&self, pool: &ConstraintPool) -> Option<TheoryModel> {
        match self.backends.is_empty() {
            true => Some(TheoryModel::default()),
            false => self.decisive()?.model(pool),
        }
    }

    fn asserted(&self) -> &[ConstraintKey] {
        self.asserted.as_slice()
    }
}
