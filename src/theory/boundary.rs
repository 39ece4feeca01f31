/*!
The boundary between the trail and a theory backend.

The boundary records which constraints have been *passed* to the backend, and from which position of the trail.
Constraints are passed in trail order, and so the passed constraints are a stack aligned with the trail.

On backjump, every constraint passed from a position above the backjump is retracted, most recent first, before any atom is unassigned.
So, after each backjump, the constraints asserted to the backend are exactly those of the true abstracted literals which remain on the trail and have been passed.

For the procedure which consults a backend, see [consult_theory](crate::procedures::theory).
*/

use crate::{
    misc::log::targets,
    structures::literal::CLiteral,
    theory::{
        backend::{Backend, TheoryAnswer, TheoryModel},
        ConstraintKey, ConstraintPool, Pipeline,
    },
    types::err,
};

/// A constraint passed to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Passed {
    /// The (true) literal standing for the constraint.
    pub literal: CLiteral,

    /// The constraint asserted.
    pub constraint: ConstraintKey,

    /// The position of the literal on the trail.
    pub position: usize,
}

pub struct TheoryBoundary {
    backend: Box<dyn Backend>,

    passed: Vec<Passed>,

    /// The position of the first literal on the trail not yet examined.
    pub head: usize,
}

impl Default for TheoryBoundary {
    fn default() -> Self {
        TheoryBoundary::new(Pipeline::default())
    }
}

impl TheoryBoundary {
    pub fn new(backend: impl Backend + 'static) -> Self {
        TheoryBoundary {
            backend: Box::new(backend),
            passed: Vec::default(),
            head: 0,
        }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn passed(&self) -> &[Passed] {
        &self.passed
    }

    /// The constraints asserted to the backend, in order of assertion.
    pub fn asserted(&self) -> &[ConstraintKey] {
        self.backend.asserted()
    }

    pub fn inform(&mut self, key: ConstraintKey, pool: &ConstraintPool) -> bool {
        self.backend.inform(key, pool)
    }

    /// Passes a constraint to the backend, returning the answer of the backend to the assertion.
    ///
    /// The constraint is noted as passed regardless of the answer, as the backend holds the constraint either way.
    pub fn pass(&mut self, passed: Passed, pool: &ConstraintPool) -> bool {
        log::trace!(target: targets::THEORY, "Pass {} as {} from {}", passed.literal, passed.constraint, passed.position);
        self.passed.push(passed);
        self.backend.assert(passed.constraint, pool)
    }

    pub fn check(&mut self, pool: &ConstraintPool) -> TheoryAnswer {
        self.backend.check(pool)
    }

    /// The literals standing for the explanation of the backend, with duplicates removed.
    pub fn explanation(&self) -> Result<Vec<CLiteral>, err::TheoryError> {
        let keys = self.backend.explain();
        if keys.is_empty() {
            log::error!(target: targets::THEORY, "Empty explanation from {}", self.backend.name());
            return Err(err::TheoryError::EmptyExplanation);
        }

        let mut literals = Vec::with_capacity(keys.len());
        for key in keys {
            match self.passed.iter().rev().find(|passed| passed.constraint == key) {
                Some(passed) => {
                    if !literals.contains(&passed.literal) {
                        literals.push(passed.literal);
                    }
                }
                None => {
                    log::error!(target: targets::THEORY, "Explanation with unasserted {key}");
                    return Err(err::TheoryError::UnassertedExplanation(key));
                }
            }
        }
        Ok(literals)
    }

    /// Retracts every constraint passed from position `position` or later, most recent first.
    pub fn retract_from(&mut self, position: usize, pool: &ConstraintPool) -> Result<(), err::TheoryError> {
        while let Some(passed) = self.passed.last() {
            if passed.position < position {
                break;
            }
            let key = passed.constraint;
            self.backend.retract(key, pool)?;
            log::trace!(target: targets::THEORY, "Retracted {key}");
            self.passed.pop();
        }
        self.head = std::cmp::min(self.head, position);
        Ok(())
    }

    pub fn model(&self, pool: &ConstraintPool) -> Option<TheoryModel> {
        self.backend.model(pool)
    }
}
