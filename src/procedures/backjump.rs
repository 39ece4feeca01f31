//! Recovery from a conflict.
//!
//! # Overview
//!
//! A backjump is a 'jump' from some (higher) decision level to some previous (lower) decision level.
//!
//! Typically, a backjump is made from level *l* to level *l - i* because a conflict was found at level *l* and analysis produced a clause which asserts some literal at level *l - i*.
//! In this case, all decisions and all consequences of those decisions from level *l* down to level *l - i* are undone, and any queued consequences of the decision are removed from the propagation queue.
//!
//! # Theory constraints
//!
//! Before any atom is unassigned, every constraint passed to the theory backend from a position of the trail above the target level is retracted, most recent first.
//! So, the constraints asserted to the backend are always a prefix of the constraints of the true literals on the trail.
//!
//! # Phase saving
//!
//! The value of an unassigned atom may be saved as the polarity of a future decision on the atom, following [PhaseSaving](crate::config::PhaseSaving).
//!
//! # Example
//!
//! ```rust,ignore
//! let target = self.second_level(&mut learnt);
//! self.backjump(target)?;
//! ```
//!
//! # Literature
//!
//! See [Chronological Backtracking](https://doi.org/10.1007/978-3-319-94144-8_7) for a discussion of chronological and non-chronological backjumping --- and a follow-up: [Backing Backtracking](https://www.doi.org/10.1007/978-3-030-24258-9_18).

use crate::{
    config::PhaseSaving,
    context::GenericContext,
    db::LevelIndex,
    misc::log::targets::{self},
    structures::literal::Literal,
    types::err::{self},
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Backjumps to the given target level.
    ///
    /// Passing a target level equal to or greater than the current level is safe, and nothing happens.
    ///
    /// For documentation, see [procedures::backjump](crate::procedures::backjump).
    pub fn backjump(&mut self, target: LevelIndex) -> Result<(), err::ErrorKind> {
        let level = self.trail.level();
        if target >= level {
            return Ok(());
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {level} to {target}");

        let position = self.trail.position_above(target);
        self.theory.retract_from(position, &self.pool)?;

        let top_start = self.trail.position_above(level - 1);
        let removed = self.trail.clear_assigments_above(target);

        for (offset, literal) in removed.iter().enumerate().rev() {
            let save = match self.config.phase_saving.value {
                PhaseSaving::Full => true,
                PhaseSaving::Limited => position + offset >= top_start,
                PhaseSaving::None => false,
            };
            self.atom_db.drop_value(literal.atom(), save);
        }

        Ok(())
    }
}
