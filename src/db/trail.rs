/*!
The trail, the order in which atoms are valued.

The trail is a sequence of literals, split into levels.
Level zero holds literals fixed without a decision, and each further level begins with a decision, followed by the consequences of that decision.

Together with the trail is the head of the propagation queue: literals before the head have been propagated, and literals from the head on are waiting for propagation.
*/

use crate::structures::literal::CLiteral;

use super::LevelIndex;

#[derive(Default)]
pub struct Trail {
    /// The valued literals, in order of valuation.
    pub literals: Vec<CLiteral>,

    /// Indicies at which each level above zero begins.
    pub level_indicies: Vec<usize>,

    /// The position of the first literal which has not been propagated.
    pub q_head: usize,
}

impl Trail {
    /// Stores a literal at the current level.
    pub fn store_assignment(&mut self, literal: CLiteral) {
        self.literals.push(literal);
    }

    /// Opens a new level.
    pub fn push_level(&mut self) {
        self.level_indicies.push(self.literals.len());
    }

    /// The current level.
    pub fn level(&self) -> LevelIndex {
        self.level_indicies.len() as LevelIndex
    }

    /// Returns true if some decision is active.
    pub fn decision_is_made(&self) -> bool {
        !self.level_indicies.is_empty()
    }

    /// A count of valued literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True if no literal is valued.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The position at which the level above `level` begins, or the length of the trail if there is no such level.
    pub fn position_above(&self, level: LevelIndex) -> usize {
        self.level_indicies
            .get(level as usize)
            .copied()
            .unwrap_or(self.literals.len())
    }

    /// The literals valued at level zero.
    pub fn level_zero(&self) -> &[CLiteral] {
        &self.literals[..self.position_above(0)]
    }

    /// The assignments made at the (current) top level, in order of assignment.
    pub fn top_level_assignments(&self) -> &[CLiteral] {
        match self.level_indicies.last() {
            Some(&level_start) => &self.literals[level_start..],
            None => &[],
        }
    }

    /// The next literal to propagate, if any, advancing the head.
    pub fn next_unpropagated(&mut self) -> Option<CLiteral> {
        let literal = self.literals.get(self.q_head).copied()?;
        self.q_head += 1;
        Some(literal)
    }

    /// Marks every literal as propagated.
    pub fn exhaust_queue(&mut self) {
        self.q_head = self.literals.len();
    }

    /// Removes levels above the given level, returning the literals removed, in order of valuation.
    ///
    /// # Soundness
    /// Does not clear the *valuation* of any literal.
    pub fn clear_assigments_above(&mut self, level: LevelIndex) -> Vec<CLiteral> {
        if let Some(&level_start) = self.level_indicies.get(level as usize) {
            self.level_indicies.truncate(level as usize);
            let removed = self.literals.split_off(level_start);
            self.q_head = std::cmp::min(self.q_head, self.literals.len());
            removed
        } else {
            Vec::default()
        }
    }
}
