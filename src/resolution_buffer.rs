/*!
Scratch structures for resolution during conflict analysis.

The buffer is kept on a context and refreshed at the start of each analysis, to avoid an allocation per conflict.

Each atom is marked when a literal of the atom has been seen during resolution.
For analysis, a seen atom is either a literal of the learnt clause below the current level, or an atom at the current level still to be resolved.
For minimization, marks are extended to literals found to be redundant, and failures are recorded so no literal is explored twice.
*/

use crate::{db::ClauseKey, structures::atom::Atom};

/// The status of an atom during analysis and minimization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seen {
    /// The atom has not been examined.
    No,

    /// A literal of the atom is in the clause being derived, or has been shown redundant.
    Source,

    /// A literal of the atom was shown not to be redundant.
    Failed,
}

/// A buffer for use when applying resolution to a sequence of clauses.
#[derive(Default)]
pub struct ResolutionBuffer {
    /// The status of each atom.
    seen: Vec<Seen>,

    /// Atoms whose status has been revised since the last refresh.
    to_clear: Vec<Atom>,

    /// A stack for the exploration of reasons during minimization.
    pub stack: Vec<Atom>,

    /// The (direct) premises used to derive the clause.
    premises: Vec<ClauseKey>,
}

impl ResolutionBuffer {
    /// Extends the buffer to cover `atom_count` atoms.
    pub fn grow_to(&mut self, atom_count: usize) {
        if self.seen.len() < atom_count {
            self.seen.resize(atom_count, Seen::No);
        }
    }

    /// Clears every mark made since the last refresh, and any premises.
    pub fn refresh(&mut self) {
        for atom in self.to_clear.drain(..) {
            self.seen[atom as usize] = Seen::No;
        }
        self.stack.clear();
        self.premises.clear();
    }

    pub fn seen(&self, atom: Atom) -> Seen {
        self.seen[atom as usize]
    }

    pub fn is_seen(&self, atom: Atom) -> bool {
        self.seen[atom as usize] == Seen::Source
    }

    /// Marks `atom` with `status`, noting the atom for clearing on refresh.
    pub fn mark(&mut self, atom: Atom, status: Seen) {
        if self.seen[atom as usize] == Seen::No {
            self.to_clear.push(atom);
        }
        self.seen[atom as usize] = status;
    }

    /// Clears the mark of `atom` without removing the atom from the list to clear.
    pub fn unmark(&mut self, atom: Atom) {
        self.seen[atom as usize] = Seen::No;
    }

    /// A count of atoms marked since the last refresh.
    pub fn marked_count(&self) -> usize {
        self.to_clear.len()
    }

    /// Reverts the marks made after `offset` marks, restoring each atom to [Seen::No].
    pub fn revert_to(&mut self, offset: usize) {
        for atom in self.to_clear.drain(offset..) {
            self.seen[atom as usize] = Seen::No;
        }
    }

    /// Notes a premise of the derived clause.
    pub fn note_premise(&mut self, key: ClauseKey) {
        self.premises.push(key);
    }

    /// A count of premises noted.
    pub fn premise_count(&self) -> usize {
        self.premises.len()
    }

    /// Drops premises noted after the first `count`.
    pub fn truncate_premises(&mut self, count: usize) {
        self.premises.truncate(count);
    }

    /// Takes the premises noted, with duplicates removed.
    pub fn take_premises(&mut self) -> Vec<ClauseKey> {
        let mut premises = std::mem::take(&mut self.premises);
        let mut unique = std::collections::HashSet::with_capacity(premises.len());
        premises.retain(|key| unique.insert(*key));
        premises
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_are_cleared_on_refresh() {
        let mut buffer = ResolutionBuffer::default();
        buffer.grow_to(4);

        buffer.mark(1, Seen::Source);
        buffer.mark(3, Seen::Failed);
        assert!(buffer.is_seen(1));
        assert_eq!(buffer.seen(3), Seen::Failed);

        let offset = buffer.marked_count();
        buffer.mark(2, Seen::Source);
        buffer.revert_to(offset);
        assert_eq!(buffer.seen(2), Seen::No);

        buffer.refresh();
        assert_eq!(buffer.seen(1), Seen::No);
        assert_eq!(buffer.seen(3), Seen::No);
        assert_eq!(buffer.marked_count(), 0);
    }
}
