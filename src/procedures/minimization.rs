/*!
Minimization of a learnt clause.

A literal of a learnt clause is *redundant* if its negation is implied by the negations of the remaining literals of the clause, together with literals fixed at level zero.
A redundant literal may be removed without loss of soundness, as resolution on the reason for the literal would remove it anyway.

Two modes are supported, following [Minimization](crate::config::Minimization):
- Basic: a literal is redundant if every other literal of its reason is in the clause, or fixed at level zero.
- Deep: a literal is redundant if each literal of its reason is in the clause, fixed at level zero, or itself redundant, recursively.

Decisions are never redundant.

Deep minimization prunes the search for a chain of reasons with an *abstraction* of the levels in the clause: a bit for each level modulo 32.
If the level of some literal reached has no bit in the abstraction the literal cannot be in the clause, and the search fails early.

Outcomes of the search are cached in the [resolution buffer](crate::resolution_buffer): literals shown redundant are marked as [Source](Seen::Source), and literals shown not redundant as [Failed](Seen::Failed).

The reason of each removed literal, and of each literal passed through to show the removal, is noted as a premise of the clause.
*/

use crate::{
    config::Minimization,
    context::GenericContext,
    db::{ClauseKey, LevelIndex},
    misc::log::targets,
    resolution_buffer::Seen,
    structures::{
        atom::Atom,
        clause::CClause,
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
    },
};

fn abstract_level(level: LevelIndex) -> u32 {
    1 << (level & 31)
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Removes redundant literals from `clause`, keeping the first literal.
    ///
    /// The atom of each literal of the clause is expected to be marked as seen in the resolution buffer.
    pub fn minimize(&mut self, clause: &mut CClause) {
        let before = clause.len();

        match self.config.minimization.value {
            Minimization::None => return,

            Minimization::Basic => {
                let mut index = 1;
                while index < clause.len() {
                    match self.basic_redundant(clause[index]) {
                        true => {
                            clause.swap_remove(index);
                        }
                        false => index += 1,
                    }
                }
            }

            Minimization::Deep => {
                let levels = clause.iter().skip(1).fold(0, |levels, literal| {
                    levels | abstract_level(self.atom_db.level_of(literal.atom()).unwrap_or(0))
                });

                let mut index = 1;
                while index < clause.len() {
                    match self.deep_redundant(clause[index], levels) {
                        true => {
                            clause.swap_remove(index);
                        }
                        false => index += 1,
                    }
                }
            }
        }

        if clause.len() < before {
            log::trace!(target: targets::MINIMIZATION, "Removed {} literals", before - clause.len());
        }
    }

    /// The literals of the reason for `atom` other than the literal of `atom`, if the atom has a reason clause.
    fn reason_antecedents(&self, atom: Atom) -> Option<(ClauseKey, Vec<CLiteral>)> {
        let key = match self.atom_db.reason_of(atom) {
            AssignmentSource::Clause(key) => key,
            _ => return None,
        };
        let clause = self.clause_db.get(key).ok()?;
        let antecedents = clause
            .iter()
            .filter(|literal| literal.atom() != atom)
            .copied()
            .collect();
        Some((key, antecedents))
    }

    fn basic_redundant(&mut self, literal: CLiteral) -> bool {
        let Some((key, antecedents)) = self.reason_antecedents(literal.atom()) else {
            return false;
        };

        let premises = self.resolution_buffer.premise_count();
        for antecedent in antecedents {
            let atom = antecedent.atom();
            match self.atom_db.level_of(atom) {
                Some(0) => {
                    if let Some(premise) = self.atom_db.reason_of(atom).clause_key() {
                        self.resolution_buffer.note_premise(premise);
                    }
                }
                _ => {
                    if !self.resolution_buffer.is_seen(atom) {
                        self.resolution_buffer.truncate_premises(premises);
                        return false;
                    }
                }
            }
        }
        self.resolution_buffer.note_premise(key);
        true
    }

    fn deep_redundant(&mut self, literal: CLiteral, levels: u32) -> bool {
        if self.reason_antecedents(literal.atom()).is_none() {
            return false;
        }

        let marks = self.resolution_buffer.marked_count();
        let premises = self.resolution_buffer.premise_count();

        self.resolution_buffer.stack.clear();
        self.resolution_buffer.stack.push(literal.atom());

        while let Some(atom) = self.resolution_buffer.stack.pop() {
            let Some((key, antecedents)) = self.reason_antecedents(atom) else {
                continue;
            };
            self.resolution_buffer.note_premise(key);

            for antecedent in antecedents {
                let atom = antecedent.atom();
                let Some(level) = self.atom_db.level_of(atom) else {
                    continue;
                };

                if level == 0 {
                    if let Some(premise) = self.atom_db.reason_of(atom).clause_key() {
                        self.resolution_buffer.note_premise(premise);
                    }
                    continue;
                }

                match self.resolution_buffer.seen(atom) {
                    Seen::Source => {}

                    Seen::No if self.atom_db.reason_of(atom).clause_key().is_some()
                        && abstract_level(level) & levels != 0 =>
                    {
                        self.resolution_buffer.mark(atom, Seen::Source);
                        self.resolution_buffer.stack.push(atom);
                    }

                    Seen::No | Seen::Failed => {
                        self.resolution_buffer.revert_to(marks);
                        self.resolution_buffer.truncate_premises(premises);
                        self.resolution_buffer.mark(atom, Seen::Failed);
                        self.resolution_buffer.stack.clear();
                        return false;
                    }
                }
            }
        }

        true
    }
}
