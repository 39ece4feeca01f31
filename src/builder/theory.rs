use crate::{
    context::GenericContext,
    misc::log::targets,
    structures::{
        atom::TOP_ATOM,
        clause::ClauseSource,
        literal::{CLiteral, Literal},
    },
    theory::{Abstraction, Constraint, ConstraintKey, Relation, Sort, Term, Variable},
    types::err::ErrorKind,
};

/// Methods for Boolean symbols and theory constraints.
impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The (positive) literal of the Boolean symbol `name`, with an atom created on first reference.
    pub fn boolean(&mut self, name: &str) -> Result<CLiteral, ErrorKind> {
        if let Some(atom) = self.symbols.get(name) {
            return Ok(CLiteral::new(*atom, true));
        }
        let atom = self.fresh_atom()?;
        self.symbols.insert(name.to_string(), atom);
        Ok(CLiteral::new(atom, true))
    }

    /// The theory variable `name`, interned with `sort` on first reference.
    pub fn variable(&mut self, name: &str, sort: Sort) -> Variable {
        self.pool.variable(name, sort)
    }

    /// The literal standing for `constraint`.
    ///
    /// The constraint is normalized and interned.
    /// On first reference to either member of the pair the constraint belongs to, a fresh atom is created for the pair and the backend is informed of both members.
    /// If the backend rejects a member, the negation of its literal is added as a unit clause.
    ///
    /// A ground constraint stands for the top literal if true, and its negation otherwise.
    ///
    /// ```rust
    /// # use otter_smt::context::Context;
    /// # use otter_smt::config::Config;
    /// # use otter_smt::theory::{Constraint, Polynomial, Relation, Sort};
    /// let mut the_context = Context::from_config(Config::default());
    /// let x = Polynomial::variable(the_context.variable("x", Sort::Real));
    ///
    /// let leq = Constraint::new(x, Relation::Leq);
    /// let greater = leq.clone().negate();
    ///
    /// let literal = the_context.literal_for(leq).unwrap();
    /// assert_eq!(the_context.literal_for(greater).unwrap(), -literal);
    /// ```
    pub fn literal_for(&mut self, constraint: Constraint) -> Result<CLiteral, ErrorKind> {
        let normal = constraint.clone().normalize();

        if let Some(value) = normal.evaluate_ground() {
            log::trace!(target: targets::ABSTRACTION, "Ground {constraint} is {value}");
            return Ok(CLiteral::new(TOP_ATOM, value));
        }

        let key = self.pool.intern(normal.clone());
        if let Some(literal) = self.abstraction.literal_of(key) {
            return Ok(literal);
        }

        let negation_key = self.pool.intern(normal.clone().negate().normalize());
        let atom = self.fresh_atom()?;

        let given = Abstraction {
            constraint: key,
            origin: constraint.clone(),
        };
        let negation = Abstraction {
            constraint: negation_key,
            origin: constraint.negate(),
        };

        let literal = match normal.relation().is_pair_positive() {
            true => {
                self.abstraction.register(atom, given, negation);
                CLiteral::new(atom, true)
            }
            false => {
                self.abstraction.register(atom, negation, given);
                CLiteral::new(atom, false)
            }
        };
        log::debug!(target: targets::ABSTRACTION, "{literal} for {normal}");

        for (member, member_key) in [(literal, key), (-literal, negation_key)] {
            if !self.theory.inform(member_key, &self.pool) {
                log::debug!(target: targets::ABSTRACTION, "Backend rejected {member_key}");
                self.add_clause_from(vec![-member], ClauseSource::Theory)?;
            }
        }

        Ok(literal)
    }

    /// The literal standing for `left relation right`.
    pub fn literal_for_terms(
        &mut self,
        left: &Term,
        relation: Relation,
        right: &Term,
    ) -> Result<CLiteral, ErrorKind> {
        let polynomial = left.to_polynomial() - right.to_polynomial();
        self.literal_for(Constraint::new(polynomial, relation))
    }

    /// The interned constraint `literal` stands for, if any.
    pub fn constraint_for(&self, literal: CLiteral) -> Option<(ConstraintKey, &Constraint)> {
        let key = self.abstraction.constraint_of(literal)?;
        self.pool.constraint(key).map(|constraint| (key, constraint))
    }

    /// The constraint `literal` stands for, as first given.
    pub fn origin_for(&self, literal: CLiteral) -> Option<&Constraint> {
        self.abstraction
            .abstraction_of(literal)
            .map(|abstraction| &abstraction.origin)
    }
}
