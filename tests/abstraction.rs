use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;

use otter_smt::{
    config::Config,
    context::Context,
    structures::{
        atom::TOP_ATOM,
        literal::{CLiteral, Literal},
    },
    theory::{Constraint, Polynomial, Relation, Sort, Term},
};

fn constant(n: i64) -> Polynomial {
    Polynomial::constant(BigRational::from_integer(BigInt::from(n)))
}

mod pairs {
    use super::*;

    #[test]
    fn negation_is_the_negated_literal() {
        let mut ctx = Context::from_config(Config::default());
        let x = Polynomial::variable(ctx.variable("x", Sort::Real));
        let y = Polynomial::variable(ctx.variable("y", Sort::Real));

        let constraints = [
            Constraint::new(x.clone() - constant(3), Relation::Eq),
            Constraint::new(x.clone() + y.clone(), Relation::Neq),
            Constraint::new(x.clone() * y.clone(), Relation::Less),
            Constraint::new(y.clone() - x.clone(), Relation::Leq),
            Constraint::new(x.clone() * x, Relation::Greater),
            Constraint::new(y - constant(2), Relation::Geq),
        ];

        for constraint in constraints {
            let literal = ctx.literal_for(constraint.clone()).unwrap();
            assert_eq!(ctx.literal_for(constraint.negate()).unwrap(), -literal);
        }
    }

    #[test]
    fn constraint_for_is_normal() {
        let mut ctx = Context::from_config(Config::default());
        let x = Polynomial::variable(ctx.variable("x", Sort::Real));

        let given = Constraint::new(constant(4) - x * constant(2), Relation::Greater);
        let literal = ctx.literal_for(given.clone()).unwrap();

        let normal = given.clone().normalize();
        let (key, constraint) = ctx.constraint_for(literal).unwrap();
        assert_eq!(constraint, &normal);
        assert_eq!(ctx.pool.key_of(&normal), Some(key));

        let (negation_key, negation) = ctx.constraint_for(-literal).unwrap();
        assert_ne!(key, negation_key);
        assert_eq!(negation, &given.negate().normalize());
    }

    #[test]
    fn origin_is_as_given() {
        let mut ctx = Context::from_config(Config::default());
        let x = Polynomial::variable(ctx.variable("x", Sort::Real));

        let given = Constraint::new(x * constant(3) - constant(6), Relation::Geq);
        let literal = ctx.literal_for(given.clone()).unwrap();
        assert!(ctx.abstraction.is_abstracted(literal.atom()));

        assert_eq!(ctx.origin_for(literal), Some(&given));
        assert_eq!(ctx.origin_for(-literal), Some(&given.negate()));
    }

    #[test]
    fn booleans_have_no_constraint() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.boolean("p").unwrap();

        assert_eq!(ctx.boolean("p"), Ok(p));
        assert!(!ctx.abstraction.is_abstracted(p.atom()));
        assert!(ctx.constraint_for(p).is_none());
        assert!(ctx.origin_for(-p).is_none());
    }
}

mod sharing {
    use super::*;

    #[test]
    fn equivalent_forms() {
        let mut ctx = Context::from_config(Config::default());
        let x = Polynomial::variable(ctx.variable("x", Sort::Real));

        let a = ctx
            .literal_for(Constraint::new(x.clone() * constant(2) - constant(2), Relation::Leq))
            .unwrap();
        let b = ctx
            .literal_for(Constraint::new(x.clone() - constant(1), Relation::Leq))
            .unwrap();
        let c = ctx
            .literal_for(Constraint::new(constant(1) - x, Relation::Geq))
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn no_fresh_atoms_on_repetition() {
        let mut ctx = Context::from_config(Config::default());
        let x = Polynomial::variable(ctx.variable("x", Sort::Real));
        let constraint = Constraint::new(x - constant(5), Relation::Less);

        let literal = ctx.literal_for(constraint.clone()).unwrap();
        let atoms = ctx.atom_db.count();
        let constraints = ctx.pool.constraint_count();

        for _ in 0..3 {
            assert_eq!(ctx.literal_for(constraint.clone()).unwrap(), literal);
            assert_eq!(ctx.literal_for(constraint.clone().negate()).unwrap(), -literal);
        }
        assert_eq!(ctx.atom_db.count(), atoms);
        assert_eq!(ctx.pool.constraint_count(), constraints);
    }

    #[test]
    fn terms_share_literals() {
        let mut ctx = Context::from_config(Config::default());
        let x = ctx.variable("x", Sort::Real);
        let y = ctx.variable("y", Sort::Real);

        let x_term = Arc::new(Term::Variable(x));
        let y_term = Arc::new(Term::Variable(y));

        // x * y ≤ x + y, as terms and as polynomials.
        let product = Term::Product(vec![x_term.clone(), y_term.clone()]);
        let sum = Term::Sum(vec![x_term, y_term]);
        let from_terms = ctx.literal_for_terms(&product, Relation::Leq, &sum).unwrap();

        let (x, y) = (Polynomial::variable(x), Polynomial::variable(y));
        let from_polynomials = ctx
            .literal_for(Constraint::new(x.clone() * y.clone() - x - y, Relation::Leq))
            .unwrap();

        assert_eq!(from_terms, from_polynomials);
    }

    #[test]
    fn variables_are_interned_by_name() {
        let mut ctx = Context::from_config(Config::default());
        let x = ctx.variable("x", Sort::Int);

        assert_eq!(ctx.variable("x", Sort::Real), x);
        assert_eq!(ctx.pool.sort_of(x), Sort::Int);
        assert_ne!(ctx.variable("y", Sort::Int), x);
    }
}

mod ground {
    use super::*;

    #[test]
    fn ground_constraints_are_top() {
        let mut ctx = Context::from_config(Config::default());
        let atoms = ctx.atom_db.count();

        let truth = ctx
            .literal_for(Constraint::new(constant(-1), Relation::Less))
            .unwrap();
        let falsity = ctx
            .literal_for(Constraint::new(constant(2), Relation::Eq))
            .unwrap();

        assert_eq!(truth, CLiteral::new(TOP_ATOM, true));
        assert_eq!(falsity, CLiteral::new(TOP_ATOM, false));
        assert_eq!(ctx.literal_value(truth), Some(true));
        assert_eq!(ctx.literal_value(falsity), Some(false));
        assert_eq!(ctx.atom_db.count(), atoms);
    }

    #[test]
    fn cancelled_variables_are_ground() {
        let mut ctx = Context::from_config(Config::default());
        let x = Polynomial::variable(ctx.variable("x", Sort::Real));

        let literal = ctx
            .literal_for(Constraint::new(x.clone() - x, Relation::Geq))
            .unwrap();
        assert_eq!(literal, CLiteral::new(TOP_ATOM, true));
    }
}
