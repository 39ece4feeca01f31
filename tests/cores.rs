use std::collections::HashSet;

use num_bigint::BigInt;
use num_rational::BigRational;

use otter_smt::{
    builder::ClauseOk,
    config::Config,
    context::Context,
    db::ClauseKey,
    reports::{Outcome, Report},
    structures::clause::CClause,
    theory::{BoundsBackend, Constraint, Polynomial, Relation, Sort},
    types::err::ErrorKind,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn added(ctx: &mut Context, clause: CClause) -> ClauseKey {
    match ctx.add_clause(clause) {
        Ok(ClauseOk::Added(key)) => key,
        other => panic!("Clause not added: {other:?}"),
    }
}

mod boolean {
    use super::*;

    #[test]
    fn every_clause_of_a_contradiction() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let x = ctx.boolean("x").unwrap();
        let y = ctx.boolean("y").unwrap();

        let keys = [
            added(&mut ctx, vec![x, y]),
            added(&mut ctx, vec![-x, y]),
            added(&mut ctx, vec![x, -y]),
            added(&mut ctx, vec![-x, -y]),
        ];

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        let core = ctx.core_keys().unwrap().into_iter().collect::<HashSet<_>>();
        assert_eq!(core, HashSet::from(keys));
    }

    #[test]
    fn irrelevant_clauses_are_excluded() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.boolean("p").unwrap();
        let q = ctx.boolean("q").unwrap();
        let r = ctx.boolean("r").unwrap();
        let s = ctx.boolean("s").unwrap();

        let relevant = [
            added(&mut ctx, vec![p, q]),
            added(&mut ctx, vec![-p, q]),
            added(&mut ctx, vec![p, -q]),
            added(&mut ctx, vec![-p, -q]),
        ];
        let irrelevant = [added(&mut ctx, vec![r, s]), added(&mut ctx, vec![-r, s])];

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        let core = ctx.core_keys().unwrap();
        for key in relevant {
            assert!(core.contains(&key));
        }
        for key in irrelevant {
            assert!(!core.contains(&key));
        }
    }

    #[test]
    fn empty_on_addition() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.boolean("p").unwrap();
        let q = ctx.boolean("q").unwrap();
        let r = ctx.boolean("r").unwrap();

        let p_key = added(&mut ctx, vec![p]);
        let q_key = added(&mut ctx, vec![-r, q]);
        let _ = added(&mut ctx, vec![r]);
        assert_eq!(ctx.literal_value(q), Some(true));

        assert_eq!(ctx.add_clause(vec![-p, -q]), Ok(ClauseOk::Unsatisfiable));
        let empty = ctx.unsatisfiable_clause().unwrap();

        let core = ctx.core_keys().unwrap();
        assert_eq!(core.len(), 4);
        assert!(core.contains(&empty));
        assert!(core.contains(&p_key));
        assert!(core.contains(&q_key));

        // The clause is kept whole, so the core is unsatisfiable alone.
        let clauses = ctx.core_clauses().unwrap();
        assert!(clauses
            .iter()
            .any(|clause| clause.len() == 2 && clause.contains(&-p) && clause.contains(&-q)));
    }

    #[test]
    fn core_of_a_harder_formula() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());

        // Four pigeons, three holes.
        let sits = (0..4)
            .map(|_| (0..3).map(|_| ctx.fresh_or_max_literal()).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let mut clauses: Vec<CClause> = sits.clone();
        for hole in 0..3 {
            for a in 0..4 {
                for b in a + 1..4 {
                    clauses.push(vec![-sits[a][hole], -sits[b][hole]]);
                }
            }
        }

        // And a satisfiable chain, unrelated to the pigeons.
        let chain = (0..5).map(|_| ctx.fresh_or_max_literal()).collect::<Vec<_>>();
        let chain_clauses = chain
            .windows(2)
            .map(|pair| vec![-pair[0], pair[1]])
            .collect::<Vec<CClause>>();

        for clause in clauses.iter().chain(chain_clauses.iter()) {
            assert!(ctx.add_clause(clause.clone()).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        let core = ctx.core_clauses().unwrap();
        assert!(core.iter().all(|clause| !chain_clauses.contains(clause)));

        let mut fresh = Context::from_config(Config::default());
        for _ in 0..17 {
            let _ = fresh.fresh_or_max_literal();
        }
        for clause in core {
            assert!(fresh.add_clause(clause).is_ok());
        }
        assert_eq!(fresh.solve(), Ok(Report::Unsatisfiable));
    }
}

mod theory {
    use super::*;

    #[test]
    fn lemma_reasons() {
        init_logging();
        let mut ctx = Context::with_backend(Config::default(), BoundsBackend::default());
        let x = Polynomial::variable(ctx.variable("x", Sort::Real));
        let one = Polynomial::constant(BigRational::from_integer(BigInt::from(1)));

        let upper = ctx.literal_for(Constraint::new(x.clone(), Relation::Leq)).unwrap();
        let lower = ctx
            .literal_for(Constraint::new(x - one, Relation::Geq))
            .unwrap();
        let p = ctx.boolean("p").unwrap();
        let q = ctx.boolean("q").unwrap();
        let r = ctx.boolean("r").unwrap();

        let relevant = [
            added(&mut ctx, vec![upper]),
            added(&mut ctx, vec![-p, lower]),
            added(&mut ctx, vec![p]),
        ];
        let irrelevant = added(&mut ctx, vec![q, r]);

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        let core = ctx.core_keys().unwrap();
        assert_eq!(core.len(), 3);
        for key in relevant {
            assert!(core.contains(&key));
        }
        assert!(!core.contains(&irrelevant));
    }

    #[test]
    fn lemma_after_decisions() {
        init_logging();
        let mut ctx = Context::with_backend(Config::default(), BoundsBackend::default());
        let x = Polynomial::variable(ctx.variable("x", Sort::Real));
        let two = Polynomial::constant(BigRational::from_integer(BigInt::from(2)));

        let negative = ctx.literal_for(Constraint::new(x.clone(), Relation::Less)).unwrap();
        let large = ctx
            .literal_for(Constraint::new(x - two, Relation::Greater))
            .unwrap();
        let p = ctx.boolean("p").unwrap();
        let q = ctx.boolean("q").unwrap();

        // p or q, and each forces both bounds.
        for clause in [
            vec![p, q],
            vec![-p, negative],
            vec![-p, large],
            vec![-q, negative],
            vec![-q, large],
        ] {
            assert!(ctx.add_clause(clause).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.counters.theory_lemmas > 0);
        let Ok(Outcome::Unsatisfiable(core)) = ctx.outcome() else {
            panic!("Expected an unsatisfiable outcome");
        };
        assert_eq!(core, ctx.core_keys().unwrap());
    }
}

mod states {
    use super::*;

    #[test]
    fn no_core_without_unsatisfiability() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.boolean("p").unwrap();
        assert_eq!(ctx.core_keys(), Err(ErrorKind::InvalidState));

        assert!(ctx.add_clause(vec![p, -p]).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.core_keys(), Err(ErrorKind::InvalidState));
        assert_eq!(ctx.unsatisfiable_clause(), Err(ErrorKind::InvalidState));
        assert!(matches!(ctx.outcome(), Ok(Outcome::Satisfiable(_))));
    }
}
