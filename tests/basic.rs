use otter_smt::{
    builder::ClauseOk,
    config::Config,
    context::Context,
    reports::Report,
    structures::{
        clause::CClause,
        literal::{CLiteral, Literal},
    },
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fresh_literals(ctx: &mut Context, count: usize) -> Vec<CLiteral> {
    (0..count).map(|_| ctx.fresh_or_max_literal()).collect()
}

/// Whether some literal of each clause is true on the valuation of the context.
fn satisfies(ctx: &Context, clauses: &[CClause]) -> bool {
    clauses.iter().all(|clause| {
        clause
            .iter()
            .any(|literal| ctx.literal_value(*literal) == Some(true))
    })
}

/// Clauses stating `pigeons` pigeons sit in distinct holes of `holes` holes.
fn pigeonhole(ctx: &mut Context, pigeons: usize, holes: usize) -> Vec<CClause> {
    let sits = (0..pigeons)
        .map(|_| fresh_literals(ctx, holes))
        .collect::<Vec<_>>();

    let mut clauses = Vec::default();
    for pigeon in &sits {
        clauses.push(pigeon.clone());
    }
    for hole in 0..holes {
        for a in 0..pigeons {
            for b in a + 1..pigeons {
                clauses.push(vec![-sits[a][hole], -sits[b][hole]]);
            }
        }
    }
    clauses
}

mod basic {
    use super::*;

    #[test]
    fn one_literal() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_or_max_literal();

        assert!(matches!(ctx.add_clause(p), Ok(ClauseOk::Added(_))));
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.literal_value(p), Some(true));
    }

    #[test]
    fn propagation_without_decisions() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let [x, y] = *fresh_literals(&mut ctx, 2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(x).is_ok());
        assert!(ctx.add_clause(vec![-x, y]).is_ok());

        // Fixed on addition.
        assert_eq!(ctx.literal_value(x), Some(true));
        assert_eq!(ctx.literal_value(y), Some(true));

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.counters.total_decisions, 0);
        assert_eq!(ctx.literal_value(y), Some(true));
    }

    #[test]
    fn two_atom_contradiction() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let [x, y] = *fresh_literals(&mut ctx, 2).as_slice() else {
            panic!("Insufficient literals");
        };

        for clause in [vec![x, y], vec![-x, y], vec![x, -y], vec![-x, -y]] {
            assert!(ctx.add_clause(clause).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.counters.total_conflicts, 1);
        assert_eq!(ctx.core_keys().map(|core| core.len()), Ok(4));
    }

    #[test]
    fn simplification_on_addition() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let [p, q, r] = *fresh_literals(&mut ctx, 3).as_slice() else {
            panic!("Insufficient literals");
        };

        assert_eq!(ctx.add_clause(vec![p, -p, q]), Ok(ClauseOk::Tautology));
        assert!(ctx.add_clause(p).is_ok());
        assert_eq!(ctx.add_clause(vec![p, q]), Ok(ClauseOk::Satisfied));

        // -p is dropped, leaving a unit clause on q.
        assert!(matches!(ctx.add_clause(vec![-p, q]), Ok(ClauseOk::Added(_))));
        assert_eq!(ctx.literal_value(q), Some(true));

        assert!(matches!(ctx.add_clause(vec![q, q, r]), Ok(ClauseOk::Satisfied)));
        assert_eq!(ctx.add_clause(vec![-p, -q]), Ok(ClauseOk::Unsatisfiable));
        assert_eq!(ctx.report(), Report::Unsatisfiable);
        assert_eq!(ctx.add_clause(r), Ok(ClauseOk::Unsatisfiable));
    }

    #[test]
    fn unknown_atom() {
        let mut ctx = Context::from_config(Config::default());
        let p = CLiteral::new(7, true);
        assert!(ctx.add_clause(p).is_err());
    }

    #[test]
    fn satisfiable_chain() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let literals = fresh_literals(&mut ctx, 12);

        let mut clauses = Vec::default();
        for pair in literals.windows(2) {
            clauses.push(vec![-pair[0], pair[1]]);
        }
        clauses.push(vec![literals[0], literals[5]]);
        clauses.push(vec![-literals[11], -literals[3], literals[7]]);

        for clause in &clauses {
            assert!(ctx.add_clause(clause.clone()).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(satisfies(&ctx, &clauses));
    }
}

mod harder {
    use super::*;

    #[test]
    fn pigeons_without_holes() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        for clause in pigeonhole(&mut ctx, 5, 4) {
            assert!(ctx.add_clause(clause).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.counters.total_conflicts > 1);
    }

    #[test]
    fn pigeons_with_holes() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let clauses = pigeonhole(&mut ctx, 5, 5);
        for clause in &clauses {
            assert!(ctx.add_clause(clause.clone()).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(satisfies(&ctx, &clauses));
    }

    #[test]
    fn frequent_restarts_and_reductions() {
        init_logging();
        let mut config = Config::default();
        config.restart_first.value = 2;
        config.restart_inc.value = 1.1;
        config.clause_db.learntsize_factor.value = 0.01;
        config.clause_db.learntsize_adjust_start.value = 5.0;

        let mut ctx = Context::from_config(config);
        for clause in pigeonhole(&mut ctx, 6, 5) {
            assert!(ctx.add_clause(clause).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.counters.restarts > 0);
    }

    #[test]
    fn every_configuration_agrees() {
        use otter_smt::config::{Minimization, PhaseSaving};

        init_logging();
        for minimization in [Minimization::None, Minimization::Basic, Minimization::Deep] {
            for phase_saving in [PhaseSaving::None, PhaseSaving::Limited, PhaseSaving::Full] {
                let mut config = Config::default();
                config.minimization.value = minimization;
                config.phase_saving.value = phase_saving;
                config.random_decision_bias.value = 0.1;
                config.luby_restarts.value = phase_saving != PhaseSaving::Limited;

                let mut ctx = Context::from_config(config.clone());
                for clause in pigeonhole(&mut ctx, 5, 4) {
                    assert!(ctx.add_clause(clause).is_ok());
                }
                assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));

                let mut ctx = Context::from_config(config);
                let clauses = pigeonhole(&mut ctx, 4, 4);
                for clause in &clauses {
                    assert!(ctx.add_clause(clause.clone()).is_ok());
                }
                assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
                assert!(satisfies(&ctx, &clauses));
            }
        }
    }

    #[test]
    fn random_instances() {
        init_logging();

        // A small xorshift, to avoid depending on the generators of the library.
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: u64| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state % bound
        };

        for _ in 0..20 {
            let mut ctx = Context::from_config(Config::default());
            let literals = fresh_literals(&mut ctx, 30);

            let clauses = (0..128)
                .map(|_| {
                    (0..3)
                        .map(|_| {
                            let literal = literals[next(30) as usize];
                            match next(2) {
                                0 => literal,
                                _ => -literal,
                            }
                        })
                        .collect::<CClause>()
                })
                .collect::<Vec<_>>();

            for clause in &clauses {
                assert!(ctx.add_clause(clause.clone()).is_ok());
            }

            match ctx.solve() {
                Ok(Report::Satisfiable) => assert!(satisfies(&ctx, &clauses)),

                Ok(Report::Unsatisfiable) => {
                    // The core is unsatisfiable by itself.
                    let core = ctx.core_clauses().expect("core");
                    let mut fresh = Context::from_config(Config::default());
                    let _ = fresh_literals(&mut fresh, 30);
                    for clause in core {
                        assert!(fresh.add_clause(clause).is_ok());
                    }
                    assert_eq!(fresh.solve(), Ok(Report::Unsatisfiable));
                }

                other => panic!("Unexpected result {other:?}"),
            }
        }
    }
}

mod learning {
    use super::*;
    use std::collections::HashSet;

    /// Random 3-SAT instances of `atoms` atoms and `clauses` clauses, from a small xorshift.
    fn random_formulas(count: usize, atoms: u64, clause_count: usize) -> Vec<Vec<Vec<(u64, bool)>>> {
        let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
        let mut next = move |bound: u64| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state % bound
        };

        (0..count)
            .map(|_| {
                (0..clause_count)
                    .map(|_| (0..3).map(|_| (next(atoms), next(2) == 0)).collect())
                    .collect()
            })
            .collect()
    }

    fn as_clauses(literals: &[CLiteral], formula: &[Vec<(u64, bool)>]) -> Vec<CClause> {
        formula
            .iter()
            .map(|clause| {
                clause
                    .iter()
                    .map(|(index, polarity)| match polarity {
                        true => literals[*index as usize],
                        false => -literals[*index as usize],
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn learnt_clauses_follow_from_the_formula() {
        init_logging();

        for formula in random_formulas(12, 24, 100) {
            let mut ctx = Context::from_config(Config::default());
            let literals = fresh_literals(&mut ctx, 24);
            let clauses = as_clauses(&literals, &formula);
            for clause in &clauses {
                assert!(ctx.add_clause(clause.clone()).is_ok());
            }
            assert!(ctx.solve().is_ok());

            let learnt = ctx
                .clause_db
                .learnt_keys()
                .map(|key| ctx.clause_db.get(key).unwrap().to_vec())
                .collect::<Vec<_>>();

            // The formula together with the negation of a learnt clause is unsatisfiable.
            for learnt_clause in learnt.into_iter().take(32) {
                let mut fresh = Context::from_config(Config::default());
                let _ = fresh_literals(&mut fresh, 24);
                for clause in &clauses {
                    assert!(fresh.add_clause(clause.clone()).is_ok());
                }
                for literal in &learnt_clause {
                    assert!(fresh.add_clause(-*literal).is_ok());
                }
                assert_eq!(
                    fresh.solve(),
                    Ok(Report::Unsatisfiable),
                    "{learnt_clause:?} does not follow"
                );
            }
        }
    }

    #[test]
    fn restarts_keep_level_zero() {
        init_logging();
        let mut config = Config::default();
        config.restart_first.value = 1;
        config.restart_inc.value = 1.0;
        config.luby_restarts.value = false;

        let mut ctx = Context::from_config(config);
        for clause in pigeonhole(&mut ctx, 5, 4) {
            assert!(ctx.add_clause(clause).is_ok());
        }

        // With a budget of one more conflict each time, each solve ends at the first restart decision point.
        let mut level_zero = ctx.trail.level_zero().to_vec();
        let mut limit = 0;
        let report = loop {
            limit += 1;
            assert!(limit < 100_000, "No answer");
            ctx.config.budget.conflicts = Some(limit);

            let report = ctx.solve().unwrap();
            let now = ctx.trail.level_zero();
            assert!(now.starts_with(&level_zero));
            assert!(level_zero
                .iter()
                .all(|literal| ctx.literal_value(*literal) == Some(true)));
            level_zero = now.to_vec();

            if report != Report::Unknown {
                break report;
            }
        };
        assert_eq!(report, Report::Unsatisfiable);
    }

    #[test]
    fn restarts_learn_no_duplicates() {
        init_logging();
        let mut config = Config::default();
        config.restart_first.value = 1;
        config.restart_inc.value = 1.0;
        config.luby_restarts.value = false;

        let mut ctx = Context::from_config(config);
        for clause in pigeonhole(&mut ctx, 6, 5) {
            assert!(ctx.add_clause(clause).is_ok());
        }
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.counters.restarts > 0);

        let learnt = ctx
            .clause_db
            .learnt_keys()
            .map(|key| {
                let mut clause = ctx.clause_db.get(key).unwrap().to_vec();
                clause.sort();
                clause
            })
            .collect::<Vec<_>>();
        let distinct = learnt.iter().cloned().collect::<HashSet<_>>();
        assert_eq!(distinct.len(), learnt.len());
    }
}

mod incremental {
    use super::*;

    #[test]
    fn clauses_after_a_solve() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let [p, q, r] = *fresh_literals(&mut ctx, 3).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q, r]).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        assert!(ctx.add_clause(-p).is_ok());
        assert!(ctx.add_clause(-q).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.literal_value(r), Some(true));

        assert!(ctx.add_clause(-r).is_ok());
        assert_eq!(ctx.report(), Report::Unsatisfiable);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn removed_clauses() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let [p, q, r] = *fresh_literals(&mut ctx, 3).as_slice() else {
            panic!("Insufficient literals");
        };

        let Ok(ClauseOk::Added(key)) = ctx.add_clause(vec![p, q, r]) else {
            panic!("Clause not added");
        };
        assert!(ctx.add_clause(vec![-p]).is_ok());
        assert!(ctx.add_clause(vec![-q]).is_ok());
        assert_eq!(ctx.literal_value(r), Some(true));

        // The clause is the reason for r, so is kept as a reason.
        assert!(ctx.remove_clause(key).is_ok());
        assert!(ctx.add_clause(vec![-r, p]).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));

        let mut ctx = Context::from_config(Config::default());
        let [p, q] = *fresh_literals(&mut ctx, 2).as_slice() else {
            panic!("Insufficient literals");
        };
        let Ok(ClauseOk::Added(key)) = ctx.add_clause(vec![p, q]) else {
            panic!("Clause not added");
        };
        assert!(ctx.add_clause(vec![-p, -q]).is_ok());
        assert!(ctx.remove_clause(key).is_ok());
        assert!(ctx.add_clause(-p).is_ok());
        assert!(ctx.add_clause(-q).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
    }
}

mod limits {
    use super::*;
    use otter_smt::context::{ContextState, UnknownReason};

    #[test]
    fn conflict_budget() {
        init_logging();
        let mut config = Config::default();
        config.budget.conflicts = Some(1);

        let mut ctx = Context::from_config(config);
        for clause in pigeonhole(&mut ctx, 6, 5) {
            assert!(ctx.add_clause(clause).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Unknown));
        assert_eq!(ctx.state, ContextState::Unknown(UnknownReason::Exhausted));
    }

    #[test]
    fn interrupt() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        for clause in pigeonhole(&mut ctx, 4, 3) {
            assert!(ctx.add_clause(clause).is_ok());
        }

        ctx.interrupt();
        assert_eq!(ctx.solve(), Ok(Report::Unknown));
        assert_eq!(ctx.state, ContextState::Unknown(UnknownReason::Interrupted));

        ctx.clear_interrupt();
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn terminate_callback() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        for clause in pigeonhole(&mut ctx, 6, 5) {
            assert!(ctx.add_clause(clause).is_ok());
        }

        let mut polls = 0;
        ctx.set_callback_terminate(Box::new(move || {
            polls += 1;
            polls > 3
        }));

        assert_eq!(ctx.solve(), Ok(Report::Unknown));
        assert_eq!(ctx.state, ContextState::Unknown(UnknownReason::Interrupted));
    }
}

mod configuration {
    use super::*;
    use otter_smt::types::err::{ConfigError, ErrorKind};

    #[test]
    fn revisions_follow_the_state() {
        init_logging();
        let mut ctx = Context::from_config(Config::default());
        let [p, q] = *fresh_literals(&mut ctx, 2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.set_config(|config| &mut config.clause_db.garbage_frac, 0.5).is_ok());
        assert_eq!(ctx.clause_db.config.garbage_frac.value, 0.5);
        assert_eq!(ctx.config.clause_db.garbage_frac.value, 0.5);

        assert!(ctx.add_clause(vec![p, q]).is_ok());

        // Copied to the clause database, so fixed once input is given.
        assert_eq!(
            ctx.set_config(|config| &mut config.clause_db.garbage_frac, 0.1),
            Err(ErrorKind::Config(ConfigError::InvalidState("gc_frac")))
        );
        assert!(ctx.set_config(|config| &mut config.restart_first, 4).is_ok());
        assert!(ctx
            .set_config(|config| &mut config.clause_db.learntsize_factor, 0.5)
            .is_ok());
        assert_eq!(ctx.clause_db.config.learntsize_factor.value, 0.5);

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(
            ctx.set_config(|config| &mut config.restart_first, 8),
            Err(ErrorKind::Config(ConfigError::InvalidState("rfirst")))
        );

        assert!(ctx.add_clause(vec![-p, q]).is_ok());
        assert!(ctx.set_config(|config| &mut config.restart_first, 8).is_ok());
        assert_eq!(ctx.config.restart_first.value, 8);
    }

    #[test]
    fn revisions_within_bounds() {
        let mut ctx = Context::from_config(Config::default());

        assert_eq!(
            ctx.set_config(|config| &mut config.random_decision_bias, 1.5),
            Err(ErrorKind::Config(ConfigError::OutOfBounds("rnd_freq")))
        );
        assert_eq!(ctx.config.random_decision_bias.value, 0.0);
    }
}
