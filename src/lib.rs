//! A library for deciding the satisfiability of Boolean combinations of polynomial constraints.
//!
//! otter_smt is a DPLL(T) engine: a conflict-driven clause-learning search over Boolean atoms, some of which abstract arithmetic constraints, with a theory backend consulted whenever propagation is quiescent.
//!
//! # Orientation
//!
//! The library is designed around a [context].
//!
//! - A formula is stored in a [clause database](crate::db::clause).
//! - A valuation of the Boolean atoms is stored in an [atom database](crate::db::atom), and the order of assignment on a [trail](crate::db::trail).
//! - Arithmetic constraints are interned in a [constraint pool](crate::theory::pool), and each constraint is tied to a Boolean literal by the [abstraction map](crate::theory::abstraction).
//! - Constraints assigned true are passed to a [backend](crate::theory::backend), which answers whether they are jointly consistent and, when not, explains why with a subset of the constraints.
//!
//! Useful starting points may be:
//! - The [solve procedure](crate::procedures::solve), to see how propagation, analysis, theory consultation and decisions are sequenced.
//! - The [theory module](crate::theory), for the constraint representation and the backend contract.
//! - The [configuration](crate::config), to see what is supported.
//!
//! # Example
//!
//! ```rust
//! # use otter_smt::config::Config;
//! # use otter_smt::context::Context;
//! # use otter_smt::reports::Report;
//! # use otter_smt::theory::{BoundsBackend, Constraint, Polynomial, Relation, Sort};
//! # use otter_smt::structures::literal::Literal;
//! # use num_rational::BigRational;
//! let mut ctx = Context::with_backend(Config::default(), BoundsBackend::default());
//!
//! let x = ctx.variable("x", Sort::Real);
//! let x = Polynomial::variable(x);
//! let one = Polynomial::constant(BigRational::from_integer(1.into()));
//!
//! // x ≤ 0 or x - 1 ≥ 0
//! let a = ctx.literal_for(Constraint::new(x.clone(), Relation::Leq)).unwrap();
//! let b = ctx.literal_for(Constraint::new(x - one, Relation::Geq)).unwrap();
//!
//! assert!(ctx.add_clause(vec![a, b]).is_ok());
//! assert!(ctx.add_clause(-a).is_ok());
//!
//! assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
//! assert_eq!(ctx.value_of(b.atom()), Some(b.polarity()));
//! ```
//!
//! # Logging
//!
//! Calls to the [log] macro are made throughout, with targets from [misc::log::targets].
//! No log implementation is provided.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::derivable_impls)]

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod reports;
pub mod structures;
pub mod theory;
pub mod types;

pub mod generic;

pub mod db;

pub mod misc;

pub mod resolution_buffer;
