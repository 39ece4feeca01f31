//! Various procedures for mutating a context.
//!
//! For the most part these are methods accessed via a context, and primarily placed here for documentation.
//!
//! [bcp](GenericContext::bcp), [propagate](GenericContext::propagate), [decide](GenericContext::decide), [consult_theory](GenericContext::consult_theory) and [backjump](GenericContext::backjump) are public, so a search may be stepped through by hand.
//!
//! [GenericContext::bcp]: crate::context::GenericContext::bcp
//! [GenericContext::propagate]: crate::context::GenericContext::propagate
//! [GenericContext::decide]: crate::context::GenericContext::decide
//! [GenericContext::consult_theory]: crate::context::GenericContext::consult_theory
//! [GenericContext::backjump]: crate::context::GenericContext::backjump

pub mod analysis;
pub mod assumptions;
pub mod backjump;
pub mod bcp;
pub mod core;
pub mod decision;
pub mod minimization;
pub mod reduction;
pub mod simplify;
pub mod solve;
pub mod theory;
