/*!
The theory layer: arithmetic constraints, their abstraction to Boolean literals, and the backends which decide them.

- [Variables](variable) and [polynomials](polynomial) with exact rational coefficients, built directly or from [terms](term).
- [Constraints](constraint), a polynomial related to zero, with negation as a fixed table of relations and a normal form.
- The [constraint pool](pool), interning variables and constraints for a context.
- The [abstraction map](abstraction), between literals and interned constraints.
- The [backend](backend) contract, a [pipeline](pipeline) of backends, and a [bounds](bounds) backend.
- The [boundary](boundary) between the trail and a backend.
*/

pub mod abstraction;
pub mod backend;
pub mod boundary;
pub mod bounds;
pub mod constraint;
pub mod pipeline;
pub mod polynomial;
pub mod pool;
pub mod term;
pub mod variable;

pub use abstraction::{Abstraction, AbstractionMap};
pub use backend::{AssertionStack, Backend, TheoryAnswer, TheoryModel};
pub use boundary::{Passed, TheoryBoundary};
pub use bounds::BoundsBackend;
pub use constraint::{Constraint, Relation};
pub use pipeline::Pipeline;
pub use polynomial::{Monomial, Polynomial};
pub use pool::{ConstraintKey, ConstraintPool};
pub use term::Term;
pub use variable::{Sort, Variable};
