/*!
Expression trees, lowered to [Polynomial]s.

A [Term] is a tagged tree over variables and constants.
Children are held by [Arc], so a shared subexpression is built once and referenced from each parent.

```rust
# use otter_smt::theory::{Polynomial, Term, Variable};
# use num_rational::BigRational;
# use num_bigint::BigInt;
# use std::sync::Arc;
let x = Arc::new(Term::Variable(Variable::from(0)));
let one = Arc::new(Term::Constant(BigRational::from_integer(BigInt::from(1))));

// (x + 1) * (x + 1), with the sum shared
let sum = Arc::new(Term::Sum(vec![x.clone(), one.clone()]));
let square = Term::Product(vec![sum.clone(), sum]);

let x = Polynomial::variable(Variable::from(0));
let one = Polynomial::constant(BigRational::from_integer(BigInt::from(1)));
assert_eq!(square.to_polynomial(), x.clone() * x.clone() + x.clone() + x + one);
```
*/

use std::sync::Arc;

use num_rational::BigRational;

use crate::theory::{Polynomial, Variable};

/// An expression over theory variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Variable(Variable),
    Constant(BigRational),
    Sum(Vec<Arc<Term>>),
    Product(Vec<Arc<Term>>),
    Negation(Arc<Term>),
}

impl Term {
    /// The polynomial denoted by the term.
    ///
    /// An empty sum is zero and an empty product is one.
    pub fn to_polynomial(&self) -> Polynomial {
        match self {
            Self::Variable(variable) => Polynomial::variable(*variable),
            Self::Constant(value) => Polynomial::constant(value.clone()),
            Self::Sum(terms) => terms
                .iter()
                .fold(Polynomial::zero(), |sum, term| sum + term.to_polynomial()),
            Self::Product(terms) => terms.iter().fold(
                Polynomial::constant(num_traits::One::one()),
                |product, term| product * term.to_polynomial(),
            ),
            Self::Negation(term) => -term.to_polynomial(),
        }
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Term::Variable(variable)
    }
}

impl From<BigRational> for Term {
    fn from(value: BigRational) -> Self {
        Term::Constant(value)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |terms: &[Arc<Term>], symbol: &str| {
            terms
                .iter()
                .map(|term| term.to_string())
                .collect::<Vec<_>>()
                .join(symbol)
        };
        match self {
            Self::Variable(variable) => write!(f, "{variable}"),
            Self::Constant(value) => write!(f, "{value}"),
            Self::Sum(terms) => write!(f, "({})", join(terms, " + ")),
            Self::Product(terms) => write!(f, "({})", join(terms, " * ")),
            Self::Negation(term) => write!(f, "-{term}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use num_traits::Zero;

    #[test]
    fn empty_sum_and_product() {
        assert!(Term::Sum(Vec::default()).to_polynomial().is_zero());
        assert_eq!(
            Term::Product(Vec::default()).to_polynomial().constant_value(),
            Some(BigRational::from_integer(BigInt::from(1)))
        );
    }

    #[test]
    fn negation_cancels() {
        let x = Arc::new(Term::Variable(Variable::from(2)));
        let term = Term::Sum(vec![x.clone(), Arc::new(Term::Negation(x))]);
        assert_eq!(term.to_polynomial().constant_value(), Some(BigRational::zero()));
    }
}
