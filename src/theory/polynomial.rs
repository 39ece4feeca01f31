/*!
Polynomials with exact rational coefficients.

A [Polynomial] is a sparse sum of [Monomial]s, each with a non-zero [BigRational] coefficient.
The representation is canonical, so two polynomials are equal exactly when they are equal as functions.

Monomials are ordered by degree and then by variables, and the *leading* monomial of a polynomial is the greatest.
So, a constant is never the leading monomial of a polynomial with a variable.

```rust
# use otter_smt::theory::{Polynomial, Variable};
# use num_rational::BigRational;
# use num_bigint::BigInt;
# use std::collections::BTreeMap;
let x = Polynomial::variable(Variable::from(0));
let two = Polynomial::constant(BigRational::from_integer(BigInt::from(2)));

let p = x.clone() * x.clone() - two.clone() * x.clone();
let q = x.clone() * (x.clone() - two);
assert_eq!(p, q);

let assignment = BTreeMap::from([(Variable::from(0), BigRational::from_integer(BigInt::from(3)))]);
assert_eq!(p.evaluate(&assignment), Some(BigRational::from_integer(BigInt::from(3))));
```
*/

use std::collections::{BTreeMap, BTreeSet};

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::theory::Variable;

/// A product of variables, each raised to a positive power.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Monomial {
    /// Pairs of variables and exponents, ordered by variable, with each exponent positive.
    powers: Vec<(Variable, u32)>,
}

impl Monomial {
    /// The empty product.
    pub fn one() -> Self {
        Monomial::default()
    }

    pub fn variable(variable: Variable) -> Self {
        Monomial {
            powers: vec![(variable, 1)],
        }
    }

    pub fn powers(&self) -> &[(Variable, u32)] {
        &self.powers
    }

    /// The sum of the exponents.
    pub fn degree(&self) -> u32 {
        self.powers.iter().map(|(_, exponent)| exponent).sum()
    }

    pub fn is_constant(&self) -> bool {
        self.powers.is_empty()
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.powers.iter().map(|(variable, _)| *variable)
    }

    /// The product of two monomials.
    pub fn product(&self, other: &Monomial) -> Monomial {
        let mut powers = Vec::with_capacity(self.powers.len() + other.powers.len());
        let (mut i, mut j) = (0, 0);
        while i < self.powers.len() && j < other.powers.len() {
            let (a, m) = self.powers[i];
            let (b, n) = other.powers[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => {
                    powers.push((a, m));
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    powers.push((b, n));
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    powers.push((a, m + n));
                    i += 1;
                    j += 1;
                }
            }
        }
        powers.extend_from_slice(&self.powers[i..]);
        powers.extend_from_slice(&other.powers[j..]);
        Monomial { powers }
    }

    /// The value of the monomial, if every variable has a value.
    pub fn evaluate(&self, assignment: &BTreeMap<Variable, BigRational>) -> Option<BigRational> {
        let mut value = BigRational::one();
        for (variable, exponent) in &self.powers {
            let base = assignment.get(variable)?;
            value *= num_traits::pow(base.clone(), *exponent as usize);
        }
        Some(value)
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.degree()
            .cmp(&other.degree())
            .then_with(|| self.powers.cmp(&other.powers))
    }
}

impl std::fmt::Display for Monomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self
            .powers
            .iter()
            .map(|(variable, exponent)| match exponent {
                1 => format!("{variable}"),
                _ => format!("{variable}^{exponent}"),
            })
            .collect::<Vec<_>>();
        write!(f, "{}", parts.join("*"))
    }
}

/// A sum of monomials with non-zero rational coefficients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Polynomial::default()
    }

    pub fn constant(value: BigRational) -> Self {
        let mut polynomial = Polynomial::zero();
        polynomial.add_term(Monomial::one(), value);
        polynomial
    }

    pub fn variable(variable: Variable) -> Self {
        let mut polynomial = Polynomial::zero();
        polynomial.add_term(Monomial::variable(variable), BigRational::one());
        polynomial
    }

    /// Adds `coefficient * monomial` to the polynomial, dropping the monomial if the coefficient becomes zero.
    pub fn add_term(&mut self, monomial: Monomial, coefficient: BigRational) {
        if coefficient.is_zero() {
            return;
        }
        match self.terms.entry(monomial) {
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(coefficient);
            }
            std::collections::btree_map::Entry::Occupied(mut entry) => {
                *entry.get_mut() += coefficient;
                if entry.get().is_zero() {
                    entry.remove();
                }
            }
        }
    }

    /// The terms of the polynomial, from the least monomial to the leading monomial.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether the polynomial has no variables.
    pub fn is_constant(&self) -> bool {
        self.terms.keys().all(|monomial| monomial.is_constant())
    }

    /// The value of a constant polynomial.
    pub fn constant_value(&self) -> Option<BigRational> {
        match self.is_constant() {
            true => Some(
                self.terms
                    .get(&Monomial::one())
                    .cloned()
                    .unwrap_or_else(BigRational::zero),
            ),
            false => None,
        }
    }

    /// The coefficient of the leading monomial, if the polynomial is not zero.
    pub fn leading_coefficient(&self) -> Option<&BigRational> {
        self.terms.last_key_value().map(|(_, coefficient)| coefficient)
    }

    pub fn degree(&self) -> u32 {
        self.terms
            .last_key_value()
            .map(|(monomial, _)| monomial.degree())
            .unwrap_or(0)
    }

    /// Every variable occurring in the polynomial.
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.terms
            .keys()
            .flat_map(|monomial| monomial.variables())
            .collect()
    }

    /// The polynomial with every coefficient multiplied by `factor`.
    pub fn scale(&self, factor: &BigRational) -> Polynomial {
        let mut scaled = Polynomial::zero();
        for (monomial, coefficient) in &self.terms {
            scaled.add_term(monomial.clone(), coefficient * factor);
        }
        scaled
    }

    /// The value of the polynomial, if every variable has a value.
    pub fn evaluate(&self, assignment: &BTreeMap<Variable, BigRational>) -> Option<BigRational> {
        let mut value = BigRational::zero();
        for (monomial, coefficient) in &self.terms {
            value += monomial.evaluate(assignment)? * coefficient;
        }
        Some(value)
    }

    /// The polynomial as `a*x + b` with `a` non-zero, if the polynomial has this form.
    pub fn as_univariate_linear(&self) -> Option<(Variable, BigRational, BigRational)> {
        let mut linear = None;
        let mut constant = BigRational::zero();
        for (monomial, coefficient) in &self.terms {
            match monomial.powers() {
                [] => constant = coefficient.clone(),
                [(variable, 1)] if linear.is_none() => linear = Some((*variable, coefficient.clone())),
                _ => return None,
            }
        }
        linear.map(|(variable, coefficient)| (variable, coefficient, constant))
    }

    /// Whether the polynomial has positive leading coefficient.
    pub fn is_leading_positive(&self) -> bool {
        self.leading_coefficient()
            .is_some_and(|coefficient| coefficient.is_positive())
    }
}

impl std::ops::Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        let terms = self
            .terms
            .into_iter()
            .map(|(monomial, coefficient)| (monomial, -coefficient))
            .collect();
        Polynomial { terms }
    }
}

impl std::ops::Add for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: Polynomial) -> Self::Output {
        for (monomial, coefficient) in rhs.terms {
            self.add_term(monomial, coefficient);
        }
        self
    }
}

impl std::ops::Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Self::Output {
        self + (-rhs)
    }
}

impl std::ops::Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Self::Output {
        let mut product = Polynomial::zero();
        for (a, x) in &self.terms {
            for (b, y) in &rhs.terms {
                product.add_term(a.product(b), x * y);
            }
        }
        product
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let parts = self
            .terms
            .iter()
            .rev()
            .map(|(monomial, coefficient)| {
                if monomial.is_constant() {
                    format!("{coefficient}")
                } else if coefficient.is_one() {
                    format!("{monomial}")
                } else if (-coefficient).is_one() {
                    format!("-{monomial}")
                } else {
                    format!("{coefficient}*{monomial}")
                }
            })
            .collect::<Vec<_>>();
        write!(f, "{}", parts.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rational(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn x() -> Polynomial {
        Polynomial::variable(Variable::from_index(0))
    }

    fn y() -> Polynomial {
        Polynomial::variable(Variable::from_index(1))
    }

    #[test]
    fn cancellation() {
        let p = x() + y() - x();
        assert_eq!(p, y());
        assert!((x() - x()).is_zero());
        assert_eq!((x() - x()).constant_value(), Some(BigRational::zero()));
    }

    #[test]
    fn leading_monomial_is_of_highest_degree() {
        let p = Polynomial::constant(rational(5, 1)) + x().scale(&rational(-3, 1)) + (x() * y()).scale(&rational(2, 1));
        assert_eq!(p.leading_coefficient(), Some(&rational(2, 1)));
        assert_eq!(p.degree(), 2);
        assert_eq!(p.variables().len(), 2);
    }

    #[test]
    fn univariate_linear() {
        let p = x().scale(&rational(-1, 2)) + Polynomial::constant(rational(3, 1));
        assert_eq!(
            p.as_univariate_linear(),
            Some((Variable::from_index(0), rational(-1, 2), rational(3, 1)))
        );
        assert_eq!((x() + y()).as_univariate_linear(), None);
        assert_eq!((x() * x()).as_univariate_linear(), None);
        assert_eq!(Polynomial::constant(rational(1, 1)).as_univariate_linear(), None);
    }

    #[test]
    fn evaluation() {
        let p = x() * x() * y() - Polynomial::constant(rational(1, 3));
        let assignment = BTreeMap::from([
            (Variable::from_index(0), rational(2, 1)),
            (Variable::from_index(1), rational(1, 2)),
        ]);
        assert_eq!(p.evaluate(&assignment), Some(rational(5, 3)));

        let partial = BTreeMap::from([(Variable::from_index(0), rational(2, 1))]);
        assert_eq!(p.evaluate(&partial), None);
    }

    #[test]
    fn display() {
        let p = x() * x() - x().scale(&rational(1, 2)) + Polynomial::constant(rational(-4, 1));
        assert_eq!(format!("{p}"), "v0^2 + -1/2*v0 + -4");
    }
}
