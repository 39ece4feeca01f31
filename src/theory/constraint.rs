/*!
Constraints, a polynomial related to zero.

A [Constraint] pairs a [Polynomial] with a [Relation], and states `polynomial relation 0`.

# Negation

Negation of a constraint is negation of the relation, and never a wrapper:

| Relation | Negation |
|---|---|
| `=` | `≠` |
| `≠` | `=` |
| `<` | `≥` |
| `≥` | `<` |
| `>` | `≤` |
| `≤` | `>` |

# Normal form

A constraint in normal form has one of the relations `=`, `≠`, `<`, `≤`:
- `p ≥ 0` is written `-p ≤ 0`, and `p > 0` is written `-p < 0`.
- The polynomial of an inequality is divided by the absolute value of its leading coefficient.
- The polynomial of an equality or disequality is divided by its leading coefficient.

So, two constraints which differ only by a positive factor, or by the side of a comparison, have the same normal form.

```rust
# use otter_smt::theory::{Constraint, Polynomial, Relation, Variable};
# use num_rational::BigRational;
# use num_bigint::BigInt;
let x = Polynomial::variable(Variable::from(0));
let two = BigRational::from_integer(BigInt::from(2));

let a = Constraint::new(x.scale(&two), Relation::Geq).normalize();
let b = Constraint::new(-x.clone(), Relation::Leq).normalize();
assert_eq!(a, b);

let c = Constraint::new(x, Relation::Greater).negate().normalize();
assert_eq!(c.relation(), Relation::Leq);
```
*/

use std::collections::BTreeMap;

use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::{
    theory::{Polynomial, Variable},
    types::err,
};

/// A relation to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    Eq,
    Neq,
    Less,
    Greater,
    Leq,
    Geq,
}

impl Relation {
    /// The relation which holds exactly when `self` does not.
    pub fn negation(&self) -> Relation {
        match self {
            Self::Eq => Self::Neq,
            Self::Neq => Self::Eq,
            Self::Less => Self::Geq,
            Self::Geq => Self::Less,
            Self::Greater => Self::Leq,
            Self::Leq => Self::Greater,
        }
    }

    /// The relation which holds of `-p` exactly when `self` holds of `p`.
    pub fn flip(&self) -> Relation {
        match self {
            Self::Eq => Self::Eq,
            Self::Neq => Self::Neq,
            Self::Less => Self::Greater,
            Self::Greater => Self::Less,
            Self::Leq => Self::Geq,
            Self::Geq => Self::Leq,
        }
    }

    /// Whether the relation holds of a value with the given comparison to zero.
    pub fn holds(&self, comparison: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering;
        match self {
            Self::Eq => comparison == Ordering::Equal,
            Self::Neq => comparison != Ordering::Equal,
            Self::Less => comparison == Ordering::Less,
            Self::Greater => comparison == Ordering::Greater,
            Self::Leq => comparison != Ordering::Greater,
            Self::Geq => comparison != Ordering::Less,
        }
    }

    /// Whether the relation is the positive member of a pair of normal forms, i.e. `=` or `≤`.
    pub fn is_pair_positive(&self) -> bool {
        matches!(self, Self::Eq | Self::Leq)
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Less | Self::Greater)
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Neq => write!(f, "!="),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::Leq => write!(f, "<="),
            Self::Geq => write!(f, ">="),
        }
    }
}

impl std::str::FromStr for Relation {
    type Err = err::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "==" => Ok(Self::Eq),
            "!=" | "<>" | "≠" => Ok(Self::Neq),
            "<" => Ok(Self::Less),
            ">" => Ok(Self::Greater),
            "<=" | "≤" => Ok(Self::Leq),
            ">=" | "≥" => Ok(Self::Geq),
            _ => Err(err::ParseError::Relation(s.to_string())),
        }
    }
}

/// A polynomial related to zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Constraint {
    polynomial: Polynomial,
    relation: Relation,
}

impl Constraint {
    pub fn new(polynomial: Polynomial, relation: Relation) -> Self {
        Constraint {
            polynomial,
            relation,
        }
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// The constraint which holds exactly when `self` does not.
    pub fn negate(self) -> Self {
        Constraint {
            relation: self.relation.negation(),
            polynomial: self.polynomial,
        }
    }

    /// The normal form of the constraint.
    pub fn normalize(self) -> Self {
        let (polynomial, relation) = match self.relation {
            Relation::Geq | Relation::Greater => (-self.polynomial, self.relation.flip()),
            _ => (self.polynomial, self.relation),
        };

        if polynomial.is_constant() {
            return Constraint {
                polynomial,
                relation,
            };
        }

        let factor = match polynomial.leading_coefficient() {
            Some(leading) => match relation {
                Relation::Eq | Relation::Neq => leading.recip(),
                _ => leading.abs().recip(),
            },
            None => return Constraint::new(polynomial, relation),
        };

        Constraint {
            polynomial: polynomial.scale(&factor),
            relation,
        }
    }

    /// Whether the constraint has no variables.
    pub fn is_ground(&self) -> bool {
        self.polynomial.is_constant()
    }

    /// The truth value of a ground constraint.
    pub fn evaluate_ground(&self) -> Option<bool> {
        let value = self.polynomial.constant_value()?;
        Some(self.relation.holds(value.cmp(&BigRational::zero())))
    }

    /// The truth value of the constraint on an assignment, if every variable has a value.
    pub fn holds_at(&self, assignment: &BTreeMap<Variable, BigRational>) -> Option<bool> {
        let value = self.polynomial.evaluate(assignment)?;
        Some(self.relation.holds(value.cmp(&BigRational::zero())))
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        self.polynomial.variables().into_iter()
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} 0", self.polynomial, self.relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use std::str::FromStr;

    fn rational(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn x() -> Polynomial {
        Polynomial::variable(Variable::from(0))
    }

    const RELATIONS: [Relation; 6] = [
        Relation::Eq,
        Relation::Neq,
        Relation::Less,
        Relation::Greater,
        Relation::Leq,
        Relation::Geq,
    ];

    #[test]
    fn negation_is_complement() {
        use std::cmp::Ordering;
        for relation in RELATIONS {
            assert_eq!(relation.negation().negation(), relation);
            for comparison in [Ordering::Less, Ordering::Equal, Ordering::Greater] {
                assert_ne!(relation.holds(comparison), relation.negation().holds(comparison));
                assert_eq!(relation.holds(comparison), relation.flip().holds(comparison.reverse()));
            }
        }
    }

    #[test]
    fn normal_forms_are_pairs() {
        let p = x().scale(&rational(3)) - Polynomial::constant(rational(6));
        for relation in RELATIONS {
            let normal = Constraint::new(p.clone(), relation).normalize();
            assert!(matches!(
                normal.relation(),
                Relation::Eq | Relation::Neq | Relation::Less | Relation::Leq
            ));

            let negated = normal.clone().negate().normalize();
            assert_ne!(normal.relation().is_pair_positive(), negated.relation().is_pair_positive());
            assert_eq!(negated.negate().normalize(), normal);
        }
    }

    #[test]
    fn equalities_have_positive_leading_coefficient() {
        let p = Polynomial::constant(rational(4)) - x().scale(&rational(2));
        let normal = Constraint::new(p, Relation::Eq).normalize();
        assert_eq!(normal.polynomial().leading_coefficient(), Some(&rational(1)));
        let root = BTreeMap::from([(Variable::from(0), rational(2))]);
        assert_eq!(normal.polynomial().evaluate(&root), Some(rational(0)));
    }

    #[test]
    fn ground() {
        let c = Constraint::new(Polynomial::constant(rational(-1)), Relation::Geq).normalize();
        assert!(c.is_ground());
        assert_eq!(c.evaluate_ground(), Some(false));
        assert_eq!(Constraint::new(x(), Relation::Leq).evaluate_ground(), None);
    }

    #[test]
    fn holds_at() {
        let c = Constraint::new(x() - Polynomial::constant(rational(1)), Relation::Geq);
        let assignment = BTreeMap::from([(Variable::from(0), rational(1))]);
        assert_eq!(c.holds_at(&assignment), Some(true));
        assert_eq!(c.clone().negate().holds_at(&assignment), Some(false));
        assert_eq!(c.holds_at(&BTreeMap::default()), None);
    }

    #[test]
    fn parse() {
        assert_eq!(Relation::from_str("<="), Ok(Relation::Leq));
        assert_eq!(Relation::from_str("!="), Ok(Relation::Neq));
        assert_eq!(
            Relation::from_str("=>"),
            Err(err::ParseError::Relation("=>".to_string()))
        );
        for relation in RELATIONS {
            assert_eq!(Relation::from_str(&relation.to_string()), Ok(relation));
        }
    }
}
