/*!
A backend for bounds on single variables.

The bounds backend decides conjunctions of *univariate linear* constraints, i.e. constraints of the form `a*x + b ~ 0` with `a` non-zero.
Each such constraint is read as a bound on `x`:

| Constraint | Reading |
|---|---|
| `x ≤ r`, `x < r` | an upper bound |
| `x ≥ r`, `x > r` | a lower bound |
| `x = r` | a fixed value |
| `x ≠ r` | an excluded value |

For a variable of [Int](crate::theory::Sort::Int) sort, bounds are rounded to integers, an equality with a non-integer value never holds, and a disequality with a non-integer value always holds.

An inconsistency is always explained by a minimal set of constraints: two bounds which cross, a fixed value outside a bound or excluded, a single value left by the bounds and excluded, or every integer between two bounds excluded.

Ground constraints are evaluated directly.
Any other constraint (nonlinear, or linear in many variables) is evaluated at the candidate model built from the bounds.
If each such constraint holds, the answer is [Sat](TheoryAnswer::Sat), and otherwise the answer is [Unknown](TheoryAnswer::Unknown), as some other model may exist.
*/

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::{
    misc::log::targets,
    theory::{
        backend::{AssertionStack, Backend, TheoryAnswer, TheoryModel},
        Constraint, ConstraintKey, ConstraintPool, Relation, Sort, Variable,
    },
    types::err,
};

/// The reading of a univariate linear constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Linear {
    Upper { value: BigRational, strict: bool },
    Lower { value: BigRational, strict: bool },
    Equal(BigRational),
    Excluded(BigRational),
    Never,
    Always,
}

enum Classified {
    Ground(bool),
    Linear(Variable, Linear),
    Other,
}

fn classify(constraint: &Constraint, pool: &ConstraintPool) -> Classified {
    if let Some(value) = constraint.evaluate_ground() {
        return Classified::Ground(value);
    }

    let Some((variable, a, b)) = constraint.polynomial().as_univariate_linear() else {
        return Classified::Other;
    };

    let root = -b / &a;
    let relation = match a.is_positive() {
        true => constraint.relation(),
        false => constraint.relation().flip(),
    };

    let linear = match relation {
        Relation::Leq => Linear::Upper { value: root, strict: false },
        Relation::Less => Linear::Upper { value: root, strict: true },
        Relation::Geq => Linear::Lower { value: root, strict: false },
        Relation::Greater => Linear::Lower { value: root, strict: true },
        Relation::Eq => Linear::Equal(root),
        Relation::Neq => Linear::Excluded(root),
    };

    let linear = match pool.sort_of(variable) {
        Sort::Real => linear,
        Sort::Int => round(linear),
    };

    Classified::Linear(variable, linear)
}

/// Bounds and values over the integers, with every bound non-strict.
fn round(linear: Linear) -> Linear {
    let one = BigRational::one();
    match linear {
        Linear::Upper { value, strict } => {
            let value = match (strict, value.is_integer()) {
                (true, true) => value - one,
                _ => value.floor(),
            };
            Linear::Upper { value, strict: false }
        }
        Linear::Lower { value, strict } => {
            let value = match (strict, value.is_integer()) {
                (true, true) => value + one,
                _ => value.ceil(),
            };
            Linear::Lower { value, strict: false }
        }
        Linear::Equal(value) if !value.is_integer() => Linear::Never,
        Linear::Excluded(value) if !value.is_integer() => Linear::Always,
        other => other,
    }
}

#[derive(Clone, Debug)]
struct Bound {
    value: BigRational,
    strict: bool,
    key: ConstraintKey,
}

/// What is known of a single variable.
#[derive(Default)]
struct Domain {
    lower: Option<Bound>,
    upper: Option<Bound>,
    equal: Option<(BigRational, ConstraintKey)>,
    excluded: Vec<(BigRational, ConstraintKey)>,

    /// An inconsistency found while noting constraints.
    clash: Option<Vec<ConstraintKey>>,
}

impl Domain {
    fn note(&mut self, linear: Linear, key: ConstraintKey) {
        match linear {
            Linear::Upper { value, strict } => {
                let tighter = match &self.upper {
                    None => true,
                    Some(bound) => value < bound.value || (value == bound.value && strict && !bound.strict),
                };
                if tighter {
                    self.upper = Some(Bound { value, strict, key });
                }
            }

            Linear::Lower { value, strict } => {
                let tighter = match &self.lower {
                    None => true,
                    Some(bound) => value > bound.value || (value == bound.value && strict && !bound.strict),
                };
                if tighter {
                    self.lower = Some(Bound { value, strict, key });
                }
            }

            Linear::Equal(value) => match &self.equal {
                None => self.equal = Some((value, key)),
                Some((fixed, fixed_key)) => {
                    if *fixed != value && self.clash.is_none() {
                        self.clash = Some(vec![*fixed_key, key]);
                    }
                }
            },

            Linear::Excluded(value) => self.excluded.push((value, key)),

            Linear::Never => {
                if self.clash.is_none() {
                    self.clash = Some(vec![key]);
                }
            }

            Linear::Always => {}
        }
    }

    fn excluded_key(&self, value: &BigRational) -> Option<ConstraintKey> {
        self.excluded
            .iter()
            .find(|(excluded, _)| excluded == value)
            .map(|(_, key)| *key)
    }

    fn conflict(&self, sort: Sort) -> Option<Vec<ConstraintKey>> {
        if let Some(clash) = &self.clash {
            return Some(clash.clone());
        }

        if let (Some(lower), Some(upper)) = (&self.lower, &self.upper) {
            if lower.value > upper.value
                || (lower.value == upper.value && (lower.strict || upper.strict))
            {
                return Some(vec![lower.key, upper.key]);
            }
        }

        if let Some((value, key)) = &self.equal {
            if let Some(lower) = &self.lower {
                if *value < lower.value || (*value == lower.value && lower.strict) {
                    return Some(vec![*key, lower.key]);
                }
            }
            if let Some(upper) = &self.upper {
                if *value > upper.value || (*value == upper.value && upper.strict) {
                    return Some(vec![*key, upper.key]);
                }
            }
            if let Some(excluded) = self.excluded_key(value) {
                return Some(vec![*key, excluded]);
            }
            return None;
        }

        if let (Some(lower), Some(upper)) = (&self.lower, &self.upper) {
            if lower.value == upper.value {
                if let Some(excluded) = self.excluded_key(&lower.value) {
                    return Some(vec![lower.key, upper.key, excluded]);
                }
            }

            if sort == Sort::Int {
                let span = &upper.value - &lower.value + BigRational::one();
                if span <= BigRational::from_integer(BigInt::from(self.excluded.len())) {
                    let mut explanation = vec![lower.key, upper.key];
                    let mut value = lower.value.clone();
                    while value <= upper.value {
                        match self.excluded_key(&value) {
                            Some(key) => explanation.push(key),
                            None => return None,
                        }
                        value += BigRational::one();
                    }
                    return Some(explanation);
                }
            }
        }

        None
    }

    /// A value for the variable which respects every bound and fixed value, and avoids every excluded value.
    ///
    /// Assumes the domain has no conflict.
    fn candidate(&self, sort: Sort) -> BigRational {
        if let Some((value, _)) = &self.equal {
            return value.clone();
        }

        let tries = self.excluded.len() + 1;
        let one = BigRational::one();
        let step = |i: usize| BigRational::from_integer(BigInt::from(i));

        let candidates: Vec<BigRational> = match (&self.lower, &self.upper, sort) {
            (Some(lower), Some(upper), _) if lower.value == upper.value => vec![lower.value.clone()],

            (Some(lower), Some(upper), Sort::Real) => {
                let width = &upper.value - &lower.value;
                let parts = step(tries + 1);
                (1..=tries)
                    .map(|i| &lower.value + &width * step(i) / &parts)
                    .collect()
            }

            (Some(lower), Some(upper), Sort::Int) => (0..tries)
                .map(|i| &lower.value + step(i))
                .take_while(|value| *value <= upper.value)
                .collect(),

            (Some(lower), None, Sort::Real) => (0..tries).map(|i| &lower.value + &one + step(i)).collect(),
            (Some(lower), None, Sort::Int) => (0..tries).map(|i| &lower.value + step(i)).collect(),

            (None, Some(upper), Sort::Real) => (0..tries).map(|i| &upper.value - &one - step(i)).collect(),
            (None, Some(upper), Sort::Int) => (0..tries).map(|i| &upper.value - step(i)).collect(),

            (None, None, _) => (0..tries).map(step).collect(),
        };

        candidates
            .iter()
            .find(|value| self.excluded_key(value).is_none())
            .or(candidates.first())
            .cloned()
            .unwrap_or_else(BigRational::zero)
    }
}

#[derive(Default)]
pub struct BoundsBackend {
    asserted: AssertionStack,
    explanation: Vec<ConstraintKey>,
    model: Option<TheoryModel>,
}

impl BoundsBackend {
    /// The domains of variables with univariate linear constraints, and the variables of every other constraint.
    fn domains(&self, pool: &ConstraintPool) -> Result<BTreeMap<Variable, Domain>, Vec<ConstraintKey>> {
        let mut domains: BTreeMap<Variable, Domain> = BTreeMap::default();
        for key in self.asserted.as_slice() {
            let Some(constraint) = pool.constraint(*key) else {
                continue;
            };
            match classify(constraint, pool) {
                Classified::Ground(true) => {}
                Classified::Ground(false) => return Err(vec![*key]),
                Classified::Linear(variable, linear) => domains.entry(variable).or_default().note(linear, *key),
                Classified::Other => {
                    for variable in constraint.variables() {
                        domains.entry(variable).or_default();
                    }
                }
            }
        }

        for (variable, domain) in &domains {
            if let Some(explanation) = domain.conflict(pool.sort_of(*variable)) {
                return Err(explanation);
            }
        }
        Ok(domains)
    }
}

impl Backend for BoundsBackend {
    fn name(&self) -> &str {
        "bounds"
    }

    fn inform(&mut self, key: ConstraintKey, pool: &ConstraintPool) -> bool {
        match pool.constraint(key).map(|constraint| classify(constraint, pool)) {
            Some(Classified::Ground(false)) | Some(Classified::Linear(_, Linear::Never)) => false,
            _ => true,
        }
    }

    fn assert(&mut self, key: ConstraintKey, pool: &ConstraintPool) -> bool {
        self.asserted.push(key);
        self.model = None;
        match self.domains(pool) {
            Ok(_) => true,
            Err(explanation) => {
                log::trace!(target: targets::THEORY, "Bounds conflict on assertion of {key}");
                self.explanation = explanation;
                false
            }
        }
    }

    fn check(&mut self, pool: &ConstraintPool) -> TheoryAnswer {
        self.model = None;
        let domains = match self.domains(pool) {
            Ok(domains) => domains,
            Err(explanation) => {
                self.explanation = explanation;
                return TheoryAnswer::Unsat;
            }
        };

        let model: TheoryModel = domains
            .iter()
            .map(|(variable, domain)| (*variable, domain.candidate(pool.sort_of(*variable))))
            .collect();

        let holds = self.asserted.as_slice().iter().all(|key| {
            pool.constraint(*key)
                .and_then(|constraint| constraint.holds_at(&model))
                .unwrap_or(false)
        });

        match holds {
            true => {
                self.model = Some(model);
                TheoryAnswer::Sat
            }
            false => TheoryAnswer::Unknown,
        }
    }

    fn explain(&self) -> Vec<ConstraintKey> {
        self.explanation.clone()
    }

    fn retract(&mut self, key: ConstraintKey, _: &ConstraintPool) -> Result<(), err::TheoryError> {
        self.asserted.pop(key)?;
        self.model = None;
        self.explanation.clear();
        Ok(())
    }

    fn model(&self, _: &ConstraintPool) -> Option<TheoryModel> {
        self.model.clone()
    }

    fn asserted(&self) -> &[ConstraintKey] {
        self.asserted.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::Polynomial;

    fn rational(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    struct Setup {
        pool: ConstraintPool,
        backend: BoundsBackend,
    }

    impl Setup {
        fn new() -> Self {
            Setup {
                pool: ConstraintPool::default(),
                backend: BoundsBackend::default(),
            }
        }

        fn var(&mut self, name: &str, sort: Sort) -> Polynomial {
            Polynomial::variable(self.pool.variable(name, sort))
        }

        /// Asserts `p - c ~ 0`, in normal form.
        fn assert(&mut self, p: &Polynomial, c: BigRational, relation: Relation) -> (ConstraintKey, bool) {
            let constraint = Constraint::new(p.clone() - Polynomial::constant(c), relation).normalize();
            let key = self.pool.intern(constraint);
            let consistent = self.backend.assert(key, &self.pool);
            (key, consistent)
        }

        fn check(&mut self) -> TheoryAnswer {
            self.backend.check(&self.pool)
        }
    }

    #[test]
    fn crossing_bounds() {
        let mut setup = Setup::new();
        let x = setup.var("x", Sort::Real);
        let (a, _) = setup.assert(&x, rational(0, 1), Relation::Leq);
        let (_, _) = setup.assert(&x, rational(-5, 1), Relation::Geq);
        let (c, consistent) = setup.assert(&x, rational(1, 1), Relation::Geq);

        assert!(!consistent);
        assert_eq!(setup.check(), TheoryAnswer::Unsat);
        let mut explanation = setup.backend.explain();
        explanation.sort();
        assert_eq!(explanation, vec![a, c]);
    }

    #[test]
    fn strict_bounds_meet() {
        let mut setup = Setup::new();
        let x = setup.var("x", Sort::Real);
        setup.assert(&x, rational(0, 1), Relation::Leq);
        setup.assert(&x, rational(0, 1), Relation::Greater);
        assert_eq!(setup.check(), TheoryAnswer::Unsat);
        assert_eq!(setup.backend.explain().len(), 2);
    }

    #[test]
    fn model_avoids_excluded_values() {
        let mut setup = Setup::new();
        let x = setup.var("x", Sort::Real);
        setup.assert(&x, rational(0, 1), Relation::Geq);
        setup.assert(&x, rational(1, 1), Relation::Leq);
        setup.assert(&x, rational(1, 2), Relation::Neq);
        setup.assert(&x, rational(1, 3), Relation::Neq);

        assert_eq!(setup.check(), TheoryAnswer::Sat);
        let model = setup.backend.model(&setup.pool).unwrap();
        let value = model.values().next().unwrap().clone();
        assert!(value >= rational(0, 1) && value <= rational(1, 1));
        assert_ne!(value, rational(1, 2));
        assert_ne!(value, rational(1, 3));
    }

    #[test]
    fn pinned_and_excluded() {
        let mut setup = Setup::new();
        let x = setup.var("x", Sort::Real);
        setup.assert(&x, rational(2, 1), Relation::Geq);
        setup.assert(&x, rational(2, 1), Relation::Leq);
        setup.assert(&x, rational(2, 1), Relation::Neq);
        assert_eq!(setup.check(), TheoryAnswer::Unsat);
        assert_eq!(setup.backend.explain().len(), 3);
    }

    #[test]
    fn integer_rounding() {
        let mut setup = Setup::new();
        let n = setup.var("n", Sort::Int);
        setup.assert(&n, rational(1, 2), Relation::Greater);
        setup.assert(&n, rational(3, 2), Relation::Less);
        assert_eq!(setup.check(), TheoryAnswer::Sat);
        let model = setup.backend.model(&setup.pool).unwrap();
        assert_eq!(model.values().next(), Some(&rational(1, 1)));

        let (_, consistent) = setup.assert(&n, rational(1, 1), Relation::Neq);
        assert!(!consistent);
        assert_eq!(setup.backend.explain().len(), 3);
    }

    #[test]
    fn integer_equality_with_fraction() {
        let mut setup = Setup::new();
        let n = setup.var("n", Sort::Int);
        let constraint = Constraint::new(n.clone() - Polynomial::constant(rational(1, 2)), Relation::Eq).normalize();
        let key = setup.pool.intern(constraint);
        assert!(!setup.backend.inform(key, &setup.pool));

        let (key, consistent) = setup.assert(&n, rational(1, 2), Relation::Eq);
        assert!(!consistent);
        assert_eq!(setup.backend.explain(), vec![key]);
    }

    #[test]
    fn fixed_value_outside_bound() {
        let mut setup = Setup::new();
        let x = setup.var("x", Sort::Real);
        let (a, _) = setup.assert(&x, rational(3, 1), Relation::Eq);
        setup.assert(&x, rational(-1, 1), Relation::Geq);
        let (c, _) = setup.assert(&x, rational(2, 1), Relation::Leq);
        assert_eq!(setup.check(), TheoryAnswer::Unsat);
        assert_eq!(setup.backend.explain(), vec![a, c]);
    }

    #[test]
    fn nonlinear_at_candidate() {
        let mut setup = Setup::new();
        let x = setup.var("x", Sort::Real);
        let y = setup.var("y", Sort::Real);
        setup.assert(&x, rational(2, 1), Relation::Eq);
        setup.assert(&y, rational(3, 1), Relation::Eq);

        // x*y ≥ 6 holds at the fixed values
        let (key, _) = setup.assert(&(x.clone() * y.clone()), rational(6, 1), Relation::Geq);
        assert_eq!(setup.check(), TheoryAnswer::Sat);

        // x*y < 6 does not, though nothing is learnt of why
        setup.backend.retract(key, &setup.pool).unwrap();
        setup.assert(&(x * y), rational(6, 1), Relation::Less);
        assert_eq!(setup.check(), TheoryAnswer::Unknown);
        assert!(setup.backend.model(&setup.pool).is_none());
    }

    #[test]
    fn retract_restores_consistency() {
        let mut setup = Setup::new();
        let x = setup.var("x", Sort::Real);
        setup.assert(&x, rational(0, 1), Relation::Leq);
        let (b, consistent) = setup.assert(&x, rational(0, 1), Relation::Greater);
        assert!(!consistent);

        assert!(setup.backend.retract(b, &setup.pool).is_ok());
        assert_eq!(setup.check(), TheoryAnswer::Sat);
        assert_eq!(setup.backend.asserted().len(), 1);
    }
}
