use super::variable::BoolVar;
use super::variable::IntVar;
use super::variable::Literal;
use std::collections::BTreeMap;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

/// sum of coefficient * variable, plus a constant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(IntVar, i64)>,
    constant: i64,
}

impl LinearExpr {
    pub fn weighted(terms: impl IntoIterator<Item = (IntVar, i64)>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            constant: 0,
        }
    }
    pub fn terms(&self) -> &[(IntVar, i64)] {
        &self.terms
    }
    pub fn constant(&self) -> i64 {
        self.constant
    }

    /// one term per variable, sorted, zero coefficients dropped
    pub fn collapse(self) -> (Vec<(IntVar, i64)>, i64) {
        let mut merged = BTreeMap::<IntVar, i64>::new();
        for (var, coef) in self.terms {
            *merged.entry(var).or_default() += coef;
        }
        let terms = merged.into_iter().filter(|(_, c)| *c != 0).collect();
        (terms, self.constant)
    }
}

impl From<IntVar> for LinearExpr {
    fn from(var: IntVar) -> Self {
        Self {
            terms: vec![(var, 1)],
            constant: 0,
        }
    }
}
impl From<BoolVar> for LinearExpr {
    fn from(var: BoolVar) -> Self {
        Self::from(IntVar::from(var))
    }
}
/// a negated literal reads as 1 - var
impl From<Literal> for LinearExpr {
    fn from(lit: Literal) -> Self {
        let var = IntVar::from(lit.var());
        if lit.negated() {
            Self {
                terms: vec![(var, -1)],
                constant: 1,
            }
        } else {
            Self::from(var)
        }
    }
}
impl From<i64> for LinearExpr {
    fn from(constant: i64) -> Self {
        Self {
            terms: vec![],
            constant,
        }
    }
}

impl<T: Into<LinearExpr>> Add<T> for LinearExpr {
    type Output = LinearExpr;
    fn add(mut self, rhs: T) -> LinearExpr {
        let rhs = rhs.into();
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}
impl<T: Into<LinearExpr>> Sub<T> for LinearExpr {
    type Output = LinearExpr;
    fn sub(self, rhs: T) -> LinearExpr {
        self + -rhs.into()
    }
}
impl Mul<i64> for LinearExpr {
    type Output = LinearExpr;
    fn mul(self, k: i64) -> LinearExpr {
        Self {
            terms: self.terms.into_iter().map(|(v, c)| (v, c * k)).collect(),
            constant: self.constant * k,
        }
    }
}
impl Neg for LinearExpr {
    type Output = LinearExpr;
    fn neg(self) -> LinearExpr {
        self * -1
    }
}
impl<T: Into<LinearExpr>> std::iter::Sum<T> for LinearExpr {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(LinearExpr::default(), |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_merges_and_drops() {
        let x = IntVar::from(0);
        let y = IntVar::from(1);
        let expr = LinearExpr::from(y) * 3 + x - y + 4i64 - LinearExpr::from(x) + 2i64;
        let (terms, constant) = expr.collapse();
        assert_eq!(terms, vec![(y, 2)]);
        assert_eq!(constant, 6);
    }

    #[test]
    fn negated_literal() {
        let b = BoolVar::from(7);
        let (terms, constant) = LinearExpr::from(!b).collapse();
        assert_eq!(terms, vec![(IntVar::from(7), -1)]);
        assert_eq!(constant, 1);
    }

    #[test]
    fn sums() {
        let vars = (0..3).map(IntVar::from).collect::<Vec<_>>();
        let (terms, _) = vars.iter().copied().sum::<LinearExpr>().collapse();
        assert_eq!(terms.len(), 3);
        assert!(terms.iter().all(|(_, c)| *c == 1));
    }
}
