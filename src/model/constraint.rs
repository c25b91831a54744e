use super::variable::IntVar;
use super::variable::Literal;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Ne,
    Le,
    Ge,
    Lt,
    Gt,
}

impl Relation {
    pub fn negate(self) -> Self {
        match self {
            Relation::Eq => Relation::Ne,
            Relation::Ne => Relation::Eq,
            Relation::Le => Relation::Gt,
            Relation::Ge => Relation::Lt,
            Relation::Lt => Relation::Ge,
            Relation::Gt => Relation::Le,
        }
    }
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Relation::Eq => lhs == rhs,
            Relation::Ne => lhs != rhs,
            Relation::Le => lhs <= rhs,
            Relation::Ge => lhs >= rhs,
            Relation::Lt => lhs < rhs,
            Relation::Gt => lhs > rhs,
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Relation::Eq => write!(f, "=="),
            Relation::Ne => write!(f, "!="),
            Relation::Le => write!(f, "<="),
            Relation::Ge => write!(f, ">="),
            Relation::Lt => write!(f, "<"),
            Relation::Gt => write!(f, ">"),
        }
    }
}

/// Constraint kinds an engine must understand.
///
/// Linear constraints are kept in normal form: sum of terms against a
/// constant, with strict relations already tightened to Le or Ge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Linear {
        terms: Vec<(IntVar, i64)>,
        relation: Relation,
        rhs: i64,
    },
    BoolOr(Vec<Literal>),
    BoolAnd(Vec<Literal>),
    ExactlyOne(Vec<Literal>),
    AllDifferent(Vec<IntVar>),
    MaxEquality {
        target: IntVar,
        vars: Vec<IntVar>,
    },
}

impl Constraint {
    /// sum(terms) relation rhs, with Lt and Gt tightened
    pub fn linear(terms: Vec<(IntVar, i64)>, relation: Relation, rhs: i64) -> Self {
        match relation {
            Relation::Lt => Constraint::Linear {
                terms,
                relation: Relation::Le,
                rhs: rhs - 1,
            },
            Relation::Gt => Constraint::Linear {
                terms,
                relation: Relation::Ge,
                rhs: rhs + 1,
            },
            relation => Constraint::Linear {
                terms,
                relation,
                rhs,
            },
        }
    }

    /// every variable index the constraint reads
    pub fn indices(&self) -> Vec<usize> {
        match self {
            Constraint::Linear { terms, .. } => terms.iter().map(|(v, _)| v.index()).collect(),
            Constraint::BoolOr(lits) | Constraint::BoolAnd(lits) | Constraint::ExactlyOne(lits) => {
                lits.iter().map(|l| l.var().index()).collect()
            }
            Constraint::AllDifferent(vars) => vars.iter().map(|v| v.index()).collect(),
            Constraint::MaxEquality { target, vars } => std::iter::once(target)
                .chain(vars.iter())
                .map(|v| v.index())
                .collect(),
        }
    }

    /// whether a complete assignment satisfies the constraint
    pub fn satisfied(&self, value: impl Fn(usize) -> i64) -> bool {
        let holds = |l: &Literal| value(l.var().index()) == l.polarity();
        match self {
            Constraint::Linear {
                terms,
                relation,
                rhs,
            } => relation.holds(terms.iter().map(|(v, c)| c * value(v.index())).sum(), *rhs),
            Constraint::BoolOr(lits) => lits.iter().any(holds),
            Constraint::BoolAnd(lits) => lits.iter().all(holds),
            Constraint::ExactlyOne(lits) => lits.iter().filter(|l| holds(*l)).count() == 1,
            Constraint::AllDifferent(vars) => {
                let mut values = vars.iter().map(|v| value(v.index())).collect::<Vec<_>>();
                values.sort();
                values.windows(2).all(|w| w[0] != w[1])
            }
            Constraint::MaxEquality { target, vars } => vars
                .iter()
                .map(|v| value(v.index()))
                .max()
                .is_some_and(|m| m == value(target.index())),
        }
    }

    fn remap(self, f: &impl Fn(usize) -> usize) -> Self {
        match self {
            Constraint::Linear {
                terms,
                relation,
                rhs,
            } => Constraint::Linear {
                terms: terms.into_iter().map(|(v, c)| (v.remap(f), c)).collect(),
                relation,
                rhs,
            },
            Constraint::BoolOr(lits) => {
                Constraint::BoolOr(lits.into_iter().map(|l| l.remap(f)).collect())
            }
            Constraint::BoolAnd(lits) => {
                Constraint::BoolAnd(lits.into_iter().map(|l| l.remap(f)).collect())
            }
            Constraint::ExactlyOne(lits) => {
                Constraint::ExactlyOne(lits.into_iter().map(|l| l.remap(f)).collect())
            }
            Constraint::AllDifferent(vars) => {
                Constraint::AllDifferent(vars.into_iter().map(|v| v.remap(f)).collect())
            }
            Constraint::MaxEquality { target, vars } => Constraint::MaxEquality {
                target: target.remap(f),
                vars: vars.into_iter().map(|v| v.remap(f)).collect(),
            },
        }
    }
}

/// A constraint that only has to hold when every enforcement literal is true.
/// An empty enforcement list means the constraint always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enforced {
    pub constraint: Constraint,
    pub enforcement: Vec<Literal>,
}

impl Enforced {
    pub(crate) fn remap(self, f: &impl Fn(usize) -> usize) -> Self {
        Self {
            constraint: self.constraint.remap(f),
            enforcement: self.enforcement.into_iter().map(|l| l.remap(f)).collect(),
        }
    }
    pub fn indices(&self) -> Vec<usize> {
        let mut indices = self.constraint.indices();
        indices.extend(self.enforcement.iter().map(|l| l.var().index()));
        indices.sort();
        indices.dedup();
        indices
    }
    pub fn satisfied(&self, value: impl Fn(usize) -> i64) -> bool {
        let active = self
            .enforcement
            .iter()
            .all(|l| value(l.var().index()) == l.polarity());
        !active || self.constraint.satisfied(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_is_complement() {
        for relation in [
            Relation::Eq,
            Relation::Ne,
            Relation::Le,
            Relation::Ge,
            Relation::Lt,
            Relation::Gt,
        ] {
            assert_eq!(relation.negate().negate(), relation);
            for (a, b) in [(0, 1), (1, 1), (2, 1)] {
                assert_ne!(relation.holds(a, b), relation.negate().holds(a, b));
            }
        }
    }

    #[test]
    fn strict_relations_tighten() {
        let x = IntVar::from(0);
        assert_eq!(
            Constraint::linear(vec![(x, 1)], Relation::Lt, 5),
            Constraint::Linear {
                terms: vec![(x, 1)],
                relation: Relation::Le,
                rhs: 4
            }
        );
        assert_eq!(
            Constraint::linear(vec![(x, 1)], Relation::Gt, 5),
            Constraint::Linear {
                terms: vec![(x, 1)],
                relation: Relation::Ge,
                rhs: 6
            }
        );
    }
}
