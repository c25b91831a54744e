use super::constraint::Constraint;
use super::constraint::Enforced;
use super::constraint::Relation;
use super::expr::LinearExpr;
use super::variable::BoolVar;
use super::variable::IntVar;
use super::variable::Literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueOrder {
    Ascending,
    Descending,
}

/// Variables the engine should branch on first, in order, with a preferred
/// value order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub vars: Vec<IntVar>,
    pub order: ValueOrder,
}

/// An engine-agnostic constraint model.
///
/// Every encoding component writes into a `&mut Model`. Variables are plain
/// indices with an inclusive integer domain. A model can be forked into a
/// fragment that shares all existing variables, filled independently, and
/// merged back; fragment-local variables are renumbered on merge.
#[derive(Debug, Clone, Default)]
pub struct Model {
    domains: Vec<(i64, i64)>,
    constraints: Vec<Enforced>,
    strategies: Vec<Strategy>,
    base: usize,
}

/// Handle returned by every `add_*` call, used to attach enforcement literals.
pub struct Enforcement<'a> {
    model: &'a mut Model,
    index: usize,
}

impl Enforcement<'_> {
    pub fn only_enforce_if<L: Into<Literal>>(self, lits: impl IntoIterator<Item = L>) {
        self.model.constraints[self.index]
            .enforcement
            .extend(lits.into_iter().map(Into::into));
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
    pub fn domains(&self) -> &[(i64, i64)] {
        &self.domains
    }
    pub fn domain(&self, var: impl Into<IntVar>) -> (i64, i64) {
        self.domains[var.into().index()]
    }
    pub fn constraints(&self) -> &[Enforced] {
        &self.constraints
    }
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }
    pub fn num_booleans(&self) -> usize {
        self.domains.iter().filter(|d| **d == (0, 1)).count()
    }

    // ========================================================================
    // variables
    // ========================================================================
    pub fn new_int_var(&mut self, lo: i64, hi: i64) -> IntVar {
        assert!(lo <= hi, "empty domain [{}, {}]", lo, hi);
        self.domains.push((lo, hi));
        IntVar::from(self.domains.len() - 1)
    }
    pub fn new_bool_var(&mut self) -> BoolVar {
        BoolVar::from(self.new_int_var(0, 1).index())
    }
    pub fn new_constant(&mut self, value: i64) -> IntVar {
        self.new_int_var(value, value)
    }

    // ========================================================================
    // constraints
    // ========================================================================
    fn push(&mut self, constraint: Constraint) -> Enforcement<'_> {
        self.constraints.push(Enforced {
            constraint,
            enforcement: vec![],
        });
        let index = self.constraints.len() - 1;
        Enforcement { model: self, index }
    }

    pub fn add_linear(
        &mut self,
        lhs: impl Into<LinearExpr>,
        relation: Relation,
        rhs: impl Into<LinearExpr>,
    ) -> Enforcement<'_> {
        let (terms, constant) = (lhs.into() - rhs.into()).collapse();
        self.push(Constraint::linear(terms, relation, -constant))
    }
    pub fn add_eq(&mut self, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Enforcement<'_> {
        self.add_linear(lhs, Relation::Eq, rhs)
    }
    pub fn add_ne(&mut self, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Enforcement<'_> {
        self.add_linear(lhs, Relation::Ne, rhs)
    }
    pub fn add_le(&mut self, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Enforcement<'_> {
        self.add_linear(lhs, Relation::Le, rhs)
    }
    pub fn add_ge(&mut self, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Enforcement<'_> {
        self.add_linear(lhs, Relation::Ge, rhs)
    }
    pub fn add_lt(&mut self, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Enforcement<'_> {
        self.add_linear(lhs, Relation::Lt, rhs)
    }
    pub fn add_gt(&mut self, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Enforcement<'_> {
        self.add_linear(lhs, Relation::Gt, rhs)
    }

    pub fn add_bool_or<L: Into<Literal>>(&mut self, lits: impl IntoIterator<Item = L>) -> Enforcement<'_> {
        let lits = lits.into_iter().map(Into::into).collect();
        self.push(Constraint::BoolOr(lits))
    }
    pub fn add_bool_and<L: Into<Literal>>(&mut self, lits: impl IntoIterator<Item = L>) -> Enforcement<'_> {
        let lits = lits.into_iter().map(Into::into).collect();
        self.push(Constraint::BoolAnd(lits))
    }
    pub fn add_exactly_one<L: Into<Literal>>(&mut self, lits: impl IntoIterator<Item = L>) -> Enforcement<'_> {
        let lits = lits.into_iter().map(Into::into).collect();
        self.push(Constraint::ExactlyOne(lits))
    }
    /// a => b
    pub fn add_implication(&mut self, a: impl Into<Literal>, b: impl Into<Literal>) {
        let a: Literal = a.into();
        let b: Literal = b.into();
        self.add_bool_and([b]).only_enforce_if([a]);
    }
    pub fn add_all_different(&mut self, vars: impl IntoIterator<Item = IntVar>) -> Enforcement<'_> {
        self.push(Constraint::AllDifferent(vars.into_iter().collect()))
    }
    /// target == max(vars)
    pub fn add_max_equality(
        &mut self,
        target: IntVar,
        vars: impl IntoIterator<Item = IntVar>,
    ) -> Enforcement<'_> {
        let vars = vars.into_iter().collect::<Vec<_>>();
        assert!(!vars.is_empty(), "max of nothing");
        self.push(Constraint::MaxEquality { target, vars })
    }
    pub fn add_decision_strategy<V: Into<IntVar>>(
        &mut self,
        vars: impl IntoIterator<Item = V>,
        order: ValueOrder,
    ) {
        self.strategies.push(Strategy {
            vars: vars.into_iter().map(Into::into).collect(),
            order,
        });
    }

    // ========================================================================
    // reification
    // ========================================================================
    /// b <=> (lhs relation rhs)
    pub fn reify(
        &mut self,
        lhs: impl Into<LinearExpr>,
        relation: Relation,
        rhs: impl Into<LinearExpr>,
    ) -> BoolVar {
        let expr = lhs.into() - rhs.into();
        let b = self.new_bool_var();
        self.add_linear(expr.clone(), relation, 0i64)
            .only_enforce_if([b]);
        self.add_linear(expr, relation.negate(), 0i64)
            .only_enforce_if([!b]);
        b
    }
    /// b <=> AND(lits)
    pub fn reify_and<L: Into<Literal>>(&mut self, lits: impl IntoIterator<Item = L>) -> BoolVar {
        let lits = lits.into_iter().map(Into::into).collect::<Vec<Literal>>();
        let b = self.new_bool_var();
        self.add_bool_and(lits.iter().copied()).only_enforce_if([b]);
        self.add_bool_or(lits.iter().map(|l| !*l)).only_enforce_if([!b]);
        b
    }
    /// b <=> OR(lits)
    pub fn reify_or<L: Into<Literal>>(&mut self, lits: impl IntoIterator<Item = L>) -> BoolVar {
        let lits = lits.into_iter().map(Into::into).collect::<Vec<Literal>>();
        let b = self.new_bool_var();
        self.add_bool_or(lits.iter().copied()).only_enforce_if([b]);
        self.add_bool_and(lits.iter().map(|l| !*l)).only_enforce_if([!b]);
        b
    }

    // ========================================================================
    // fragments
    // ========================================================================
    /// An empty model that shares every variable declared so far.
    pub fn fork(&self) -> Self {
        Self {
            domains: self.domains.clone(),
            constraints: vec![],
            strategies: vec![],
            base: self.domains.len(),
        }
    }

    /// Append a fragment forked from this model (or from an equal prefix of
    /// it). Fragment-local variables are renumbered after ours.
    pub fn merge(&mut self, fragment: Model) {
        assert!(fragment.base <= self.domains.len(), "fragment outgrew its base");
        assert!(
            fragment.domains[..fragment.base] == self.domains[..fragment.base],
            "fragment forked from a different model"
        );
        let base = fragment.base;
        let offset = self.domains.len();
        let remap = move |i: usize| if i < base { i } else { i - base + offset };
        self.domains.extend_from_slice(&fragment.domains[base..]);
        self.constraints.extend(
            fragment
                .constraints
                .into_iter()
                .map(|c| c.remap(&remap)),
        );
        self.strategies
            .extend(fragment.strategies.into_iter().map(|s| Strategy {
                vars: s.vars.into_iter().map(|v| v.remap(&remap)).collect(),
                order: s.order,
            }));
    }
}
