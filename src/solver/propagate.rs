use super::domain::Domain;
use crate::model::Constraint;
use crate::model::Enforced;
use crate::model::IntVar;
use crate::model::Literal;
use crate::model::Model;
use crate::model::Relation;
use std::collections::VecDeque;

/// Some domain became empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

/// Current domains plus the trail needed to restore them.
#[derive(Debug, Clone)]
pub struct Store {
    domains: Vec<Domain>,
    trail: Vec<(usize, Domain)>,
    changed: Vec<usize>,
}

impl Store {
    pub fn new(domains: Vec<Domain>) -> Self {
        Self {
            domains,
            trail: vec![],
            changed: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }
    pub fn get(&self, var: usize) -> Domain {
        self.domains[var]
    }
    fn min(&self, var: IntVar) -> i64 {
        self.domains[var.index()].min()
    }
    fn max(&self, var: IntVar) -> i64 {
        self.domains[var.index()].max()
    }
    fn fixed(&self, var: IntVar) -> Option<i64> {
        self.domains[var.index()].fixed()
    }

    /// narrow a domain; `domain` must be a subset of the current one
    pub fn set(&mut self, var: usize, domain: Domain) -> Result<(), Conflict> {
        let old = self.domains[var];
        if domain == old {
            return Ok(());
        }
        if domain.is_empty() {
            return Err(Conflict);
        }
        self.trail.push((var, old));
        self.domains[var] = domain;
        self.changed.push(var);
        Ok(())
    }

    pub fn mark(&self) -> usize {
        self.trail.len()
    }
    pub fn undo(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some((var, domain)) = self.trail.pop() {
                self.domains[var] = domain;
            }
        }
        self.changed.clear();
    }

    /// Some(value) once every variable is fixed
    pub fn values(&self) -> Option<Vec<i64>> {
        self.domains.iter().map(|d| d.fixed()).collect()
    }

    fn truth(&self, lit: Literal) -> Option<bool> {
        self.domains[lit.var().index()]
            .fixed()
            .map(|v| v == lit.polarity())
    }
    /// make the literal true
    fn assign(&mut self, lit: Literal) -> Result<(), Conflict> {
        let var = lit.var().index();
        self.set(var, self.domains[var].only(lit.polarity()))
    }
}

/// Queue-driven propagation to a fixpoint over every constraint of a model.
pub struct Propagator<'a> {
    constraints: &'a [Enforced],
    watches: Vec<Vec<usize>>,
    queue: VecDeque<usize>,
    queued: Vec<bool>,
}

impl<'a> Propagator<'a> {
    pub fn new(model: &'a Model) -> Self {
        let mut watches = vec![vec![]; model.len()];
        for (c, constraint) in model.constraints().iter().enumerate() {
            for var in constraint.indices() {
                watches[var].push(c);
            }
        }
        Self {
            constraints: model.constraints(),
            watches,
            queue: VecDeque::new(),
            queued: vec![false; model.constraints().len()],
        }
    }

    pub fn enqueue_all(&mut self) {
        self.queue = (0..self.constraints.len()).collect();
        self.queued.iter_mut().for_each(|q| *q = true);
    }

    pub fn fixpoint(&mut self, store: &mut Store) -> Result<(), Conflict> {
        loop {
            for var in std::mem::take(&mut store.changed) {
                for &c in &self.watches[var] {
                    if !self.queued[c] {
                        self.queued[c] = true;
                        self.queue.push_back(c);
                    }
                }
            }
            let Some(c) = self.queue.pop_front() else {
                return Ok(());
            };
            self.queued[c] = false;
            if let Err(conflict) = propagate(&self.constraints[c], store) {
                self.queue.drain(..).for_each(|c| self.queued[c] = false);
                return Err(conflict);
            }
        }
    }
}

/// Propagate one constraint under its enforcement literals. When the body is
/// already violated and exactly one enforcement literal is open, that literal
/// is forced false.
pub fn propagate(enforced: &Enforced, store: &mut Store) -> Result<(), Conflict> {
    let mut open = None;
    let mut opens = 0;
    for lit in enforced.enforcement.iter() {
        match store.truth(*lit) {
            Some(false) => return Ok(()),
            Some(true) => {}
            None => {
                opens += 1;
                open = Some(*lit);
            }
        }
    }
    match (opens, open) {
        (0, _) => enforce(&enforced.constraint, store),
        (1, Some(lit)) if violated(&enforced.constraint, store) => store.assign(!lit),
        _ => Ok(()),
    }
}

fn enforce(constraint: &Constraint, store: &mut Store) -> Result<(), Conflict> {
    match constraint {
        Constraint::Linear {
            terms,
            relation,
            rhs,
        } => match relation {
            Relation::Le => at_most(terms, *rhs, 1, store),
            Relation::Ge => at_most(terms, -rhs, -1, store),
            Relation::Lt => at_most(terms, rhs - 1, 1, store),
            Relation::Gt => at_most(terms, -(rhs + 1), -1, store),
            Relation::Eq => {
                at_most(terms, *rhs, 1, store)?;
                at_most(terms, -rhs, -1, store)
            }
            Relation::Ne => not_equal(terms, *rhs, store),
        },
        Constraint::BoolOr(lits) => {
            if lits.iter().any(|l| store.truth(*l) == Some(true)) {
                return Ok(());
            }
            let mut open = lits.iter().filter(|l| store.truth(**l).is_none());
            match (open.next().copied(), open.next()) {
                (None, _) => Err(Conflict),
                (Some(lit), None) => store.assign(lit),
                _ => Ok(()),
            }
        }
        Constraint::BoolAnd(lits) => lits.iter().try_for_each(|l| store.assign(*l)),
        Constraint::ExactlyOne(lits) => {
            let trues = lits
                .iter()
                .filter(|l| store.truth(**l) == Some(true))
                .count();
            match trues {
                0 => {
                    let mut open = lits.iter().filter(|l| store.truth(**l).is_none());
                    match (open.next().copied(), open.next()) {
                        (None, _) => Err(Conflict),
                        (Some(lit), None) => store.assign(lit),
                        _ => Ok(()),
                    }
                }
                1 => lits
                    .iter()
                    .filter(|l| store.truth(**l).is_none())
                    .copied()
                    .collect::<Vec<_>>()
                    .into_iter()
                    .try_for_each(|l| store.assign(!l)),
                _ => Err(Conflict),
            }
        }
        Constraint::AllDifferent(vars) => {
            let fixed = vars
                .iter()
                .filter_map(|v| store.fixed(*v).map(|x| (v.index(), x)))
                .collect::<Vec<_>>();
            for (var, x) in fixed {
                for other in vars.iter().map(|v| v.index()).filter(|o| *o != var) {
                    store.set(other, store.get(other).remove(x))?;
                }
            }
            Ok(())
        }
        Constraint::MaxEquality { target, vars } => {
            let lo = vars.iter().map(|v| store.min(*v)).max().ok_or(Conflict)?;
            let hi = vars.iter().map(|v| store.max(*v)).max().ok_or(Conflict)?;
            let t = target.index();
            store.set(t, store.get(t).at_least(lo).at_most(hi))?;
            let (tmin, tmax) = (store.min(*target), store.max(*target));
            for v in vars.iter().map(|v| v.index()) {
                store.set(v, store.get(v).at_most(tmax))?;
            }
            let mut reach = vars.iter().filter(|v| store.max(**v) >= tmin);
            match (reach.next().copied(), reach.next()) {
                (None, _) => Err(Conflict),
                (Some(v), None) => store.set(v.index(), store.get(v.index()).at_least(tmin)),
                _ => Ok(()),
            }
        }
    }
}

/// whether the current domains already rule the constraint out
fn violated(constraint: &Constraint, store: &Store) -> bool {
    match constraint {
        Constraint::Linear {
            terms,
            relation,
            rhs,
        } => {
            let (lo, hi) = bounds(terms, store);
            match relation {
                Relation::Le => lo > *rhs,
                Relation::Ge => hi < *rhs,
                Relation::Lt => lo >= *rhs,
                Relation::Gt => hi <= *rhs,
                Relation::Eq => lo > *rhs || hi < *rhs,
                Relation::Ne => lo == hi && lo == *rhs,
            }
        }
        Constraint::BoolOr(lits) => lits.iter().all(|l| store.truth(*l) == Some(false)),
        Constraint::BoolAnd(lits) => lits.iter().any(|l| store.truth(*l) == Some(false)),
        Constraint::ExactlyOne(lits) => {
            lits.iter().filter(|l| store.truth(**l) == Some(true)).count() > 1
                || lits.iter().all(|l| store.truth(*l) == Some(false))
        }
        Constraint::AllDifferent(vars) => {
            let mut fixed = vars.iter().filter_map(|v| store.fixed(*v)).collect::<Vec<_>>();
            fixed.sort();
            fixed.windows(2).any(|w| w[0] == w[1])
        }
        Constraint::MaxEquality { target, vars } => {
            let lo = vars.iter().map(|v| store.min(*v)).max();
            let hi = vars.iter().map(|v| store.max(*v)).max();
            match (lo, hi) {
                (Some(lo), Some(hi)) => store.max(*target) < lo || store.min(*target) > hi,
                _ => true,
            }
        }
    }
}

/// smallest and largest value the sum can still take
fn bounds(terms: &[(IntVar, i64)], store: &Store) -> (i64, i64) {
    terms.iter().fold((0, 0), |(lo, hi), (v, c)| {
        let (a, b) = (c * store.min(*v), c * store.max(*v));
        (lo + a.min(b), hi + a.max(b))
    })
}

/// sign * sum(terms) <= rhs, by bounds
fn at_most(terms: &[(IntVar, i64)], rhs: i64, sign: i64, store: &mut Store) -> Result<(), Conflict> {
    let least = |store: &Store, v: IntVar, a: i64| {
        if a > 0 {
            a * store.min(v)
        } else {
            a * store.max(v)
        }
    };
    let total = terms
        .iter()
        .map(|(v, c)| least(store, *v, sign * c))
        .sum::<i64>();
    if total > rhs {
        return Err(Conflict);
    }
    for (v, c) in terms.iter() {
        let a = sign * c;
        let slack = rhs - (total - least(store, *v, a));
        let domain = store.get(v.index());
        let domain = if a > 0 {
            domain.at_most(floor_div(slack, a))
        } else {
            domain.at_least(ceil_div(slack, a))
        };
        store.set(v.index(), domain)?;
    }
    Ok(())
}

fn not_equal(terms: &[(IntVar, i64)], rhs: i64, store: &mut Store) -> Result<(), Conflict> {
    let mut open = terms.iter().filter(|(v, _)| store.fixed(*v).is_none());
    let (first, second) = (open.next().copied(), open.next());
    let fixed = terms
        .iter()
        .filter_map(|(v, c)| store.fixed(*v).map(|x| c * x))
        .sum::<i64>();
    match (first, second) {
        (None, _) if fixed == rhs => Err(Conflict),
        (Some((v, c)), None) if (rhs - fixed) % c == 0 => {
            store.set(v.index(), store.get(v.index()).remove((rhs - fixed) / c))
        }
        _ => Ok(()),
    }
}

fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) { q - 1 } else { q }
}
fn ceil_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) == (b < 0)) { q + 1 } else { q }
}
