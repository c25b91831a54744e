use super::domain::Domain;
use super::engine::Engine;
use super::parameters::Parameters;
use super::propagate::Propagator;
use super::propagate::Store;
use super::response::Response;
use super::response::Stats;
use super::response::Status;
use crate::model::Model;
use crate::model::ValueOrder;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// deadline and stop flag are polled this often
const CHECK_EVERY: u64 = 256;
/// conflicts allowed before the first restart; grows by half each restart
const RESTART_BASE: u64 = 256;
const LOG_INTERVAL: Duration = Duration::from_secs(5);

/// In-memory propagate-and-branch engine.
///
/// Each worker runs a complete depth-first search with its own value order
/// for the decision-strategy variables. The first worker to find a solution
/// or to exhaust the tree answers for all of them. A worker that spends its
/// conflict budget restarts from the root with a reshuffled value order and
/// a larger budget, so it stays complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtrack;

impl Engine for Backtrack {
    fn solve(&self, model: &Model, params: &Parameters) -> anyhow::Result<Response> {
        anyhow::ensure!(params.workers >= 1, "need at least 1 worker");
        let domains = model
            .domains()
            .iter()
            .enumerate()
            .map(|(i, (lo, hi))| {
                anyhow::ensure!(
                    hi - lo < Domain::WIDTH,
                    "variable {} spans [{}, {}], more than {} values",
                    i,
                    lo,
                    hi,
                    Domain::WIDTH
                );
                Ok(Domain::range(*lo, *hi))
            })
            .collect::<anyhow::Result<Vec<Domain>>>()?;
        log::info!(
            "searching {} variables, {} constraints, {} workers, limit {:?}",
            model.len(),
            model.constraints().len(),
            params.workers,
            params.time_limit
        );
        let begin = Instant::now();
        let shared = Shared {
            deadline: begin.checked_add(params.time_limit),
            stop: AtomicBool::new(false),
            nodes: AtomicU64::new(0),
            conflicts: AtomicU64::new(0),
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.workers)
            .thread_name(|i| format!("backtrack-{}", i))
            .build()?;
        // one worker per pool thread, so every worker runs from the start
        let outcome = pool
            .broadcast(|ctx| Search::new(model, &domains, params, ctx.index(), &shared).run())
            .into_iter()
            .find(|outcome| matches!(outcome, Outcome::Solution(_) | Outcome::Exhausted));
        let stats = Stats {
            nodes: shared.nodes.load(Ordering::Relaxed),
            conflicts: shared.conflicts.load(Ordering::Relaxed),
            elapsed: begin.elapsed(),
        };
        let response = match outcome {
            Some(Outcome::Solution(values)) => {
                debug_assert!(
                    model
                        .constraints()
                        .iter()
                        .all(|c| c.satisfied(|i| values[i]))
                );
                Response {
                    status: Status::Feasible,
                    values,
                    stats,
                }
            }
            Some(Outcome::Exhausted) => Response {
                status: Status::Infeasible,
                values: vec![],
                stats,
            },
            _ => Response {
                status: Status::Unknown,
                values: vec![],
                stats,
            },
        };
        log::info!("{} after {}", response.status, response.stats);
        Ok(response)
    }
}

struct Shared {
    /// None when the limit is too far out to represent
    deadline: Option<Instant>,
    stop: AtomicBool,
    nodes: AtomicU64,
    conflicts: AtomicU64,
}

enum Outcome {
    Solution(Vec<i64>),
    Exhausted,
    Timeout,
    Stopped,
}

/// a branching point: the variable, the trail mark before it was
/// assigned, and the values still to try (next value last)
struct Frame {
    mark: usize,
    var: usize,
    values: Vec<i64>,
}

struct Search<'a> {
    store: Store,
    propagator: Propagator<'a>,
    decisions: Vec<usize>,
    orders: Vec<Option<ValueOrder>>,
    worker: usize,
    restarts: u32,
    rng: SmallRng,
    log_progress: bool,
    shared: &'a Shared,
    nodes: u64,
    conflicts: u64,
    logged: Instant,
}

impl<'a> Search<'a> {
    fn new(
        model: &'a Model,
        domains: &[Domain],
        params: &Parameters,
        worker: usize,
        shared: &'a Shared,
    ) -> Self {
        let mut orders = vec![None; model.len()];
        let mut decisions = vec![];
        for strategy in model.strategies() {
            for var in strategy.vars.iter().map(|v| v.index()) {
                if orders[var].is_none() {
                    orders[var] = Some(strategy.order);
                    decisions.push(var);
                }
            }
        }
        Self {
            store: Store::new(domains.to_vec()),
            propagator: Propagator::new(model),
            decisions,
            orders,
            worker,
            restarts: 0,
            rng: SmallRng::seed_from_u64(params.seed.wrapping_add(worker as u64)),
            log_progress: params.log_progress && worker == 0,
            shared,
            nodes: 0,
            conflicts: 0,
            logged: Instant::now(),
        }
    }

    fn run(mut self) -> Outcome {
        let outcome = self.search();
        self.shared.nodes.fetch_add(self.nodes, Ordering::Relaxed);
        self.shared.conflicts.fetch_add(self.conflicts, Ordering::Relaxed);
        match outcome {
            Outcome::Solution(_) | Outcome::Exhausted => {
                self.shared.stop.store(true, Ordering::Relaxed);
                log::debug!(
                    "worker {} decided after {} nodes, {} conflicts",
                    self.worker,
                    self.nodes,
                    self.conflicts
                );
            }
            Outcome::Timeout | Outcome::Stopped => {
                log::debug!("worker {} gave up after {} nodes", self.worker, self.nodes);
            }
        }
        outcome
    }

    fn search(&mut self) -> Outcome {
        if let Some(outcome) = self.interrupted(0) {
            return outcome;
        }
        self.propagator.enqueue_all();
        if self.propagator.fixpoint(&mut self.store).is_err() {
            return Outcome::Exhausted;
        }
        let root = self.store.mark();
        let mut budget = RESTART_BASE;
        loop {
            if let Some(outcome) = self.descend(budget) {
                return outcome;
            }
            self.store.undo(root);
            self.restarts += 1;
            budget = budget.saturating_add(budget / 2);
            log::debug!(
                "worker {} restart {} after {} conflicts",
                self.worker,
                self.restarts,
                self.conflicts
            );
        }
    }

    /// depth-first search from the root; None once `budget` conflicts are spent
    fn descend(&mut self, budget: u64) -> Option<Outcome> {
        let spent = self.conflicts;
        let mut stack = Vec::<Frame>::new();
        loop {
            match self.choose() {
                None => match self.store.values() {
                    Some(values) => return Some(Outcome::Solution(values)),
                    None => unreachable!("every variable is fixed"),
                },
                Some(var) => stack.push(Frame {
                    mark: self.store.mark(),
                    var,
                    values: self.candidates(var),
                }),
            }
            loop {
                if self.nodes % CHECK_EVERY == 0 {
                    if let Some(outcome) = self.interrupted(stack.len()) {
                        return Some(outcome);
                    }
                }
                self.nodes += 1;
                let Some(frame) = stack.last_mut() else {
                    return Some(Outcome::Exhausted);
                };
                let Some(value) = frame.values.pop() else {
                    stack.pop();
                    continue;
                };
                let (mark, var) = (frame.mark, frame.var);
                self.store.undo(mark);
                let domain = self.store.get(var).only(value);
                let ok = self
                    .store
                    .set(var, domain)
                    .and_then(|_| self.propagator.fixpoint(&mut self.store))
                    .is_ok();
                if ok {
                    break;
                }
                self.conflicts += 1;
                if self.conflicts - spent >= budget {
                    return None;
                }
            }
        }
    }

    /// strategy variables in declaration order, then the smallest open domain
    fn choose(&self) -> Option<usize> {
        self.decisions
            .iter()
            .copied()
            .find(|var| self.store.get(*var).fixed().is_none())
            .or_else(|| {
                (0..self.store.len())
                    .filter(|var| self.store.get(*var).fixed().is_none())
                    .min_by_key(|var| (self.store.get(*var).size(), *var))
            })
    }

    /// values to try for var, stacked so the first choice is popped first
    fn candidates(&mut self, var: usize) -> Vec<i64> {
        let domain = self.store.get(var);
        let mut values = domain.iter().collect::<Vec<i64>>();
        match self.orders[var] {
            Some(ValueOrder::Ascending) if self.worker > 0 || self.restarts > 0 => {
                values.shuffle(&mut self.rng)
            }
            Some(ValueOrder::Ascending) => {}
            Some(ValueOrder::Descending) => values.reverse(),
            None if domain.max() <= 1 && domain.min() >= 0 => values.reverse(),
            None => {}
        }
        values.reverse();
        values
    }

    fn interrupted(&mut self, depth: usize) -> Option<Outcome> {
        if self.shared.stop.load(Ordering::Relaxed) {
            return Some(Outcome::Stopped);
        }
        let now = Instant::now();
        if self.shared.deadline.is_some_and(|deadline| now >= deadline) {
            return Some(Outcome::Timeout);
        }
        if self.log_progress && now.duration_since(self.logged) >= LOG_INTERVAL {
            self.logged = now;
            log::info!(
                "search: {:>12} nodes {:>10} conflicts depth {:>4}",
                self.nodes,
                self.conflicts,
                depth
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearExpr;

    fn params() -> Parameters {
        Parameters {
            time_limit: Duration::from_secs(60),
            workers: 1,
            log_progress: false,
            seed: 0,
        }
    }

    #[test]
    fn pigeonhole_is_infeasible() {
        let ref mut model = Model::new();
        let xs = (0..4).map(|_| model.new_int_var(0, 2)).collect::<Vec<_>>();
        model.add_all_different(xs);
        let response = Backtrack.solve(model, &params()).unwrap();
        assert_eq!(response.status, Status::Infeasible);
        assert!(response.values.is_empty());
    }

    #[test]
    fn restarts_still_exhaust() {
        let ref mut model = Model::new();
        let xs = (0..7).map(|_| model.new_int_var(0, 5)).collect::<Vec<_>>();
        model.add_all_different(xs.iter().copied());
        model.add_decision_strategy(xs, ValueOrder::Ascending);
        let response = Backtrack.solve(model, &params()).unwrap();
        assert_eq!(response.status, Status::Infeasible);
        assert!(response.stats.conflicts > RESTART_BASE);
    }

    #[test]
    fn finds_satisfying_assignment() {
        let ref mut model = Model::new();
        let x = model.new_int_var(0, 9);
        let y = model.new_int_var(0, 9);
        let z = model.new_int_var(0, 9);
        model.add_eq(LinearExpr::from(x) + y + z, 15i64);
        model.add_gt(x, y);
        model.add_gt(y, z);
        model.add_all_different([x, y, z]);
        model.add_ne(z, 0i64);
        let response = Backtrack.solve(model, &params()).unwrap();
        assert_eq!(response.status, Status::Feasible);
        let (x, y, z) = (
            response.value(x).unwrap(),
            response.value(y).unwrap(),
            response.value(z).unwrap(),
        );
        assert_eq!(x + y + z, 15);
        assert!(x > y && y > z && z != 0);
    }

    #[test]
    fn zero_time_limit_is_unknown() {
        let ref mut model = Model::new();
        let xs = (0..4).map(|_| model.new_int_var(0, 2)).collect::<Vec<_>>();
        model.add_all_different(xs);
        let params = Parameters {
            time_limit: Duration::ZERO,
            ..params()
        };
        let response = Backtrack.solve(model, &params).unwrap();
        assert_eq!(response.status, Status::Unknown);
    }

    #[test]
    fn workers_agree() {
        let ref mut model = Model::new();
        let xs = (0..6).map(|_| model.new_int_var(0, 5)).collect::<Vec<_>>();
        model.add_all_different(xs.iter().copied());
        model.add_decision_strategy(xs.iter().copied(), ValueOrder::Ascending);
        model.add_eq(xs.iter().copied().sum::<LinearExpr>(), 15i64);
        model.add_lt(xs[0], xs[5]);
        let params = Parameters {
            workers: 4,
            seed: 7,
            ..params()
        };
        let response = Backtrack.solve(model, &params).unwrap();
        assert!(response.status.has_solution());
        let values = xs.iter().map(|x| response.value(*x).unwrap()).collect::<Vec<_>>();
        assert!(values[0] < values[5]);
        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn strategy_order_is_respected() {
        let ref mut model = Model::new();
        let b = model.new_bool_var();
        let x = model.new_int_var(0, 3);
        model.add_decision_strategy([x], ValueOrder::Descending);
        model.add_decision_strategy([b], ValueOrder::Ascending);
        let response = Backtrack.solve(model, &params()).unwrap();
        assert_eq!(response.value(x), Some(3));
        assert_eq!(response.boolean(b), Some(false));
    }

    #[test]
    fn rejects_wide_domains() {
        let ref mut model = Model::new();
        model.new_int_var(0, 128);
        assert!(Backtrack.solve(model, &params()).is_err());
    }
}
