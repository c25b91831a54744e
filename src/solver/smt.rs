use super::engine::Engine;
use super::parameters::Parameters;
use super::response::Response;
use super::response::Stats;
use super::response::Status;
use crate::model::Constraint;
use crate::model::Enforced;
use crate::model::IntVar;
use crate::model::Literal;
use crate::model::Model;
use crate::model::Relation;
use anyhow::Context as _;
use std::time::Instant;
use z3::ast::Ast;
use z3::ast::Bool;
use z3::ast::Int;

/// Decides a Model with the z3 SMT solver.
///
/// Every variable becomes a bounded integer, enforcement literals become
/// implications, and decision strategies are left to z3's own heuristics.
/// z3 runs a single search, so `Parameters::workers` is not used.
#[derive(Debug, Clone, Copy, Default)]
pub struct Smt;

impl Engine for Smt {
    fn solve(&self, model: &Model, params: &Parameters) -> anyhow::Result<Response> {
        let begin = Instant::now();
        if params.time_limit.is_zero() {
            return Ok(Response {
                status: Status::Unknown,
                values: vec![],
                stats: Stats {
                    nodes: 0,
                    conflicts: 0,
                    elapsed: begin.elapsed(),
                },
            });
        }
        let config = z3::Config::new();
        let ctx = z3::Context::new(&config);
        let solver = z3::Solver::new(&ctx);
        let mut settings = z3::Params::new(&ctx);
        settings.set_u32(
            "timeout",
            u32::try_from(params.time_limit.as_millis()).unwrap_or(u32::MAX),
        );
        settings.set_u32("random_seed", params.seed as u32);
        solver.set_params(&settings);

        let vars = model
            .domains()
            .iter()
            .enumerate()
            .map(|(i, (lo, hi))| {
                let x = Int::new_const(&ctx, format!("x{}", i));
                solver.assert(&x.ge(&Int::from_i64(&ctx, *lo)));
                solver.assert(&x.le(&Int::from_i64(&ctx, *hi)));
                x
            })
            .collect::<Vec<Int>>();
        let lowering = Lowering {
            ctx: &ctx,
            vars: &vars,
        };
        for enforced in model.constraints() {
            solver.assert(&lowering.enforced(enforced));
        }
        log::info!(
            "z3: {} variables, {} constraints, limit {:?}",
            model.len(),
            model.constraints().len(),
            params.time_limit
        );

        let (status, values) = match solver.check() {
            z3::SatResult::Sat => {
                let solution = solver.get_model().context("z3 reported sat without a model")?;
                let values = vars
                    .iter()
                    .enumerate()
                    .map(|(i, x)| {
                        solution
                            .eval(x, true)
                            .and_then(|v| v.as_i64())
                            .with_context(|| format!("z3 left x{} without a value", i))
                    })
                    .collect::<anyhow::Result<Vec<i64>>>()?;
                (Status::Feasible, values)
            }
            z3::SatResult::Unsat => (Status::Infeasible, vec![]),
            z3::SatResult::Unknown => {
                log::debug!(
                    "z3 gave up: {}",
                    solver.get_reason_unknown().unwrap_or_default()
                );
                (Status::Unknown, vec![])
            }
        };
        let response = Response {
            status,
            values,
            stats: Stats {
                nodes: 0,
                conflicts: 0,
                elapsed: begin.elapsed(),
            },
        };
        log::info!("{} after {}", response.status, response.stats);
        Ok(response)
    }
}

/// Translates constraints onto the z3 integers standing for model variables.
struct Lowering<'a, 'ctx> {
    ctx: &'ctx z3::Context,
    vars: &'a [Int<'ctx>],
}

impl<'ctx> Lowering<'_, 'ctx> {
    fn constant(&self, value: i64) -> Int<'ctx> {
        Int::from_i64(self.ctx, value)
    }
    fn var(&self, var: IntVar) -> &Int<'ctx> {
        &self.vars[var.index()]
    }
    fn literal(&self, lit: Literal) -> Bool<'ctx> {
        self.vars[lit.var().index()]._eq(&self.constant(lit.polarity()))
    }
    /// 1 when the literal holds, else 0
    fn indicator(&self, lit: Literal) -> Int<'ctx> {
        self.literal(lit)
            .ite(&self.constant(1), &self.constant(0))
    }

    fn sum(&self, terms: Vec<Int<'ctx>>) -> Int<'ctx> {
        match terms.len() {
            0 => self.constant(0),
            _ => Int::add(self.ctx, &terms.iter().collect::<Vec<_>>()),
        }
    }
    fn all(&self, conds: Vec<Bool<'ctx>>) -> Bool<'ctx> {
        match conds.len() {
            0 => Bool::from_bool(self.ctx, true),
            _ => Bool::and(self.ctx, &conds.iter().collect::<Vec<_>>()),
        }
    }
    fn any(&self, conds: Vec<Bool<'ctx>>) -> Bool<'ctx> {
        match conds.len() {
            0 => Bool::from_bool(self.ctx, false),
            _ => Bool::or(self.ctx, &conds.iter().collect::<Vec<_>>()),
        }
    }

    fn enforced(&self, enforced: &Enforced) -> Bool<'ctx> {
        let body = self.constraint(&enforced.constraint);
        match enforced.enforcement.is_empty() {
            true => body,
            false => self
                .all(enforced.enforcement.iter().map(|l| self.literal(*l)).collect())
                .implies(&body),
        }
    }

    fn constraint(&self, constraint: &Constraint) -> Bool<'ctx> {
        match constraint {
            Constraint::Linear {
                terms,
                relation,
                rhs,
            } => {
                let lhs = self.sum(
                    terms
                        .iter()
                        .map(|(v, c)| Int::mul(self.ctx, &[self.var(*v), &self.constant(*c)]))
                        .collect(),
                );
                let rhs = self.constant(*rhs);
                match relation {
                    Relation::Eq => lhs._eq(&rhs),
                    Relation::Ne => lhs._eq(&rhs).not(),
                    Relation::Le => lhs.le(&rhs),
                    Relation::Ge => lhs.ge(&rhs),
                    Relation::Lt => lhs.lt(&rhs),
                    Relation::Gt => lhs.gt(&rhs),
                }
            }
            Constraint::BoolOr(lits) => self.any(lits.iter().map(|l| self.literal(*l)).collect()),
            Constraint::BoolAnd(lits) => self.all(lits.iter().map(|l| self.literal(*l)).collect()),
            Constraint::ExactlyOne(lits) => self
                .sum(lits.iter().map(|l| self.indicator(*l)).collect())
                ._eq(&self.constant(1)),
            Constraint::AllDifferent(vars) => match vars.len() {
                0 | 1 => Bool::from_bool(self.ctx, true),
                _ => Int::distinct(self.ctx, &vars.iter().map(|v| self.var(*v)).collect::<Vec<_>>()),
            },
            Constraint::MaxEquality { target, vars } => {
                let target = self.var(*target);
                let bounded = self.all(vars.iter().map(|v| target.ge(self.var(*v))).collect());
                let attained = self.any(vars.iter().map(|v| target._eq(self.var(*v))).collect());
                self.all(vec![bounded, attained])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearExpr;
    use std::time::Duration;

    fn params() -> Parameters {
        Parameters {
            time_limit: Duration::from_secs(60),
            ..Parameters::default()
        }
    }

    #[test]
    fn pigeonhole_is_infeasible() {
        let ref mut model = Model::new();
        let xs = (0..4).map(|_| model.new_int_var(0, 2)).collect::<Vec<_>>();
        model.add_all_different(xs);
        let response = Smt.solve(model, &params()).unwrap();
        assert_eq!(response.status, Status::Infeasible);
    }

    #[test]
    fn solution_satisfies_every_constraint() {
        let ref mut model = Model::new();
        let x = model.new_int_var(0, 9);
        let y = model.new_int_var(0, 9);
        let b = model.new_bool_var();
        let m = model.new_int_var(0, 9);
        model.add_eq(LinearExpr::from(x) + y, 12i64);
        model.add_gt(x, 8i64).only_enforce_if([b]);
        model.add_bool_or([b]);
        model.add_max_equality(m, [x, y]);
        model.add_exactly_one([b]);
        let response = Smt.solve(model, &params()).unwrap();
        assert_eq!(response.status, Status::Feasible);
        assert_eq!(response.value(x), Some(9));
        assert_eq!(response.value(y), Some(3));
        assert_eq!(response.value(m), Some(9));
        assert!(
            model
                .constraints()
                .iter()
                .all(|c| c.satisfied(|i| response.values[i]))
        );
    }

    #[test]
    fn negated_enforcement_is_respected() {
        let ref mut model = Model::new();
        let x = model.new_int_var(0, 5);
        let b = model.new_bool_var();
        model.add_eq(x, 5i64).only_enforce_if([!b]);
        model.add_le(x, 2i64);
        let response = Smt.solve(model, &params()).unwrap();
        assert_eq!(response.boolean(b), Some(true));
    }

    #[test]
    fn zero_time_limit_is_unknown() {
        let ref mut model = Model::new();
        model.new_int_var(0, 3);
        let params = Parameters {
            time_limit: Duration::ZERO,
            ..params()
        };
        assert_eq!(Smt.solve(model, &params).unwrap().status, Status::Unknown);
    }
}
