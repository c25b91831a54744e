use crate::model::BoolVar;
use crate::model::IntVar;
use std::time::Duration;

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// a solution that is proven best; satisfaction models never need it
    Optimal,
    Feasible,
    Infeasible,
    /// the time limit ran out first
    Unknown,
}

impl Status {
    pub fn has_solution(&self) -> bool {
        matches!(self, Status::Optimal | Status::Feasible)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Status::Optimal => write!(f, "OPTIMAL"),
            Status::Feasible => write!(f, "FEASIBLE"),
            Status::Infeasible => write!(f, "INFEASIBLE"),
            Status::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub nodes: u64,
    pub conflicts: u64,
    pub elapsed: Duration,
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} nodes, {} conflicts in {:.2?}",
            self.nodes, self.conflicts, self.elapsed
        )
    }
}

/// The engine's answer. `values` is indexed by variable and is only
/// populated when the status carries a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub values: Vec<i64>,
    pub stats: Stats,
}

impl Response {
    pub fn value(&self, var: impl Into<IntVar>) -> Option<i64> {
        self.values.get(var.into().index()).copied()
    }
    pub fn boolean(&self, var: BoolVar) -> Option<bool> {
        self.value(var).map(|v| v == 1)
    }
}
