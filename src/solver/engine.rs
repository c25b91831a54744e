use super::parameters::Parameters;
use super::response::Response;
use crate::model::Model;

/// Anything that can decide a Model.
///
/// Engines must never report Infeasible because of a timeout; a search that
/// runs out of time answers Unknown.
pub trait Engine {
    fn solve(&self, model: &Model, params: &Parameters) -> anyhow::Result<Response>;
}
