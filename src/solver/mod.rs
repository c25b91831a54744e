pub mod backtrack;
pub use backtrack::*;

pub mod domain;
pub use domain::*;

pub mod engine;
pub use engine::*;

pub mod parameters;
pub use parameters::*;

pub mod propagate;

pub mod response;
pub use response::*;

#[cfg(feature = "z3")]
pub mod smt;
#[cfg(feature = "z3")]
pub use smt::*;
