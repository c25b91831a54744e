pub mod builder;
pub use builder::*;

pub mod constraint;
pub use constraint::*;

pub mod expr;
pub use expr::*;

pub mod variable;
pub use variable::*;
