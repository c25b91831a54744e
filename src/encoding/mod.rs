//! Poker rules as constraints.
//!
//! Leaves first: card properties, pattern detectors, the classifier, the
//! comparator, best-of-seven selection, and the per-cut table.
pub mod classify;
pub use classify::*;

pub mod flush;
pub use flush::*;

pub mod occurrences;
pub use occurrences::*;

pub mod properties;
pub use properties::*;

pub mod score;
pub use score::*;

pub mod select;
pub use select::*;

pub mod straight;
pub use straight::*;

pub mod table;
pub use table::*;
