pub mod card;
pub use card::*;

pub mod category;
pub use category::*;

pub mod deal;
pub use deal::*;

pub mod deck;
pub use deck::*;

pub mod evaluator;
pub use evaluator::*;

pub mod hand;
pub use hand::*;

pub mod strength;
pub use strength::*;

pub mod suit;
pub use suit::*;

pub mod value;
pub use value::*;
