use super::properties::Properties;
use crate::model::BoolVar;
use crate::model::Model;
use crate::model::Relation;

/// flush <=> every card shares the first card's suit
pub fn flush(model: &mut Model, cards: &[&Properties; crate::HAND]) -> BoolVar {
    let first = cards[0].suit;
    let same = cards[1..]
        .iter()
        .map(|c| model.reify(first, Relation::Eq, c.suit))
        .collect::<Vec<_>>();
    model.reify_and(same)
}
