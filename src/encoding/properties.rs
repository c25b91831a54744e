use crate::model::BoolVar;
use crate::model::IntVar;
use crate::model::LinearExpr;
use crate::model::Model;
use crate::model::Relation;

/// Suit and value of a card variable, plus one indicator per value.
///
/// Extracted once per deck position and shared by every hand that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Properties {
    pub card: IntVar,
    pub suit: IntVar,
    pub value: IntVar,
    /// is_value[k] <=> value == k
    pub is_value: [BoolVar; crate::VALUES],
}

impl Properties {
    pub fn extract(model: &mut Model, card: IntVar) -> Self {
        let suit = model.new_int_var(0, crate::SUITS as i64 - 1);
        let value = model.new_int_var(0, crate::VALUES as i64 - 1);
        model.add_eq(card, LinearExpr::from(suit) * crate::VALUES as i64 + value);
        let is_value: [BoolVar; crate::VALUES] = std::array::from_fn(|k| model.reify(value, Relation::Eq, k as i64));
        model.add_exactly_one(is_value);
        Self {
            card,
            suit,
            value,
            is_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::solver::Backtrack;
    use crate::solver::Engine;
    use crate::solver::Parameters;

    #[test]
    fn agrees_with_codec() {
        for id in [0u8, 8, 12, 13, 34, 51] {
            let ref mut model = Model::new();
            let card = model.new_int_var(0, 51);
            let props = Properties::extract(model, card);
            model.add_eq(card, id as i64);
            let response = Backtrack.solve(model, &Parameters::default()).unwrap();
            let card = Card::from(id);
            assert_eq!(response.value(props.suit), Some(u8::from(card.suit()) as i64));
            assert_eq!(response.value(props.value), Some(u8::from(card.value()) as i64));
            for (k, b) in props.is_value.iter().enumerate() {
                assert_eq!(response.boolean(*b), Some(k == u8::from(card.value()) as usize));
            }
        }
    }
}
