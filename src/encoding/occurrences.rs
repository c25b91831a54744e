use super::properties::Properties;
use crate::model::BoolVar;
use crate::model::IntVar;
use crate::model::LinearExpr;
use crate::model::Model;
use crate::model::Relation;

/// How many of the five cards carry each value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrences {
    pub counts: [IntVar; crate::VALUES],
    /// present[k] <=> counts[k] >= 1
    pub present: [BoolVar; crate::VALUES],
}

impl Occurrences {
    pub fn count(model: &mut Model, cards: &[&Properties; crate::HAND]) -> Self {
        let counts: [IntVar; crate::VALUES] = std::array::from_fn(|k| {
            let count = model.new_int_var(0, crate::HAND as i64);
            model.add_eq(count, cards.iter().map(|c| c.is_value[k]).sum::<LinearExpr>());
            count
        });
        model.add_eq(counts.iter().copied().sum::<LinearExpr>(), crate::HAND as i64);
        let present = counts.map(|count| model.reify(count, Relation::Ge, 1i64));
        Self { counts, present }
    }

    /// one indicator per value: counts[k] == n
    pub fn exactly(&self, model: &mut Model, n: i64) -> [BoolVar; crate::VALUES] {
        self.counts.map(|count| model.reify(count, Relation::Eq, n))
    }
}
