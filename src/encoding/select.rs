use super::classify::classify;
use super::properties::Properties;
use super::score::Score;
use super::score::lex;
use crate::model::BoolVar;
use crate::model::IntVar;
use crate::model::Model;
use crate::model::Relation;
use crate::model::ValueOrder;

/// The best five-card score available from seven cards.
pub fn best_of_seven(model: &mut Model, cards: &[&Properties; crate::SEVEN]) -> Score {
    let candidates = crate::CHOOSE.map(|subset| classify(model, &subset.map(|i| cards[i])).score);
    best_of(model, &candidates)
}

/// The best of several already classified candidates.
///
/// The rank is the maximum candidate rank. Among the candidates tied at that
/// rank, a selector picks one whose tiebreak becomes the best tiebreak, and
/// that tiebreak must be lexicographically at least every tied candidate's.
pub fn best_of(model: &mut Model, candidates: &[Score]) -> Score {
    let rank = model.new_int_var(0, crate::CATEGORIES as i64 - 1);
    model.add_max_equality(rank, candidates.iter().map(|c| c.rank));
    let tiebreak: [IntVar; crate::HAND] =
        std::array::from_fn(|_| model.new_int_var(-1, crate::VALUES as i64 - 1));
    let selectors = candidates
        .iter()
        .map(|candidate| {
            let tied = model.reify(candidate.rank, Relation::Eq, rank);
            let cmp = lex(model, &tiebreak, &candidate.tiebreak);
            model
                .add_bool_or([cmp.greater, cmp.equal])
                .only_enforce_if([tied]);
            let selected = model.new_bool_var();
            model.add_implication(selected, tied);
            for (best, mine) in tiebreak.iter().zip(candidate.tiebreak) {
                model.add_eq(*best, mine).only_enforce_if([selected]);
            }
            selected
        })
        .collect::<Vec<BoolVar>>();
    model.add_bool_or(selectors.iter().copied());
    // any one maximal candidate will do
    model.add_exactly_one(selectors.iter().copied());
    model.add_decision_strategy(selectors, ValueOrder::Descending);
    Score { rank, tiebreak }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::cards::Hand;
    use crate::cards::Strength;
    use crate::solver::Backtrack;
    use crate::solver::Engine;
    use crate::solver::Parameters;

    fn best(hand: &str) -> (i64, [i64; crate::HAND]) {
        let cards = Vec::<Card>::from(Hand::try_from(hand).unwrap());
        let ref mut model = Model::new();
        let props = cards
            .iter()
            .map(|c| {
                let var = model.new_constant(u8::from(*c) as i64);
                Properties::extract(model, var)
            })
            .collect::<Vec<_>>();
        let seven: [&Properties; crate::SEVEN] = std::array::from_fn(|i| &props[i]);
        let score = best_of_seven(model, &seven);
        let response = Backtrack.solve(model, &Parameters::default()).unwrap();
        (
            response.value(score.rank).unwrap(),
            score.tiebreak.map(|t| response.value(t).unwrap()),
        )
    }

    fn direct(hand: &str) -> (i64, [i64; crate::HAND]) {
        let strength = Strength::from(Hand::try_from(hand).unwrap());
        (strength.rank() as i64, strength.tiebreak().map(|t| t as i64))
    }

    #[test]
    fn straight_flush_over_flush() {
        assert_eq!(best("5h 6h 7h 8h 9h 2h 10h"), (8, [8, 7, 6, 5, 4]));
    }

    #[test]
    fn kickers_are_chosen_by_tiebreak() {
        assert_eq!(best("Ac Ad 2c 5d 9h Kc Qs"), (1, [12, 12, 11, 10, 7]));
    }

    #[test]
    fn two_trips_make_the_higher_full_house() {
        assert_eq!(best("2c 2d 2h Kc Kd Ks 5c"), (6, [11, 11, 11, 0, 0]));
    }

    #[test]
    fn matches_direct_evaluation() {
        for hand in ["As 2d 3c 4h 5s 6d Kc", "Ac Kc Qc Jc 9c 10d 8h", "7c 7d 7h 7s Ac Kd 2h"] {
            assert_eq!(best(hand), direct(hand), "{}", hand);
        }
    }
}
