use super::flush::flush;
use super::occurrences::Occurrences;
use super::properties::Properties;
use super::score::Score;
use super::straight::Straight;
use crate::model::BoolVar;
use crate::model::IntVar;
use crate::model::LinearExpr;
use crate::model::Literal;
use crate::model::Model;
use crate::model::Relation;
use std::collections::BTreeMap;

const WHEEL_TIEBREAK: [i64; crate::HAND] = [3, 2, 1, 0, -1];

/// A classified five-card hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// indexed by rank: categories[0] is high card, categories[8] straight flush
    pub categories: [BoolVar; crate::CATEGORIES],
    pub score: Score,
}

/// Classify five cards into exactly one category and derive the tiebreak.
///
/// Categories are claimed in priority order, each one excluding every
/// category above it. The tiebreak lists the values by descending
/// multiplicity and then descending value, except for the wheel, whose ace
/// plays low.
pub fn classify(model: &mut Model, cards: &[&Properties; crate::HAND]) -> Classification {
    let flush = flush(model, cards);
    let occurrences = Occurrences::count(model, cards);
    let straight = Straight::detect(model, &occurrences);

    let fours = occurrences.exactly(model, 4);
    let threes = occurrences.exactly(model, 3);
    let twos = occurrences.exactly(model, 2);
    let has_four = model.reify_or(fours);
    let has_three = model.reify_or(threes);
    let pairs = model.new_int_var(0, 2);
    model.add_eq(pairs, twos.iter().copied().sum::<LinearExpr>());
    let one_pair = model.reify(pairs, Relation::Eq, 1i64);
    let two_pair = model.reify(pairs, Relation::Eq, 2i64);

    // rank 8 down to rank 1, high card takes whatever is left
    let bases = [
        model.reify_and([flush, straight.any]),
        has_four,
        model.reify_and([has_three, one_pair]),
        model.reify_and([Literal::from(flush), !straight.any]),
        model.reify_and([Literal::from(straight.any), !flush]),
        model.reify_and([Literal::from(has_three), !one_pair]),
        two_pair,
        one_pair,
    ];
    let [first, rest @ ..] = bases;
    let mut claimed = first;
    let mut priority = vec![first];
    for base in rest {
        priority.push(model.reify_and([Literal::from(base), !claimed]));
        claimed = model.reify_or([claimed, base]);
    }
    priority.push(model.reify_and([!claimed]));
    let categories: [BoolVar; crate::CATEGORIES] =
        std::array::from_fn(|rank| priority[crate::CATEGORIES - 1 - rank]);
    model.add_exactly_one(categories);

    let rank = model.new_int_var(0, crate::CATEGORIES as i64 - 1);
    model.add_eq(
        rank,
        LinearExpr::weighted(
            categories
                .iter()
                .enumerate()
                .map(|(r, c)| (IntVar::from(*c), r as i64)),
        ),
    );

    let tiebreak = tiebreak(model, cards, straight.wheel);
    Classification {
        categories,
        score: Score { rank, tiebreak },
    }
}

/// Sort the five values by (multiplicity, value) descending without control
/// flow: each card's position is the number of cards that sort before it.
fn tiebreak(
    model: &mut Model,
    cards: &[&Properties; crate::HAND],
    wheel: BoolVar,
) -> [IntVar; crate::HAND] {
    let values = cards.map(|c| c.value);
    let mut same = BTreeMap::<(usize, usize), BoolVar>::new();
    for j in 0..crate::HAND {
        for k in j + 1..crate::HAND {
            let b = model.reify(values[j], Relation::Eq, values[k]);
            same.insert((j, k), b);
        }
    }
    let eq = |j: usize, k: usize| same[&(j.min(k), j.max(k))];

    let multiplicity: [IntVar; crate::HAND] = std::array::from_fn(|j| {
        let m = model.new_int_var(1, 4);
        let others = (0..crate::HAND)
            .filter(|k| *k != j)
            .map(|k| eq(j, k))
            .sum::<LinearExpr>();
        model.add_eq(m, others + 1i64);
        m
    });
    let key = |j: usize| LinearExpr::from(multiplicity[j]) * crate::VALUES as i64 + values[j];

    let mut above = BTreeMap::<(usize, usize), BoolVar>::new();
    for j in 0..crate::HAND {
        for k in 0..crate::HAND {
            if j != k {
                above.insert((j, k), model.reify(key(j), Relation::Gt, key(k)));
            }
        }
    }

    // position of card j: strictly greater keys, plus equal values at lower indices
    let positions: [IntVar; crate::HAND] = std::array::from_fn(|j| {
        let pos = model.new_int_var(0, crate::HAND as i64 - 1);
        let before = (0..crate::HAND)
            .filter(|k| *k != j)
            .map(|k| above[&(k, j)])
            .chain((0..j).map(|k| eq(j, k)))
            .sum::<LinearExpr>();
        model.add_eq(pos, before);
        pos
    });
    model.add_all_different(positions);

    let at: [[BoolVar; crate::HAND]; crate::HAND] = std::array::from_fn(|j| {
        std::array::from_fn(|i| model.reify(positions[j], Relation::Eq, i as i64))
    });
    for i in 0..crate::HAND {
        model.add_exactly_one(at.iter().map(|row| row[i]));
    }

    let tiebreak: [IntVar; crate::HAND] =
        std::array::from_fn(|_| model.new_int_var(-1, crate::VALUES as i64 - 1));
    for j in 0..crate::HAND {
        for i in 0..crate::HAND {
            model
                .add_eq(tiebreak[i], values[j])
                .only_enforce_if([Literal::from(at[j][i]), !wheel]);
        }
    }
    for (tb, v) in tiebreak.iter().zip(WHEEL_TIEBREAK) {
        model.add_eq(*tb, v).only_enforce_if([wheel]);
    }
    tiebreak
}
