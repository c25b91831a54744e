use super::classify::classify;
use super::properties::Properties;
use super::score::Score;
use super::select::best_of;
use crate::model::IntVar;
use crate::model::Model;
use crate::model::ValueOrder;
use std::collections::HashMap;

/// Deal one cut of the deck and require player 0 to beat every other player.
///
/// Player p holds cut positions 2p and 2p+1, and the board follows the hole
/// block. A five-card subset shared by several players (the board itself, at
/// least) is classified once. Returns each player's best score.
///
/// The dealt positions become a decision strategy ahead of this cut's
/// selectors, so search settles one deal before it moves to the next cut.
pub fn deal_cut(
    model: &mut Model,
    deck: &[Properties; crate::DECK],
    cut: usize,
    num_players: usize,
) -> Vec<Score> {
    let scores = deal_scores(model, deck, cut, num_players);
    for other in scores.iter().skip(1) {
        let beats = scores[0].beats(model, other);
        model.add_bool_and([beats]);
    }
    scores
}

/// Every player's best score at one cut, with no requirement on who wins.
pub fn deal_scores(
    model: &mut Model,
    deck: &[Properties; crate::DECK],
    cut: usize,
    num_players: usize,
) -> Vec<Score> {
    let position = |i: usize| (cut + i) % crate::DECK;
    let board: [usize; crate::BOARD] =
        std::array::from_fn(|i| position(crate::HOLE * num_players + i));
    let dealt = (0..crate::HOLE * num_players + crate::BOARD)
        .map(|i| deck[position(i)].card)
        .collect::<Vec<IntVar>>();
    model.add_decision_strategy(dealt, ValueOrder::Ascending);
    let mut memo = HashMap::<[usize; crate::HAND], Score>::new();
    let mut scores = Vec::with_capacity(num_players);
    for player in 0..num_players {
        let seven: [usize; crate::SEVEN] = std::array::from_fn(|i| match i {
            0 | 1 => position(crate::HOLE * player + i),
            i => board[i - crate::HOLE],
        });
        let mut candidates = Vec::with_capacity(crate::SUBSETS);
        for subset in crate::CHOOSE {
            let mut key = subset.map(|i| seven[i]);
            key.sort();
            let score = match memo.get(&key) {
                Some(score) => *score,
                None => {
                    let score = classify(model, &key.map(|p| &deck[p])).score;
                    memo.insert(key, score);
                    score
                }
            };
            candidates.push(score);
        }
        scores.push(best_of(model, &candidates));
    }
    log::debug!(
        "cut {:>2}: {} distinct hands for {} players",
        cut,
        memo.len(),
        num_players
    );
    scores
}
