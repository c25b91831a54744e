//! End to end: solve small instances and check them against brute force.
use stacked::cards::Card;
use stacked::cards::Deck;
use stacked::config::Config;
use stacked::problem::Problem;
use stacked::problem::Verdict;
use stacked::solver::Backtrack;
use stacked::solver::Parameters;
#[cfg(feature = "z3")]
use stacked::solver::Smt;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Duration;

fn config() -> Config {
    cuts(1)
}

fn cuts(num_cuts: usize) -> Config {
    Config {
        num_players: 2,
        num_cuts,
        timeout: Duration::from_secs(600),
        workers: 2,
    }
}

fn permutations(cards: &[Card]) -> Vec<Vec<Card>> {
    if cards.len() <= 1 {
        return vec![cards.to_vec()];
    }
    (0..cards.len())
        .flat_map(|i| {
            let mut rest = cards.to_vec();
            let head = rest.remove(i);
            permutations(&rest).into_iter().map(move |mut tail| {
                tail.insert(0, head);
                tail
            })
        })
        .collect()
}

/// every deck that agrees with `base` outside the free positions
fn completions(base: &Deck, free: &[usize]) -> Vec<Deck> {
    let loose = free.iter().map(|p| base.cards()[*p]).collect::<Vec<Card>>();
    permutations(&loose)
        .into_iter()
        .map(|order| {
            let mut cards = base.cards().to_vec();
            for (p, card) in free.iter().zip(order) {
                cards[*p] = card;
            }
            Deck::try_from(cards).unwrap()
        })
        .collect()
}

fn pinned(config: Config, base: &Deck, free: &[usize]) -> Problem {
    let mut problem = Problem::build(config).unwrap();
    for (position, card) in base.cards().iter().enumerate() {
        if !free.contains(&position) {
            problem.pin(position, *card).unwrap();
        }
    }
    problem
}

fn agrees_with_brute_force(base: &Deck, free: &[usize]) -> bool {
    agrees_across_cuts(config(), base, free)
}

fn agrees_across_cuts(config: Config, base: &Deck, free: &[usize]) -> bool {
    let every = (0..config.num_cuts).collect::<Vec<usize>>();
    let exists = completions(base, free)
        .iter()
        .any(|deck| deck.wins(config.num_players, config.num_cuts) == every);
    let problem = pinned(config, base, free);
    match problem.solve(&Backtrack, &problem.parameters()).unwrap() {
        Verdict::Solved(deck) => {
            assert_eq!(deck.wins(config.num_players, config.num_cuts), every);
            for (position, card) in base.cards().iter().enumerate() {
                if !free.contains(&position) {
                    assert_eq!(deck.cards()[position], *card);
                }
            }
            assert!(exists);
            true
        }
        Verdict::Infeasible => {
            assert!(!exists);
            false
        }
        Verdict::Unknown => panic!("no verdict on a pinned instance"),
    }
}

#[test]
fn free_hole_cards_can_be_stacked() {
    // 2c 3c | 4c 5c | 6c 7c 8c 9c 10c splits a straight flush; Jc to
    // player 0 breaks the tie
    assert!(agrees_with_brute_force(&Deck::new(), &[0, 2, 9, 10]));
}

#[test]
fn undealt_positions_cannot_help() {
    assert!(!agrees_with_brute_force(&Deck::new(), &[9, 10, 11, 12]));
}

#[test]
fn free_board_cards_agree_with_brute_force() {
    let deck = Deck::try_from(
        "As Kd Qh Jc 2s 7d 9h 4c 3s 5d 6h 8c 10s Ac Kh Qc Js 2d 7h 9c 4s 3d 5h 6c 8s 10d \
         Ah Ks Qd Jh 2c 7s 9d 4h 3c 5s 6d 8h 10c Ad Kc Qs Jd 2h 7c 9s 4d 3h 5c 6s 8d 10h",
    )
    .unwrap();
    agrees_with_brute_force(&deck, &[1, 3, 5, 20]);
}

#[test]
fn several_pinned_cuts_agree_with_brute_force() {
    let ref mut rng = SmallRng::seed_from_u64(23);
    for _ in 0..4 {
        let deck = Deck::shuffled(rng);
        // position 9 is the board for cut 0 and a hole card for cuts 1 and 2
        agrees_across_cuts(cuts(3), &deck, &[0, 5, 9, 11]);
    }
}

#[test]
fn one_free_cut_is_stacked_from_scratch() {
    let problem = Problem::build(config()).unwrap();
    match problem.solve(&Backtrack, &problem.parameters()).unwrap() {
        Verdict::Solved(deck) => assert_eq!(deck.wins(2, 1), vec![0]),
        verdict => panic!("expected a deck, got {:?}", verdict),
    }
}

#[cfg(feature = "z3")]
#[test]
fn smt_stacks_two_free_cuts() {
    let problem = Problem::build(cuts(2)).unwrap();
    match problem.solve(&Smt, &problem.parameters()).unwrap() {
        Verdict::Solved(deck) => assert_eq!(deck.wins(2, 2), vec![0, 1]),
        verdict => panic!("expected a deck, got {:?}", verdict),
    }
}

#[cfg(feature = "z3")]
#[test]
fn smt_finds_undealt_positions_useless() {
    let problem = pinned(config(), &Deck::new(), &[9, 10, 11, 12]);
    assert_eq!(
        problem.solve(&Smt, &problem.parameters()).unwrap(),
        Verdict::Infeasible
    );
}

#[test]
fn zero_time_limit_is_unknown() {
    let problem = Problem::build(config()).unwrap();
    let params = Parameters {
        time_limit: Duration::ZERO,
        ..problem.parameters()
    };
    assert_eq!(
        problem.solve(&Backtrack, &params).unwrap(),
        Verdict::Unknown
    );
}
