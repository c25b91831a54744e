//! Search for stacked decks: orderings of the 52 cards under which one
//! Hold'em seat wins at every cut.
//!
//! Poker rules are encoded declaratively into a constraint [`model::Model`]
//! and handed to a [`solver::Engine`]. The [`cards`] module evaluates hands
//! directly and serves as the reference for the encoding.
pub mod cards;
pub mod config;
pub mod encoding;
pub mod genetic;
pub mod model;
pub mod problem;
pub mod solver;

// ============================================================================
// DECK GEOMETRY
// ============================================================================
pub const DECK: usize = 52;
pub const SUITS: usize = 4;
pub const VALUES: usize = 13;
/// hole cards per player
pub const HOLE: usize = 2;
/// community cards
pub const BOARD: usize = 5;
/// cards in a scored hand
pub const HAND: usize = 5;
/// cards available to each player
pub const SEVEN: usize = HOLE + BOARD;
/// C(7, 5)
pub const SUBSETS: usize = 21;
pub const CATEGORIES: usize = 9;

/// The canonical list of five-of-seven index subsets, lexicographic in the
/// pair of positions left out.
pub const CHOOSE: [[usize; HAND]; SUBSETS] = choose();

const fn choose() -> [[usize; HAND]; SUBSETS] {
    let mut subsets = [[0; HAND]; SUBSETS];
    let mut n = 0;
    let mut a = 0;
    while a < SEVEN {
        let mut b = a + 1;
        while b < SEVEN {
            let mut k = 0;
            let mut i = 0;
            while i < SEVEN {
                if i != a && i != b {
                    subsets[n][k] = i;
                    k += 1;
                }
                i += 1;
            }
            n += 1;
            b += 1;
        }
        a += 1;
    }
    subsets
}

// ============================================================================
// DEFAULTS
// ============================================================================
pub const DEFAULT_PLAYERS: usize = 2;
pub const DEFAULT_CUTS: usize = DECK;
pub const DEFAULT_TIMEOUT: u64 = 3600;
pub const DEFAULT_WORKERS: usize = 8;
/// encoding progress is logged every this many cuts
pub const LOG_EVERY: usize = 10;

/// Initialize logging: INFO to the terminal, DEBUG to logs/<unix secs>.log
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_is_canonical() {
        assert_eq!(CHOOSE[0], [2, 3, 4, 5, 6]);
        assert_eq!(CHOOSE[SUBSETS - 1], [0, 1, 2, 3, 4]);
        let mut seen = CHOOSE
            .iter()
            .map(|s| s.iter().map(|i| 1u8 << i).fold(0, |a, b| a | b))
            .collect::<Vec<u8>>();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), SUBSETS);
        assert!(seen.iter().all(|m| m.count_ones() == HAND as u32));
    }
}
