use std::time::Duration;

/// Everything that shapes one search: the table, how many cuts must be won,
/// and how long and how wide the engine may search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub num_players: usize,
    pub num_cuts: usize,
    pub timeout: Duration,
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_players: crate::DEFAULT_PLAYERS,
            num_cuts: crate::DEFAULT_CUTS,
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT),
            workers: crate::DEFAULT_WORKERS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.num_players >= 2,
            "need at least 2 players, got {}",
            self.num_players
        );
        anyhow::ensure!(
            self.dealt() <= crate::DECK,
            "{} players need {} cards, the deck has {}",
            self.num_players,
            self.dealt(),
            crate::DECK
        );
        anyhow::ensure!(
            (1..=crate::DECK).contains(&self.num_cuts),
            "num_cuts must be in 1..={}, got {}",
            crate::DECK,
            self.num_cuts
        );
        anyhow::ensure!(!self.timeout.is_zero(), "timeout must be positive");
        anyhow::ensure!(self.workers >= 1, "need at least 1 worker");
        Ok(())
    }

    /// cards dealt per cut
    pub fn dealt(&self) -> usize {
        self.num_players * crate::HOLE + crate::BOARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_players, 2);
        assert_eq!(config.num_cuts, 52);
        assert_eq!(config.timeout, Duration::from_secs(3600));
        assert_eq!(config.workers, 8);
    }

    #[test]
    fn largest_table_fits() {
        let config = Config {
            num_players: 23,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.dealt(), 51);
        let config = Config {
            num_players: 24,
            ..Config::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("need 53 cards"), "{}", err);
    }

    #[test]
    fn rejects_malformed() {
        let base = Config::default();
        for bad in [
            Config { num_players: 1, ..base },
            Config { num_cuts: 0, ..base },
            Config { num_cuts: 53, ..base },
            Config { timeout: Duration::ZERO, ..base },
            Config { workers: 0, ..base },
        ] {
            assert!(bad.validate().is_err(), "{:?}", bad);
        }
    }
}
