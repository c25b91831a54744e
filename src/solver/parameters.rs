use crate::config::Config;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    pub time_limit: Duration,
    /// independent searches run side by side
    pub workers: usize,
    /// log search progress every few seconds
    pub log_progress: bool,
    /// seeds the value shuffles of workers past the first
    pub seed: u64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(crate::DEFAULT_TIMEOUT),
            workers: 1,
            log_progress: false,
            seed: 0,
        }
    }
}

impl From<&Config> for Parameters {
    fn from(config: &Config) -> Self {
        Self {
            time_limit: config.timeout,
            workers: config.workers,
            log_progress: true,
            seed: 0,
        }
    }
}
