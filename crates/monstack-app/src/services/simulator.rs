use std::time::Duration;

use rand::Rng;

use crate::config::DelayRange;

/// Source of simulated latency and failures.
pub trait Simulator: Send + Sync {
    /// Delay drawn uniformly from `range` (inclusive, milliseconds).
    fn delay(&self, range: DelayRange) -> Duration;
    /// True with probability `error_rate`.
    fn should_fail(&self, error_rate: f64) -> bool;
}

/// `rand::thread_rng` backed simulator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSimulator;

impl Simulator for RandomSimulator {
    fn delay(&self, range: DelayRange) -> Duration {
        let ms = rand::thread_rng().gen_range(range.min..=range.max.max(range.min));
        Duration::from_millis(ms)
    }

    fn should_fail(&self, error_rate: f64) -> bool {
        rand::thread_rng().gen::<f64>() < error_rate
    }
}
