//! Experiment protocol switches

use serde::Deserialize;
use std::time::Duration;

use crate::domain::session::TimerPolicy;

use super::error::ValidationError;

pub const MIN_TICK_INTERVAL_MS: u64 = 100;
pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;

/// Per-deployment choices about how the protocol is run
#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentConfig {
    /// Start a timed phase's countdown on entry instead of on request
    #[serde(default = "default_true")]
    pub auto_start_timers: bool,

    /// Lock a timed phase's text box until its countdown is running
    #[serde(default = "default_true")]
    pub timer_gated_editing: bool,

    /// Require the class/cohort label on the identity screen
    #[serde(default = "default_true")]
    pub require_cohort: bool,

    /// Period of the clock tick while a window is running
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

impl ExperimentConfig {
    pub fn timer_policy(&self) -> TimerPolicy {
        TimerPolicy {
            auto_start: self.auto_start_timers,
            gated_editing: self.timer_gated_editing,
            require_cohort: self.require_cohort,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(ValidationError::InvalidTickInterval {
                min: MIN_TICK_INTERVAL_MS,
                max: MAX_TICK_INTERVAL_MS,
                actual: self.tick_interval_ms,
            });
        }
        Ok(())
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            auto_start_timers: true,
            timer_gated_editing: true,
            require_cohort: true,
            tick_interval_ms: default_tick_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_interval() -> u64 {
    1000
}
