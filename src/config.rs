//! Timing configuration.

/// Default minimum gap, in milliseconds, used for both delays.
pub const DEFAULT_DELAY_MS: u32 = 32;

/// Minimum separation between scheduled events.
///
/// Hosts that consume emulated key events (game input layers in particular)
/// drop presses that are released too quickly, or presses that arrive right
/// after the previous release. 20-50 ms covers most of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerConfig {
    /// Minimum time between a press and its release.
    pub press_to_release_ms: u32,
    /// Minimum time between a release and the next press.
    pub release_to_press_ms: u32,
}

impl SchedulerConfig {
    pub const fn with_delays(press_to_release_ms: u32, release_to_press_ms: u32) -> Self {
        Self {
            press_to_release_ms,
            release_to_press_ms,
        }
    }

    /// Delay that must elapse before the next event: press-to-release while a
    /// release is outstanding, release-to-press otherwise.
    pub const fn delay_before_next(&self, release_pending: bool) -> u32 {
        if release_pending {
            self.press_to_release_ms
        } else {
            self.release_to_press_ms
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::with_delays(DEFAULT_DELAY_MS, DEFAULT_DELAY_MS)
    }
}

/// Loop periods for the Embassy sampling and dispatch tasks.
#[cfg(feature = "task")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskConfig {
    /// Line sampling period. Must be short enough that no Gray-code phase is
    /// missed at the fastest expected rotation.
    pub sample_period_us: u64,
    /// Event poll period.
    pub poll_period_ms: u64,
}

#[cfg(feature = "task")]
impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            sample_period_us: 500,
            poll_period_ms: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_default_delay_for_both() {
        let config = SchedulerConfig::default();
        assert_eq!(config.press_to_release_ms, DEFAULT_DELAY_MS);
        assert_eq!(config.release_to_press_ms, DEFAULT_DELAY_MS);
    }

    #[test]
    fn delay_before_next_selects_by_release_state() {
        let config = SchedulerConfig::with_delays(10, 25);
        assert_eq!(config.delay_before_next(true), 10);
        assert_eq!(config.delay_before_next(false), 25);
    }

    #[cfg(feature = "task")]
    #[test]
    fn task_config_defaults() {
        let config = TaskConfig::default();
        assert_eq!(config.sample_period_us, 500);
        assert_eq!(config.poll_period_ms, 1);
    }
}
