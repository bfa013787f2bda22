//! Millisecond time source for the scheduler.

/// Free-running millisecond counter.
///
/// The value is allowed to wrap around `u32::MAX`; the scheduler only ever
/// looks at differences computed with wrapping subtraction.
///
/// Any `Fn() -> u32` is a clock, which keeps board-specific tick sources out
/// of this crate:
///
/// ```
/// use rotary_events::{EventScheduler, SchedulerConfig};
///
/// fn millis() -> u32 {
///     // board tick counter
///     0
/// }
///
/// let scheduler = EventScheduler::with_config(millis, SchedulerConfig::default());
/// ```
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin (normally boot).
    fn now_ms(&self) -> u32;
}

impl<F> Clock for F
where
    F: Fn() -> u32,
{
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// Clock backed by the Embassy time driver.
///
/// Truncates [`embassy_time::Instant`] to 32 bits, which wraps after about
/// 49 days.
#[cfg(feature = "task")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "task")]
impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
