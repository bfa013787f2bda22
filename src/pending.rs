//! Net count of press events waiting to be emitted.
//!
//! The counter is the only state shared between the producer (whatever
//! samples the encoder lines, usually an interrupt handler) and the consumer
//! polling for events. Both sides perform their read-modify-write inside a
//! critical section; the consumer may additionally peek at the value without
//! one, accepting a stale read that is corrected on the next poll.

use core::sync::atomic::{AtomicI16, Ordering};

use crate::decoder::Step;
use crate::event::Direction;

/// Signed queue of pending presses: positive counts clockwise presses,
/// negative counts counter-clockwise ones.
///
/// Opposite steps cancel out, so turning back before the queue drains removes
/// presses instead of adding presses in the other direction.
#[derive(Debug, Default)]
pub struct PendingSteps {
    count: AtomicI16,
}

impl PendingSteps {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            count: AtomicI16::new(0),
        }
    }

    /// Add a decoded step to the queue.
    ///
    /// Safe to call from an interrupt handler; nests correctly if the caller
    /// already holds a critical section.
    pub fn record(&self, step: Step) {
        if !step.is_step() {
            return;
        }

        critical_section::with(|_| {
            let count = self.count.load(Ordering::Relaxed);
            self.count.store(
                count.saturating_add(i16::from(step.value())),
                Ordering::Relaxed,
            );
        });
    }

    /// Current net count. Unprotected read, may be stale by one update.
    pub fn count(&self) -> i16 {
        self.count.load(Ordering::Relaxed)
    }

    /// Unprotected emptiness check used as the cheap first test of a poll.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Remove one press from the queue, moving the count toward zero.
    ///
    /// The check and the update run in one critical section, so a step
    /// recorded concurrently can never be lost or double counted. Returns
    /// `None` if the queue was drained since the caller last looked.
    pub(crate) fn take_press(&self) -> Option<Direction> {
        critical_section::with(|_| {
            let count = self.count.load(Ordering::Relaxed);
            let direction = match count.signum() {
                1 => Direction::Cw,
                -1 => Direction::Ccw,
                _ => return None,
            };
            self.count.store(count - count.signum(), Ordering::Relaxed);
            Some(direction)
        })
    }
}
