//! Debounced press/release scheduling on top of the quadrature decoder.
//!
//! [`EventScheduler`] owns a [`QuadratureDecoder`], the shared
//! [`PendingSteps`] queue and the dispatch timing. It can be driven from one
//! context through `&mut self`, or [`split`](EventScheduler::split) into a
//! [`StepFeeder`] for the sampling context and an [`EventPoller`] for the
//! main loop.
//!
//! # Control flow
//!
//! 1. The sampler calls `update(a, b)` at high frequency. Completed steps are
//!    added to the pending queue; no events are produced here.
//! 2. The main loop calls `next_event()`. If nothing is queued the call
//!    returns [`EventKind::None`] without entering a critical section.
//! 3. Otherwise the required delay is selected (press-to-release while a
//!    release is outstanding, release-to-press otherwise) and compared with
//!    the time since the last emitted event.
//! 4. Once the delay has elapsed exactly one event is consumed: the
//!    outstanding release if there is one, else one press taken from the
//!    queue.

use crate::clock::Clock;
use crate::config::SchedulerConfig;
use crate::decoder::{QuadratureDecoder, Step};
use crate::event::{Direction, EventKind};
use crate::pending::PendingSteps;

/// Timestamp of the "previous event" before any event was emitted. The
/// first event therefore waits one full delay counted from clock zero.
const BOOT_TIMESTAMP_MS: u32 = 0;

// ── Consumer-side state ──────────────────────────────────────────────────

/// Everything only the polling side touches.
#[derive(Debug)]
struct Dispatcher<C> {
    clock: C,
    config: SchedulerConfig,
    next_release: Option<Direction>,
    last_event_ms: u32,
}

impl<C: Clock> Dispatcher<C> {
    const fn new(clock: C, config: SchedulerConfig) -> Self {
        Self {
            clock,
            config,
            next_release: None,
            last_event_ms: BOOT_TIMESTAMP_MS,
        }
    }

    fn poll(&mut self, pending: &PendingSteps) -> EventKind {
        // Cheap unprotected check; a step recorded right after it is picked
        // up by the next poll.
        if self.next_release.is_none() && pending.is_empty() {
            return EventKind::None;
        }

        let now = self.clock.now_ms();
        if !self.delay_elapsed(now) {
            return EventKind::None;
        }

        let event = self.emit(now, pending);

        #[cfg(feature = "defmt")]
        if !event.is_none() {
            defmt::debug!("encoder event {} at {} ms", event, now);
        }

        event
    }

    fn restart_delay(&mut self) {
        self.last_event_ms = self.clock.now_ms();
    }

    fn delay_elapsed(&self, now: u32) -> bool {
        let delay = self.config.delay_before_next(self.next_release.is_some());
        // Wrapping difference stays correct across counter overflow.
        now.wrapping_sub(self.last_event_ms) >= delay
    }

    /// Consume one event, assuming its delay has elapsed.
    fn emit(&mut self, now: u32, pending: &PendingSteps) -> EventKind {
        if let Some(direction) = self.next_release.take() {
            self.last_event_ms = now;
            return EventKind::release(direction);
        }

        match pending.take_press() {
            Some(direction) => {
                self.next_release = Some(direction);
                self.last_event_ms = now;
                EventKind::press(direction)
            }
            // Drained by the producer since the quick check.
            None => EventKind::None,
        }
    }
}

// ── Scheduler ────────────────────────────────────────────────────────────

/// Rotary encoder input turned into rate-limited press/release events.
///
/// # Example
///
/// ```
/// use core::cell::Cell;
/// use rotary_events::{EventKind, EventScheduler, SchedulerConfig};
///
/// let now = Cell::new(100u32);
/// let mut scheduler =
///     EventScheduler::with_config(|| now.get(), SchedulerConfig::with_delays(10, 10));
///
/// // One clockwise detent, as (a, b) samples.
/// for (a, b) in [(false, true), (false, false), (true, false), (true, true)] {
///     scheduler.update(a, b);
/// }
///
/// assert_eq!(scheduler.next_event(), EventKind::CwPress);
/// assert_eq!(scheduler.next_event(), EventKind::None);
/// now.set(110);
/// assert_eq!(scheduler.next_event(), EventKind::CwRelease);
/// ```
#[derive(Debug)]
pub struct EventScheduler<C> {
    decoder: QuadratureDecoder,
    pending: PendingSteps,
    dispatcher: Dispatcher<C>,
}

impl<C: Clock> EventScheduler<C> {
    /// Create a scheduler with [`SchedulerConfig::default`] delays.
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, SchedulerConfig::default())
    }

    /// Create a scheduler with explicit delays.
    pub fn with_config(clock: C, config: SchedulerConfig) -> Self {
        Self {
            decoder: QuadratureDecoder::new(),
            pending: PendingSteps::new(),
            dispatcher: Dispatcher::new(clock, config),
        }
    }

    /// Feed one sample of lines A and B and queue any completed step.
    ///
    /// Returns the decoded step for the caller's convenience.
    pub fn update(&mut self, a: bool, b: bool) -> Step {
        feed(&mut self.decoder, &self.pending, a, b)
    }

    /// Return the next event if its delay has elapsed, consuming it.
    ///
    /// Never blocks. [`EventKind::None`] means "nothing due yet, ask again".
    pub fn next_event(&mut self) -> EventKind {
        self.dispatcher.poll(&self.pending)
    }

    /// Replace the minimum gap between a press and its release.
    pub fn set_delay_press_to_release(&mut self, delay_ms: u32) {
        self.dispatcher.config.press_to_release_ms = delay_ms;
    }

    /// Replace the minimum gap between a release and the next press.
    pub fn set_delay_release_to_press(&mut self, delay_ms: u32) {
        self.dispatcher.config.release_to_press_ms = delay_ms;
    }

    /// Delays currently in effect.
    pub fn config(&self) -> SchedulerConfig {
        self.dispatcher.config
    }

    /// Net number of presses not yet emitted; negative for counter-clockwise.
    pub fn pending_steps(&self) -> i16 {
        self.pending.count()
    }

    /// See [`EventPoller::restart_delay`].
    pub fn restart_delay(&mut self) {
        self.dispatcher.restart_delay();
    }

    /// Direction of the release still owed for the last emitted press.
    pub fn release_pending(&self) -> Option<Direction> {
        self.dispatcher.next_release
    }

    /// Split into a producer half and a consumer half.
    ///
    /// The [`StepFeeder`] owns the decoder and is meant for the sampling
    /// context (interrupt handler or fast task); the [`EventPoller`] owns the
    /// timing state and is meant for the main loop. They share only the
    /// pending-step queue.
    pub fn split(&mut self) -> (StepFeeder<'_>, EventPoller<'_, C>) {
        (
            StepFeeder {
                decoder: &mut self.decoder,
                pending: &self.pending,
            },
            EventPoller {
                pending: &self.pending,
                dispatcher: &mut self.dispatcher,
            },
        )
    }
}

fn feed(decoder: &mut QuadratureDecoder, pending: &PendingSteps, a: bool, b: bool) -> Step {
    let step = decoder.update(a, b);
    pending.record(step);
    step
}

// ── Split halves ─────────────────────────────────────────────────────────

/// Producer half of a split [`EventScheduler`].
#[derive(Debug)]
pub struct StepFeeder<'a> {
    decoder: &'a mut QuadratureDecoder,
    pending: &'a PendingSteps,
}

impl StepFeeder<'_> {
    /// See [`EventScheduler::update`].
    pub fn update(&mut self, a: bool, b: bool) -> Step {
        feed(self.decoder, self.pending, a, b)
    }
}

/// Consumer half of a split [`EventScheduler`].
#[derive(Debug)]
pub struct EventPoller<'a, C> {
    pending: &'a PendingSteps,
    dispatcher: &'a mut Dispatcher<C>,
}

impl<C: Clock> EventPoller<'_, C> {
    /// See [`EventScheduler::next_event`].
    pub fn next_event(&mut self) -> EventKind {
        self.dispatcher.poll(self.pending)
    }

    /// Replace the minimum gap between a press and its release.
    pub fn set_delay_press_to_release(&mut self, delay_ms: u32) {
        self.dispatcher.config.press_to_release_ms = delay_ms;
    }

    /// Replace the minimum gap between a release and the next press.
    pub fn set_delay_release_to_press(&mut self, delay_ms: u32) {
        self.dispatcher.config.release_to_press_ms = delay_ms;
    }

    /// See [`EventScheduler::pending_steps`].
    pub fn pending_steps(&self) -> i16 {
        self.pending.count()
    }

    /// Restart the running delay from the current time.
    ///
    /// For consumers that buffer events: call it once the last returned
    /// event has actually been taken, so the next one is spaced from the
    /// moment of delivery rather than from the moment it was polled.
    pub fn restart_delay(&mut self) {
        self.dispatcher.restart_delay();
    }
}
