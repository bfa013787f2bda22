//! Rotary encoder decoding with debounced press/release event scheduling.
//!
//! Turns the two quadrature lines of a mechanical or optical rotary encoder
//! into one step per detent, then spaces those steps out as press/release
//! pairs for hosts that need a minimum gap between key events (keyboard or
//! game-controller emulation, for instance).
//!
//! # Architecture
//!
//! - **[`QuadratureDecoder`]**: table-driven Gray-code state machine. Emits a
//!   step only for a complete detent cycle and resyncs at the next detent
//!   after a missed or glitched transition.
//! - **[`EventScheduler`]**: wraps the decoder, queues net steps in
//!   [`PendingSteps`] and releases one [`EventKind`] per poll once the
//!   configured delay has elapsed. [`split`](EventScheduler::split) hands the
//!   producer half to an interrupt handler and the consumer half to the main
//!   loop.
//! - **[`QuadratureLines`]**: reads the A/B pins through `embedded-hal`.
//!
//! # Quick start
//!
//! ```ignore
//! use rotary_events::{EventKind, EventScheduler, QuadratureLines};
//!
//! let mut lines = QuadratureLines::new(pin_a, pin_b);
//! let mut scheduler = EventScheduler::new(millis);
//!
//! loop {
//!     lines.sample(&mut scheduler)?;
//!     match scheduler.next_event() {
//!         EventKind::CwPress => keyboard.press(VOLUME_UP),
//!         EventKind::CwRelease => keyboard.release(VOLUME_UP),
//!         EventKind::CcwPress => keyboard.press(VOLUME_DOWN),
//!         EventKind::CcwRelease => keyboard.release(VOLUME_DOWN),
//!         EventKind::None => {}
//!     }
//! }
//! ```
//!
//! # Critical sections
//!
//! The pending-step queue is guarded with [`critical_section`]. Firmware must
//! link exactly one implementation (for example `cortex-m`'s
//! `critical-section-single-core` feature or `embassy-rp`'s
//! `critical-section-impl`).
//!
//! # Crate Features
//!
//! - **`defmt`**: [`defmt::Format`] on public types and structured logging.
//! - **`task`**: Embassy sampling/dispatch tasks and [`EmbassyClock`].

#![no_std]

pub mod clock;
pub mod config;
pub mod decoder;
pub mod error;
pub mod event;
pub mod pending;
pub mod sampler;
pub mod scheduler;
#[cfg(feature = "task")]
pub mod task;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use clock::Clock;
#[cfg(feature = "task")]
pub use clock::EmbassyClock;
#[cfg(feature = "task")]
pub use config::TaskConfig;
pub use config::{SchedulerConfig, DEFAULT_DELAY_MS};
pub use decoder::{DecoderState, QuadratureDecoder, Step};
pub use error::SamplerError;
pub use event::{Direction, EventKind};
pub use pending::PendingSteps;
pub use sampler::{QuadratureLines, StepSink};
pub use scheduler::{EventPoller, EventScheduler, StepFeeder};
#[cfg(feature = "task")]
pub use task::{encoder_sampling_task, event_dispatch_task};
