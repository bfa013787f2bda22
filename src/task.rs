//! Embassy tasks for sampling the encoder and dispatching its events.
//!
//! Both are plain generic `async fn`s, **not** Embassy `#[task]`s. Embassy
//! tasks cannot be generic, so callers wrap them in thin concrete tasks:
//!
//! ```ignore
//! static SCHEDULER: StaticCell<EventScheduler<EmbassyClock>> = StaticCell::new();
//! static EVENTS: Channel<CriticalSectionRawMutex, EventKind, 4> = Channel::new();
//!
//! #[embassy_executor::task]
//! async fn sample_task(lines: QuadratureLines<Input<'static>, Input<'static>>, feeder: StepFeeder<'static>) {
//!     encoder_sampling_task(lines, feeder, TaskConfig::default()).await;
//! }
//!
//! #[embassy_executor::task]
//! async fn dispatch_task(poller: EventPoller<'static, EmbassyClock>) {
//!     event_dispatch_task(poller, EVENTS.sender(), TaskConfig::default()).await;
//! }
//!
//! // In main:
//! let scheduler = SCHEDULER.init(EventScheduler::new(EmbassyClock));
//! let (feeder, poller) = scheduler.split();
//! spawner.spawn(sample_task(lines, feeder)).unwrap();
//! spawner.spawn(dispatch_task(poller)).unwrap();
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Ticker};
use embedded_hal::digital::InputPin;

use crate::clock::Clock;
use crate::config::TaskConfig;
use crate::event::EventKind;
use crate::sampler::QuadratureLines;
use crate::scheduler::{EventPoller, StepFeeder};

/// Sample the encoder lines every `config.sample_period_us` and feed the
/// producer half of a scheduler.
///
/// A failed pin read is logged and skipped; the decoder simply sees the
/// next good sample, and resyncs through its error state if a phase was
/// lost.
#[allow(clippy::needless_pass_by_value)] // config is small and consumed
pub async fn encoder_sampling_task<A, B, E>(
    mut lines: QuadratureLines<A, B>,
    mut feeder: StepFeeder<'_>,
    config: TaskConfig,
) where
    A: InputPin<Error = E>,
    B: InputPin<Error = E>,
{
    #[cfg(feature = "defmt")]
    defmt::info!("encoder sampling every {} us", config.sample_period_us);

    let mut ticker = Ticker::every(Duration::from_micros(config.sample_period_us));

    loop {
        ticker.next().await;

        if let Err(_e) = lines.sample(&mut feeder) {
            #[cfg(feature = "defmt")]
            defmt::error!("encoder line read failed");
        }
    }
}

/// Poll the consumer half of a scheduler every `config.poll_period_ms` and
/// forward each due event into `sender`.
///
/// Events are handed over one at a time: the next one is not polled until
/// the channel is empty again, and its delay counts from the poll that saw
/// the previous event taken. A slow consumer therefore still receives events
/// at least one delay apart, give or take one poll period.
#[allow(clippy::needless_pass_by_value)] // config is small and consumed
pub async fn event_dispatch_task<C, M, const N: usize>(
    mut poller: EventPoller<'_, C>,
    sender: Sender<'_, M, EventKind, N>,
    config: TaskConfig,
) where
    C: Clock,
    M: RawMutex,
{
    #[cfg(feature = "defmt")]
    defmt::info!("encoder event dispatch every {} ms", config.poll_period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(config.poll_period_ms));
    let mut handoff = Handoff::default();

    loop {
        ticker.next().await;

        let event = handoff.poll(&mut poller, sender.is_empty());
        if !event.is_none() {
            sender.send(event).await;
        }
    }
}

/// Tracks whether the last forwarded event is still sitting in the channel.
#[derive(Debug, Default)]
struct Handoff {
    in_flight: bool,
}

impl Handoff {
    fn poll<C: Clock>(
        &mut self,
        poller: &mut EventPoller<'_, C>,
        queue_empty: bool,
    ) -> EventKind {
        if self.in_flight {
            if !queue_empty {
                return EventKind::None;
            }
            // Taken since the last poll: space the next event from here.
            poller.restart_delay();
            self.in_flight = false;
        }

        let event = poller.next_event();
        self.in_flight = !event.is_none();
        event
    }
}
