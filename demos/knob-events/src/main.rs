//! Knob events demo
//!
//! Decodes a bare mechanical rotary encoder wired to two GPIOs of a
//! Raspberry Pi Pico 2 and logs the resulting press/release events via
//! defmt. A real build would forward them to a USB HID keyboard instead.
//!
//! # Wiring
//!
//! | Signal | Pico 2 Pin | Notes                              |
//! |--------|------------|------------------------------------|
//! | ENC A  | GP2        | Switches to GND, pull-up enabled   |
//! | ENC B  | GP3        | Switches to GND, pull-up enabled   |
//! | ENC C  | GND        | Common                             |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rotary_events::{
    encoder_sampling_task, event_dispatch_task, EmbassyClock, EventKind, EventPoller,
    EventScheduler, QuadratureLines, SchedulerConfig, StepFeeder, TaskConfig,
};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Scheduler shared by the sampling and dispatch tasks through its split
/// halves.
static SCHEDULER: StaticCell<EventScheduler<EmbassyClock>> = StaticCell::new();

/// Due events, from the dispatch task to the consumer in `main`.
static EVENTS: Channel<CriticalSectionRawMutex, EventKind, 4> = Channel::new();

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Concrete wrapper around the generic sampling loop.
#[embassy_executor::task]
async fn sample_task(
    lines: QuadratureLines<Input<'static>, Input<'static>>,
    feeder: StepFeeder<'static>,
) {
    encoder_sampling_task(lines, feeder, TaskConfig::default()).await;
}

/// Concrete wrapper around the generic dispatch loop.
#[embassy_executor::task]
async fn dispatch_task(poller: EventPoller<'static, EmbassyClock>) {
    event_dispatch_task(poller, EVENTS.sender(), TaskConfig::default()).await;
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("knob-events starting");

    let lines = QuadratureLines::new(
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
    );

    // 20 ms each way is enough for most desktop input stacks.
    let scheduler = SCHEDULER.init(EventScheduler::with_config(
        EmbassyClock,
        SchedulerConfig::with_delays(20, 20),
    ));
    let (feeder, poller) = scheduler.split();

    spawner.must_spawn(sample_task(lines, feeder));
    spawner.must_spawn(dispatch_task(poller));

    info!("All tasks spawned; rotate the knob");

    let receiver = EVENTS.receiver();
    loop {
        match receiver.receive().await {
            EventKind::CwPress => info!("volume up: press"),
            EventKind::CwRelease => info!("volume up: release"),
            EventKind::CcwPress => info!("volume down: press"),
            EventKind::CcwRelease => info!("volume down: release"),
            EventKind::None => {}
        }
    }
}
