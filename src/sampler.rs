//! Reading the two encoder lines from GPIO pins.
//!
//! [`QuadratureLines`] owns the A and B input pins and turns one read of
//! both into a sample for any [`StepSink`]: the bare decoder, a whole
//! scheduler, or the producer half of a split scheduler.

use embedded_hal::digital::InputPin;

use crate::clock::Clock;
use crate::decoder::{QuadratureDecoder, Step};
use crate::error::SamplerError;
use crate::scheduler::{EventScheduler, StepFeeder};

/// Anything that consumes (a, b) line samples and reports completed steps.
pub trait StepSink {
    fn update(&mut self, a: bool, b: bool) -> Step;
}

impl StepSink for QuadratureDecoder {
    fn update(&mut self, a: bool, b: bool) -> Step {
        QuadratureDecoder::update(self, a, b)
    }
}

impl<C: Clock> StepSink for EventScheduler<C> {
    fn update(&mut self, a: bool, b: bool) -> Step {
        EventScheduler::update(self, a, b)
    }
}

impl StepSink for StepFeeder<'_> {
    fn update(&mut self, a: bool, b: bool) -> Step {
        StepFeeder::update(self, a, b)
    }
}

/// The A and B lines of one encoder.
///
/// Line levels are reported so that the detent position reads as `11`. Most
/// mechanical encoders switch to ground with pull-ups enabled and idle high,
/// which is the [`new`](Self::new) default; use
/// [`new_active_low`](Self::new_active_low) for encoders that idle low.
#[derive(Debug)]
pub struct QuadratureLines<A, B> {
    pin_a: A,
    pin_b: B,
    invert: bool,
}

impl<A, B, E> QuadratureLines<A, B>
where
    A: InputPin<Error = E>,
    B: InputPin<Error = E>,
{
    /// Lines that read high at the detent.
    pub fn new(pin_a: A, pin_b: B) -> Self {
        Self {
            pin_a,
            pin_b,
            invert: false,
        }
    }

    /// Lines that read low at the detent.
    pub fn new_active_low(pin_a: A, pin_b: B) -> Self {
        Self {
            pin_a,
            pin_b,
            invert: true,
        }
    }

    /// Read both lines once, returning `(a, b)`.
    ///
    /// # Errors
    /// * [`SamplerError::Pin`] if either pin read fails
    pub fn read(&mut self) -> Result<(bool, bool), SamplerError<E>> {
        let a = self.pin_a.is_high()? ^ self.invert;
        let b = self.pin_b.is_high()? ^ self.invert;
        Ok((a, b))
    }

    /// Read both lines and feed the sample to `sink`.
    ///
    /// # Errors
    /// * [`SamplerError::Pin`] if either pin read fails; `sink` is not
    ///   updated in that case.
    pub fn sample<S: StepSink>(&mut self, sink: &mut S) -> Result<Step, SamplerError<E>> {
        let (a, b) = self.read()?;
        Ok(sink.update(a, b))
    }

    /// Give the pins back.
    pub fn release(self) -> (A, B) {
        (self.pin_a, self.pin_b)
    }
}
