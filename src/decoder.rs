//! Gray-code state machine for two-line quadrature encoders.
//!
//! The encoder lines A and B are packed into a 2-bit code `0bBA`. At every
//! detent both lines are high (`11`); one full click walks through three
//! intermediate codes before returning there:
//!
//! ```text
//!          CW   CCW
//! Rest     11   11
//! Begin    10   01
//! Mid      00   00
//! End      01   10
//! Rest     11   11
//! ```
//!
//! [`QuadratureDecoder`] follows that walk and reports a [`Step`] only when a
//! complete cycle closes back on `Rest`. Any code that skips a phase drops the
//! machine into [`DecoderState::Error`], where it stays until the next `Rest`
//! code resynchronizes it. A missed sample therefore loses the step instead of
//! producing a wrong one.

/// Direction of one completed detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i8)]
pub enum Step {
    /// Counter-clockwise step.
    Ccw = -1,
    /// No step completed.
    None = 0,
    /// Clockwise step.
    Cw = 1,
}

impl Step {
    /// Signed value of the step: `-1`, `0` or `+1`.
    pub const fn value(self) -> i8 {
        self as i8
    }

    /// `true` for [`Step::Cw`] and [`Step::Ccw`].
    pub const fn is_step(self) -> bool {
        !matches!(self, Step::None)
    }
}

impl From<Step> for i8 {
    fn from(step: Step) -> Self {
        step.value()
    }
}

/// Position of the encoder within the 4-phase Gray-code cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
    /// Detent position, both lines high.
    #[default]
    Rest,
    BeginCw,
    MidCw,
    EndCw,
    BeginCcw,
    MidCcw,
    EndCcw,
    /// A phase was skipped; waiting for the next detent to resync.
    Error,
}

impl DecoderState {
    /// The line code (`0bBA`) that holds while the encoder sits in this
    /// state, or `None` for [`DecoderState::Error`].
    pub const fn code(self) -> Option<u8> {
        match self {
            DecoderState::Rest => Some(0b11),
            DecoderState::BeginCw | DecoderState::EndCcw => Some(0b10),
            DecoderState::MidCw | DecoderState::MidCcw => Some(0b00),
            DecoderState::EndCw | DecoderState::BeginCcw => Some(0b01),
            DecoderState::Error => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// One cell of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Transition {
    next: DecoderState,
    step: Step,
}

const fn to(next: DecoderState) -> Transition {
    Transition {
        next,
        step: Step::None,
    }
}

const fn emit(next: DecoderState, step: Step) -> Transition {
    Transition { next, step }
}

/// Number of distinct line codes.
const CODE_COUNT: usize = 4;

/// Number of decoder states, including `Error`.
const STATE_COUNT: usize = 8;

use DecoderState::*;

/// `TRANSITIONS[state][code]`, codes ordered `00, 01, 10, 11`.
static TRANSITIONS: [[Transition; CODE_COUNT]; STATE_COUNT] = [
    // Rest:     invalid        CCW               CW               same
    [to(Error), to(BeginCcw), to(BeginCw), to(Rest)],
    // BeginCw:  fwd            invalid           same             back
    [to(MidCw), to(Error), to(BeginCw), to(Rest)],
    // MidCw:    same           fwd               back             invalid
    [to(MidCw), to(EndCw), to(BeginCw), to(Error)],
    // EndCw:    back           same              invalid          fwd + step
    [to(MidCw), to(EndCw), to(Error), emit(Rest, Step::Cw)],
    // BeginCcw: fwd            same              invalid          back
    [to(MidCcw), to(BeginCcw), to(Error), to(Rest)],
    // MidCcw:   same           back              fwd              invalid
    [to(MidCcw), to(BeginCcw), to(EndCcw), to(Error)],
    // EndCcw:   back           invalid           same             fwd + step
    [to(MidCcw), to(Error), to(EndCcw), emit(Rest, Step::Ccw)],
    // Error:    only a detent resyncs
    [to(Error), to(Error), to(Error), to(Rest)],
];

/// Packs the two line levels into a table column, B as the high bit.
#[inline]
const fn pack_code(a: bool, b: bool) -> usize {
    ((b as usize) << 1) | (a as usize)
}

/// Noise-tolerant quadrature decoder.
///
/// Holds only the current [`DecoderState`]; every call is a single table
/// lookup, so it can run inside an interrupt handler.
///
/// # Example
///
/// ```
/// use rotary_events::{QuadratureDecoder, Step};
///
/// let mut decoder = QuadratureDecoder::new();
/// // One clockwise detent: 10, 00, 01, 11 (as B, A)
/// assert_eq!(decoder.update(false, true), Step::None);
/// assert_eq!(decoder.update(false, false), Step::None);
/// assert_eq!(decoder.update(true, false), Step::None);
/// assert_eq!(decoder.update(true, true), Step::Cw);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuadratureDecoder {
    state: DecoderState,
}

impl QuadratureDecoder {
    /// Create a decoder that assumes the encoder rests on a detent.
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Rest,
        }
    }

    /// Current position in the Gray-code cycle.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Feed one sample of lines A and B.
    ///
    /// Returns [`Step::Cw`] or [`Step::Ccw`] when the sample completes a full
    /// detent cycle, [`Step::None`] otherwise.
    pub fn update(&mut self, a: bool, b: bool) -> Step {
        let transition = TRANSITIONS[self.state.index()][pack_code(a, b)];

        #[cfg(feature = "defmt")]
        if transition.next != self.state {
            match transition.next {
                DecoderState::Error => defmt::trace!("decoder lost sync in {}", self.state),
                DecoderState::Rest if self.state == DecoderState::Error => {
                    defmt::trace!("decoder resynced at rest")
                }
                _ => {}
            }
        }

        self.state = transition.next;
        transition.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [DecoderState; STATE_COUNT] =
        [Rest, BeginCw, MidCw, EndCw, BeginCcw, MidCcw, EndCcw, Error];

    // Helper: split a `0bBA` code into (a, b) line levels.
    fn lines(code: u8) -> (bool, bool) {
        (code & 0b01 != 0, code & 0b10 != 0)
    }

    fn feed(decoder: &mut QuadratureDecoder, codes: &[u8]) -> i32 {
        codes
            .iter()
            .map(|&code| {
                let (a, b) = lines(code);
                decoder.update(a, b).value() as i32
            })
            .sum()
    }

    fn decoder_in(state: DecoderState) -> QuadratureDecoder {
        QuadratureDecoder { state }
    }

    const CW_CYCLE: [u8; 4] = [0b10, 0b00, 0b01, 0b11];
    const CCW_CYCLE: [u8; 4] = [0b01, 0b00, 0b10, 0b11];

    // ── Table layout ─────────────────────────────────────────────────

    #[test]
    fn table_rows_follow_state_order() {
        for state in ALL_STATES {
            assert_eq!(ALL_STATES[state.index()], state);
        }
    }

    #[test]
    fn pack_code_puts_b_in_high_bit() {
        assert_eq!(pack_code(false, false), 0b00);
        assert_eq!(pack_code(true, false), 0b01);
        assert_eq!(pack_code(false, true), 0b10);
        assert_eq!(pack_code(true, true), 0b11);
    }

    #[test]
    fn only_end_states_emit_steps() {
        for state in ALL_STATES {
            for code in 0..CODE_COUNT {
                let transition = TRANSITIONS[state.index()][code];
                let expected = match (state, code) {
                    (EndCw, 0b11) => Step::Cw,
                    (EndCcw, 0b11) => Step::Ccw,
                    _ => Step::None,
                };
                assert_eq!(transition.step, expected, "{:?} code {:02b}", state, code);
            }
        }
    }

    // ── Full cycles ──────────────────────────────────────────────────

    #[test]
    fn new_decoder_starts_at_rest() {
        assert_eq!(QuadratureDecoder::new().state(), Rest);
        assert_eq!(QuadratureDecoder::default().state(), Rest);
    }

    #[test]
    fn clockwise_cycle_emits_one_cw_step() {
        let mut decoder = QuadratureDecoder::new();
        let steps: [Step; 4] = core::array::from_fn(|i| {
            let (a, b) = lines(CW_CYCLE[i]);
            decoder.update(a, b)
        });
        assert_eq!(steps, [Step::None, Step::None, Step::None, Step::Cw]);
        assert_eq!(decoder.state(), Rest);
    }

    #[test]
    fn counter_clockwise_cycle_emits_one_ccw_step() {
        let mut decoder = QuadratureDecoder::new();
        let steps: [Step; 4] = core::array::from_fn(|i| {
            let (a, b) = lines(CCW_CYCLE[i]);
            decoder.update(a, b)
        });
        assert_eq!(steps, [Step::None, Step::None, Step::None, Step::Ccw]);
        assert_eq!(decoder.state(), Rest);
    }

    #[test]
    fn consecutive_cycles_emit_one_step_each() {
        let mut decoder = QuadratureDecoder::new();
        for _ in 0..3 {
            assert_eq!(feed(&mut decoder, &CW_CYCLE), 1);
        }
        for _ in 0..2 {
            assert_eq!(feed(&mut decoder, &CCW_CYCLE), -1);
        }
        assert_eq!(decoder.state(), Rest);
    }

    #[test]
    fn backing_out_of_half_turn_emits_nothing() {
        let mut decoder = QuadratureDecoder::new();
        // CW up to Mid, then back through Begin to Rest.
        assert_eq!(feed(&mut decoder, &[0b10, 0b00, 0b10, 0b11]), 0);
        assert_eq!(decoder.state(), Rest);

        // CCW up to End, back to Mid, then forward again completes the step.
        assert_eq!(
            feed(&mut decoder, &[0b01, 0b00, 0b10, 0b00, 0b10, 0b11]),
            -1
        );
        assert_eq!(decoder.state(), Rest);
    }

    #[test]
    fn state_tracks_each_phase() {
        let mut decoder = QuadratureDecoder::new();
        let expected = [BeginCcw, MidCcw, EndCcw, Rest];
        for (code, state) in CCW_CYCLE.iter().zip(expected) {
            let (a, b) = lines(*code);
            decoder.update(a, b);
            assert_eq!(decoder.state(), state);
            assert_eq!(state.code(), Some(*code));
        }
    }

    // ── Idempotence ──────────────────────────────────────────────────

    #[test]
    fn repeated_sample_never_changes_state() {
        for state in ALL_STATES.into_iter().filter(|s| *s != Error) {
            let Some(code) = state.code() else { continue };
            let mut decoder = decoder_in(state);
            let (a, b) = lines(code);
            for _ in 0..5 {
                assert_eq!(decoder.update(a, b), Step::None);
                assert_eq!(decoder.state(), state, "state {:?} moved", state);
            }
        }
    }

    #[test]
    fn repeated_samples_inside_cycle_still_emit_once() {
        let mut decoder = QuadratureDecoder::new();
        let bouncy = [
            0b11, 0b10, 0b10, 0b00, 0b00, 0b00, 0b01, 0b01, 0b11, 0b11, 0b11,
        ];
        assert_eq!(feed(&mut decoder, &bouncy), 1);

        let bouncy = [0b01, 0b01, 0b00, 0b10, 0b10, 0b10, 0b11, 0b11];
        assert_eq!(feed(&mut decoder, &bouncy), -1);
    }

    // ── Error and resync ─────────────────────────────────────────────

    #[test]
    fn skipped_phase_enters_error_from_every_state() {
        // Codes that differ from the state's own code in both bits.
        for state in ALL_STATES.into_iter().filter(|s| *s != Error) {
            let Some(code) = state.code() else { continue };
            let mut decoder = decoder_in(state);
            let (a, b) = lines(code ^ 0b11);
            assert_eq!(decoder.update(a, b), Step::None);
            assert_eq!(decoder.state(), Error, "from {:?}", state);
        }
    }

    #[test]
    fn error_ignores_everything_but_rest() {
        let mut decoder = decoder_in(Error);
        for code in [0b00, 0b01, 0b10, 0b01, 0b00] {
            let (a, b) = lines(code);
            assert_eq!(decoder.update(a, b), Step::None);
            assert_eq!(decoder.state(), Error);
        }
        assert_eq!(decoder.update(true, true), Step::None);
        assert_eq!(decoder.state(), Rest);
    }

    #[test]
    fn corrupted_cycle_never_emits() {
        let mut decoder = QuadratureDecoder::new();
        // CW Begin then straight to End (Mid missed), finishing at Rest.
        assert_eq!(feed(&mut decoder, &[0b10, 0b01, 0b11]), 0);
        assert_eq!(decoder.state(), Rest);

        // Next clean cycle counts normally.
        assert_eq!(feed(&mut decoder, &CW_CYCLE), 1);
    }

    #[test]
    fn mid_sequence_glitch_discards_progress() {
        let mut decoder = QuadratureDecoder::new();
        // CCW to Mid, then the Rest code: End was skipped.
        assert_eq!(feed(&mut decoder, &[0b01, 0b00, 0b11]), 0);
        assert_eq!(decoder.state(), Error);
        // Error never emits, even if the tail of a cycle follows.
        assert_eq!(feed(&mut decoder, &[0b10, 0b00, 0b01]), 0);
        assert_eq!(decoder.state(), Error);
        assert_eq!(feed(&mut decoder, &[0b11]), 0);
        assert_eq!(decoder.state(), Rest);
    }

    #[test]
    fn exhaustive_short_sequences_emit_only_on_complete_cycles() {
        // Every sequence of four codes starting from Rest: a step is emitted
        // iff the sequence is exactly a clean CW or CCW cycle.
        for n in 0..(CODE_COUNT.pow(4)) {
            let codes: [u8; 4] = core::array::from_fn(|i| ((n >> (2 * i)) & 0b11) as u8);
            let mut decoder = QuadratureDecoder::new();
            let total = feed(&mut decoder, &codes);
            let expected = if codes == CW_CYCLE {
                1
            } else if codes == CCW_CYCLE {
                -1
            } else {
                0
            };
            assert_eq!(total, expected, "codes {:?}", codes);
        }
    }

    // ── Step helpers ─────────────────────────────────────────────────

    #[test]
    fn step_values() {
        assert_eq!(Step::Cw.value(), 1);
        assert_eq!(Step::None.value(), 0);
        assert_eq!(Step::Ccw.value(), -1);
        assert_eq!(i8::from(Step::Ccw), -1);
        assert!(Step::Cw.is_step());
        assert!(!Step::None.is_step());
    }
}
