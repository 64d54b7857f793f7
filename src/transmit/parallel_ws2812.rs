//! WS2812 output on consecutive pins from one PIO state machine.
//!
//! Each 32-bit word carries eight bit slots of up to four strips (see
//! [`interleave`](crate::interleave)). The program pulls a nibble per slot and
//! drives it onto the pins in the middle of a fixed high/low envelope:
//!
//! ```text
//!          | 2 cycles | 5 cycles       | 3 cycles |
//! bit 1:   ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|__________
//! bit 0:   ‾‾‾‾‾‾‾‾‾‾|___________________________
//! ```

use embassy_rp::Peri;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::dma::{AnyChannel, Channel};
use embassy_rp::pio::{
    Common, Config, Direction, FifoJoin, Instance, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_time::{Duration, Timer};
use fixed::types::U24F8;

use super::Transmit;

/// WS2812 bit rate in kHz.
const BIT_RATE_KHZ: u32 = 800;

/// PIO cycles spent on each WS2812 bit.
const CYCLES_PER_BIT: u32 = 10;

/// Low time that latches the received colors.
const LATCH_GAP: Duration = Duration::from_micros(55);

/// Parallel WS2812 serializer for three strips on consecutive GPIOs.
pub struct ParallelWs2812<'d, PIO: Instance, const SM: usize> {
    dma: Peri<'d, AnyChannel>,
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> ParallelWs2812<'d, PIO, SM> {
    /// Load the program and start the state machine.
    ///
    /// `pin0`, `pin1` and `pin2` must be consecutive GPIOs; strip slot `k`
    /// drives `pin<k>`.
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        dma: Peri<'d, impl Channel>,
        pin0: Peri<'d, impl PioPin>,
        pin1: Peri<'d, impl PioPin>,
        pin2: Peri<'d, impl PioPin>,
    ) -> Self {
        let program = pio::pio_asm!(
            ".wrap_target",
            "out x, 4",
            "mov pins, !null [1]",
            "mov pins, x [4]",
            "mov pins, null [1]",
            ".wrap"
        );
        let loaded = common.load_program(&program.program);

        let pin0 = common.make_pio_pin(pin0);
        let pin1 = common.make_pio_pin(pin1);
        let pin2 = common.make_pio_pin(pin2);
        let pins = [&pin0, &pin1, &pin2];

        let mut cfg = Config::default();
        cfg.use_program(&loaded, &[]);
        cfg.set_out_pins(&pins);

        let clock_khz = U24F8::from_num(clk_sys_freq() / 1000);
        let bit_khz = U24F8::from_num(BIT_RATE_KHZ) * U24F8::from_num(CYCLES_PER_BIT);
        cfg.clock_divider = clock_khz / bit_khz;

        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: 32,
            direction: ShiftDirection::Right,
        };

        sm.set_config(&cfg);
        sm.set_pin_dirs(Direction::Out, &pins);
        sm.set_enable(true);

        defmt::debug!("parallel ws2812: state machine {} running", SM);
        Self {
            dma: dma.into(),
            sm,
        }
    }
}

impl<PIO: Instance, const SM: usize> Transmit for ParallelWs2812<'_, PIO, SM> {
    async fn transmit(&mut self, words: &[u32]) {
        self.sm.tx().dma_push(self.dma.reborrow(), words, false).await;
        Timer::after(LATCH_GAP).await;
    }
}
