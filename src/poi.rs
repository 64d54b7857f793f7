//! The embedded refresh loop and button watcher.
//!
//! Two tasks share a [`ButtonFlag`] and a [`ButtonLine`]:
//!
//! - [`watch_button`] owns the push-switch input. It raises the flag on each
//!   press edge and mirrors the debounced level into the line.
//! - [`run_poi`] owns the frame buffer and the transmitter. It drives
//!   [`Playback`] one pass at a time and sleeps between passes.
//!
//! See `demos/poi.rs` for the board wiring.

use embassy_futures::join::join;
use embassy_time::{Duration, Instant, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;
use portable_atomic::{AtomicBool, Ordering};

use crate::packed_frame::PackedFrame;
use crate::playback::{ButtonFlag, ButtonLevel, Cycle, POLL_INTERVAL, Playback};
use crate::selector::SelectAnimation;
use crate::transmit::Transmit;

/// Debounce delay for the push switch.
const BUTTON_DEBOUNCE_DELAY: Duration = Duration::from_millis(10);

/// The debounced level of the push switch, as last seen by [`watch_button`].
#[derive(Debug, Default)]
pub struct ButtonLine(AtomicBool);

impl ButtonLine {
    /// A released line, usable in a `static`.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Record the current level.
    pub fn set(&self, level: ButtonLevel) {
        self.0.store(level == ButtonLevel::Down, Ordering::Release);
    }

    /// The last recorded level.
    #[must_use]
    pub fn level(&self) -> ButtonLevel {
        if self.0.load(Ordering::Acquire) {
            ButtonLevel::Down
        } else {
            ButtonLevel::Up
        }
    }
}

/// Watch an active-low push switch forever.
///
/// Each falling edge marks `line` down and then raises `press`; once the
/// input has read high again for a debounce interval, `line` goes back up.
pub async fn watch_button<I>(mut input: I, press: &ButtonFlag, line: &ButtonLine) -> !
where
    I: Wait + InputPin,
{
    loop {
        wait_for_release(&mut input).await;
        line.set(ButtonLevel::Up);

        if input.wait_for_falling_edge().await.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("button: edge wait failed");
            Timer::after(BUTTON_DEBOUNCE_DELAY).await;
            continue;
        }
        // The line must read Down before the flag is seen, or playback would
        // take the press as already released.
        line.set(ButtonLevel::Down);
        press.raise();
        #[cfg(feature = "defmt")]
        defmt::debug!("button: pressed");
        Timer::after(BUTTON_DEBOUNCE_DELAY).await;
    }
}

async fn wait_for_release<I>(input: &mut I)
where
    I: Wait + InputPin,
{
    loop {
        let edge = input.wait_for_high().await;
        Timer::after(BUTTON_DEBOUNCE_DELAY).await;
        if edge.is_ok() && matches!(input.is_high(), Ok(true)) {
            return;
        }
    }
}

/// Run playback forever.
///
/// Each pass records its start time, lets `playback` pack `frame`, then
/// transmits it while sleeping until `start + period` (or for
/// [`POLL_INTERVAL`] when blank or idle), so packing and transfer time never
/// push later passes back. The next pass starts only after the
/// transfer has resolved, so `frame` is never repacked while the serializer is
/// still reading it.
pub async fn run_poi<T, S, const N: usize>(
    mut playback: Playback<'_, N>,
    mut transmitter: T,
    mut selector: S,
    line: &ButtonLine,
    frame: &mut PackedFrame<N>,
) -> !
where
    T: Transmit,
    S: SelectAnimation<N>,
{
    let mut state = playback.state();
    #[cfg(feature = "defmt")]
    defmt::info!(
        "poi: {} with {} rows, period {} us",
        state,
        playback.animation().height(),
        playback.animation().period().as_micros()
    );

    loop {
        let start = Instant::now();
        let cycle = playback.next_cycle(line.level(), &mut selector, frame);

        let next_state = playback.state();
        if next_state != state {
            #[cfg(feature = "defmt")]
            defmt::info!("poi: {} -> {}", state, next_state);
            state = next_state;
        }

        match cycle {
            Cycle::Frame { period } => {
                // Overrun deadlines are already past, so the next pass starts at once.
                join(transmitter.transmit(frame.words()), Timer::at(start + period)).await;
            }
            Cycle::Blank => {
                join(transmitter.transmit(frame.words()), Timer::after(POLL_INTERVAL)).await;
            }
            Cycle::Idle => Timer::after(POLL_INTERVAL).await,
        }
    }
}
