//! The RUN/WAIT/HALT playback state machine.
//!
//! [`Playback`] does no I/O and never sleeps. Each call to
//! [`Playback::next_cycle`] performs one pass of the refresh loop: it looks at
//! the pending button press and the current button level, packs the next frame
//! and tells the caller what to do with it. The embedded runner (`poi` module)
//! supplies the level, starts the transfer and sleeps for
//! [`remaining`] or [`POLL_INTERVAL`].
//!
//! ```text
//!            press               release (reselect, cursor = start)
//!   RUN ─────────────> WAIT ────────────────────────────────> RUN
//!    │                  ^
//!    │ last row,        │ press
//!    │ no loop          │
//!    └─────> HALT ──────┘
//! ```
//!
//! # Example
//!
//! ```
//! use embassy_time::Duration;
//! use poi_envoy::animation::{Animation, Rgb, Row};
//! use poi_envoy::packed_frame::{Orientation, PackedFrame};
//! use poi_envoy::playback::{ButtonFlag, ButtonLevel, Cycle, Playback, PlaybackState};
//!
//! static ROWS: [Row<2>; 2] = [Row::filled(Rgb::new(9, 0, 0)), Row::BLANK];
//! static ONCE: Animation<2> = Animation::new(&ROWS, Duration::from_millis(4))
//!     .with_loop(false)
//!     .with_multiline(false);
//! static PRESS: ButtonFlag = ButtonFlag::new();
//!
//! let mut select = || &ONCE;
//! let mut frame = PackedFrame::new();
//! let mut playback = Playback::new(&ONCE, Orientation::Normal, &PRESS);
//!
//! let cycle = playback.next_cycle(ButtonLevel::Up, &mut select, &mut frame);
//! assert_eq!(cycle, Cycle::Frame { period: Duration::from_millis(4) });
//! playback.next_cycle(ButtonLevel::Up, &mut select, &mut frame);
//! assert_eq!(playback.state(), PlaybackState::Halt);
//!
//! PRESS.raise();
//! assert_eq!(playback.next_cycle(ButtonLevel::Down, &mut select, &mut frame), Cycle::Blank);
//! assert_eq!(playback.state(), PlaybackState::Wait);
//! ```

use embassy_time::{Duration, Instant};
use portable_atomic::{AtomicBool, Ordering};

use crate::animation::Animation;
use crate::packed_frame::{Orientation, PackedFrame};
use crate::selector::SelectAnimation;

/// Sleep between passes while waiting for a release or halted.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Pending button press, raised by the edge watcher and cleared by playback.
///
/// This is the only state shared between the button task and the refresh loop.
#[derive(Debug, Default)]
pub struct ButtonFlag(AtomicBool);

impl ButtonFlag {
    /// A lowered flag, usable in a `static`.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Record a press edge.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a press is pending.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Acknowledge the pending press.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Physical level of the push button.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonLevel {
    /// Held (line pulled low).
    Down,
    /// Released.
    #[default]
    Up,
}

/// Where playback is in the current pass.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cursor {
    /// Next logical row to show. Negative during multiline pre-roll.
    At(i32),
    /// A non-looping pass has finished.
    Halted,
}

/// Externally visible controller state.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackState {
    /// Showing rows.
    Run,
    /// Press pending; blank until the button is released.
    Wait,
    /// Finished a non-looping pass; idle until the next press.
    Halt,
}

/// What the runner should do after one pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cycle {
    /// Transmit the frame, then sleep for the rest of `period`.
    Frame {
        /// The animation's row period.
        period: Duration,
    },
    /// Transmit the (blank) frame, then sleep [`POLL_INTERVAL`].
    Blank,
    /// Transmit nothing; sleep [`POLL_INTERVAL`].
    Idle,
}

/// The playback controller for strips of `N` LEDs.
pub struct Playback<'a, const N: usize> {
    animation: &'static Animation<N>,
    orientation: Orientation,
    cursor: Cursor,
    press: &'a ButtonFlag,
}

impl<'a, const N: usize> Playback<'a, N> {
    /// Start playing `animation` from its first pass.
    ///
    /// `orientation` is fixed for the life of the controller.
    #[must_use]
    pub const fn new(
        animation: &'static Animation<N>,
        orientation: Orientation,
        press: &'a ButtonFlag,
    ) -> Self {
        Self {
            animation,
            orientation,
            cursor: Cursor::At(animation.start()),
            press,
        }
    }

    /// The animation being played.
    #[must_use]
    pub const fn animation(&self) -> &'static Animation<N> {
        self.animation
    }

    /// The mounting orientation used for multiline packing.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The current cursor.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// RUN, WAIT or HALT. A pending press takes precedence.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        if self.press.is_raised() {
            PlaybackState::Wait
        } else if self.cursor == Cursor::Halted {
            PlaybackState::Halt
        } else {
            PlaybackState::Run
        }
    }

    /// Perform one pass of the refresh loop.
    ///
    /// With a press pending, a held button blanks `frame`; a released button
    /// acknowledges the press, asks `selector` for the animation, rewinds to
    /// its start, and plays the first row in this same pass. When running, the
    /// row(s) at the cursor are packed into `frame` and the cursor advances,
    /// wrapping or halting at the end of the pass.
    pub fn next_cycle<S>(
        &mut self,
        level: ButtonLevel,
        selector: &mut S,
        frame: &mut PackedFrame<N>,
    ) -> Cycle
    where
        S: SelectAnimation<N> + ?Sized,
    {
        if self.press.is_raised() {
            match level {
                ButtonLevel::Down => {
                    frame.clear();
                    return Cycle::Blank;
                }
                ButtonLevel::Up => {
                    self.press.clear();
                    self.restart(selector.select());
                }
            }
        }

        let Cursor::At(index) = self.cursor else {
            return Cycle::Idle;
        };
        self.pack(index, frame);
        self.cursor = self.advance(index);
        Cycle::Frame {
            period: self.animation.period(),
        }
    }

    /// Switch to `animation` and rewind to its start.
    pub fn restart(&mut self, animation: &'static Animation<N>) {
        self.animation = animation;
        self.cursor = Cursor::At(animation.start());
    }

    fn pack(&self, index: i32, frame: &mut PackedFrame<N>) {
        let animation = self.animation;
        if animation.multiline() {
            frame.pack_rows(
                animation.extract(index),
                animation.extract(index.saturating_add(1)),
                animation.extract(index.saturating_add(2)),
                self.orientation,
            );
        } else {
            frame.pack_row(animation.extract(index));
        }
    }

    fn advance(&self, index: i32) -> Cursor {
        let next = index.saturating_add(1);
        if next < self.animation.limit() {
            Cursor::At(next)
        } else if self.animation.looping() {
            Cursor::At(0)
        } else {
            Cursor::Halted
        }
    }
}

/// Time left in a refresh period that began at `since`, or zero if overrun.
///
/// Sleeping for this (rather than the whole period) keeps successive cycle
/// starts `period` apart however long packing took.
#[must_use]
pub fn remaining(period: Duration, since: Instant, now: Instant) -> Duration {
    let elapsed = now.saturating_duration_since(since);
    period
        .checked_sub(elapsed)
        .unwrap_or(Duration::from_ticks(0))
}
