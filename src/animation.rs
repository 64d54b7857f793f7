//! Static animations and the frame source that walks them.
//!
//! An [`Animation`] is a `'static` table of [`Row`]s plus playback rules.
//! [`Animation::extract`] maps a logical row index to the row to display,
//! applying the loop and mirror rules and returning [`Row::BLANK`] for
//! anything outside them.
//!
//! # Example
//!
//! ```
//! use embassy_time::Duration;
//! use poi_envoy::animation::{Animation, Row, Rgb};
//!
//! static ROWS: [Row<2>; 3] = [
//!     Row::filled(Rgb::new(1, 0, 0)),
//!     Row::filled(Rgb::new(2, 0, 0)),
//!     Row::filled(Rgb::new(3, 0, 0)),
//! ];
//! static BOUNCE: Animation<2> = Animation::new(&ROWS, Duration::from_millis(5))
//!     .with_mirror(true);
//!
//! // A B C C B A A B C ...
//! assert_eq!(BOUNCE.limit(), 6);
//! assert_eq!(BOUNCE.extract(3), &ROWS[2]);
//! assert_eq!(BOUNCE.extract(5), &ROWS[0]);
//! assert_eq!(BOUNCE.extract(-1), &Row::BLANK);
//! ```

use core::ops::{Deref, DerefMut};

use embassy_time::Duration;

use crate::{Error, Result};

pub mod gallery;

/// RGB color representation re-exported from the `smart_leds` crate.
pub use smart_leds::RGB8 as Rgb;

/// Number of strips fed from each row.
pub const STRIPS: usize = 3;

/// One refresh worth of pixels: `N` LED positions, each with one pixel per strip.
///
/// `row[i][s]` is LED `i` of strip `s`. In memory this is the 9-bytes-per-position
/// layout the image converter produces (R, G, B for strip 0, then 1, then 2).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Row<const N: usize>(pub [[Rgb; STRIPS]; N]);

impl<const N: usize> Row<N> {
    /// Number of LEDs per strip.
    pub const LEN: usize = N;

    /// All LEDs off.
    pub const BLANK: Self = Self([[Rgb::new(0, 0, 0); STRIPS]; N]);

    /// Create a row with every LED of every strip set to `color`.
    #[must_use]
    pub const fn filled(color: Rgb) -> Self {
        Self([[color; STRIPS]; N])
    }
}

impl<const N: usize> Deref for Row<N> {
    type Target = [[Rgb; STRIPS]; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for Row<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> Default for Row<N> {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Largest row count whose mirrored length still fits the `i32` playback cursor.
pub const MAX_HEIGHT: usize = (i32::MAX / 2) as usize;

/// A build-time animation: a row table and the rules for playing it.
///
/// Built with `const fn`s so it can live in a `static`; selection only ever
/// copies a `&'static Animation`.
#[derive(Clone, Copy, Debug)]
pub struct Animation<const N: usize> {
    rows: &'static [Row<N>],
    period: Duration,
    looping: bool,
    mirror: bool,
    multiline: bool,
}

impl<const N: usize> Animation<N> {
    /// Create an animation that loops, plays forward only, and composites three
    /// rows per refresh.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in a `static`) if `rows` is empty or taller than
    /// [`MAX_HEIGHT`].
    #[must_use]
    pub const fn new(rows: &'static [Row<N>], period: Duration) -> Self {
        assert!(!rows.is_empty(), "animation requires at least one row");
        assert!(rows.len() <= MAX_HEIGHT, "animation is too tall");
        Self {
            rows,
            period,
            looping: true,
            mirror: false,
            multiline: true,
        }
    }

    /// Fallible counterpart of [`Animation::new`] for row tables built at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyAnimation`] or [`Error::AnimationTooTall`].
    pub const fn try_new(rows: &'static [Row<N>], period: Duration) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyAnimation);
        }
        if rows.len() > MAX_HEIGHT {
            return Err(Error::AnimationTooTall { height: rows.len() });
        }
        Ok(Self::new(rows, period))
    }

    /// Restart from the first row after the last (`true`) or halt (`false`).
    #[must_use]
    pub const fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Follow the rows with the same rows reversed before repeating.
    #[must_use]
    pub const fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Composite three consecutive rows per refresh for the stacked poi.
    #[must_use]
    pub const fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    /// The row table.
    #[must_use]
    pub const fn rows(&self) -> &'static [Row<N>] {
        self.rows
    }

    /// Number of rows in the table.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.rows.len()
    }

    /// Time between successive displayed rows.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Whether playback restarts after the last row.
    #[must_use]
    pub const fn looping(&self) -> bool {
        self.looping
    }

    /// Whether the reversed rows follow the forward rows.
    #[must_use]
    pub const fn mirror(&self) -> bool {
        self.mirror
    }

    /// Whether each refresh composites three rows.
    #[must_use]
    pub const fn multiline(&self) -> bool {
        self.multiline
    }

    /// Length of one pass: `2 * height` when mirrored, `height` otherwise.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "height is bounded by MAX_HEIGHT at construction"
    )]
    pub const fn limit(&self) -> i32 {
        let height = self.rows.len() as i32;
        if self.mirror { height * 2 } else { height }
    }

    /// Cursor position a fresh pass starts from.
    ///
    /// Multiline playback starts two rows early so the upper segments ease in
    /// with blank rows.
    #[must_use]
    pub const fn start(&self) -> i32 {
        if self.multiline { -2 } else { 0 }
    }

    /// The row to show for logical row `y`.
    ///
    /// Negative rows and, without looping, rows at or past [`limit`](Self::limit)
    /// are [`Row::BLANK`]. Otherwise `y` wraps modulo `limit`, and the mirrored
    /// half reads the table backwards.
    #[must_use]
    pub fn extract(&self, y: i32) -> &'static Row<N> {
        let blank: &'static Row<N> = const { &Row::<N>::BLANK };
        if y < 0 {
            return blank;
        }
        let limit = self.limit();
        if !self.looping && y >= limit {
            return blank;
        }
        let mody = y % limit;
        let height = self.height();
        let index = usize::try_from(mody).unwrap_or(usize::MAX);
        let index = if self.mirror && index >= height {
            // limit - mody - 1
            (2 * height) - index - 1
        } else {
            index
        };
        self.rows.get(index).unwrap_or(blank)
    }
}
