//! Packing animation rows into the serializer's word stream.
//!
//! A [`PackedFrame`] holds exactly three words per LED position, in WS2812
//! transmission order: green, red, blue. Each word carries that channel for
//! every strip at that position (see [`interleave`](crate::interleave)).
//!
//! # Example
//!
//! ```
//! use poi_envoy::animation::{Rgb, Row};
//! use poi_envoy::packed_frame::PackedFrame;
//!
//! let mut frame = PackedFrame::<4>::new();
//! frame.pack_row(&Row::filled(Rgb::new(0, 0xFF, 0)));
//!
//! assert_eq!(frame.words().len(), 12);
//! // Green is sent first; strips 0..=2 set every bit.
//! assert_eq!(frame.words()[0], 0x7777_7777);
//! assert_eq!(frame.words()[1], 0);
//! ```

use crate::animation::{Rgb, Row, STRIPS};
use crate::interleave::interleave;

/// Words per LED position: one per color channel.
pub const CHANNELS: usize = 3;

/// How the stacked segments of a multiline poi are mounted.
///
/// ```text
/// Normal                                 Reversed
///   |   [2-0]  [2-1] ... [2-79] <- top      A   [2-0]  [2-1] ... [2-79] <- bottom
///   |  [1-0]  [1-1] ... [1-79]  <- mid      |  [1-0]  [1-1] ... [1-79]  <- mid
///   V [0-0]  [0-1] ... [0-79]   <- bottom   | [0-0]  [0-1] ... [0-79]   <- top
/// swing                                   swing
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Strip 0 shows the bottom row, strip 2 the top row.
    #[default]
    Normal,
    /// Strip 0 shows the top row, strip 2 the bottom row.
    Reversed,
}

/// One refresh of serializer words for `N` LEDs per strip.
///
/// Overwritten in place every cycle; never allocates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PackedFrame<const N: usize>([[u32; CHANNELS]; N]);

impl<const N: usize> PackedFrame<N> {
    /// Number of words handed to the serializer per refresh.
    pub const WORD_COUNT: usize = CHANNELS * N;

    /// Create a frame of all-zero words (every LED off).
    #[must_use]
    pub const fn new() -> Self {
        Self([[0; CHANNELS]; N])
    }

    /// The words in transmission order.
    #[must_use]
    pub fn words(&self) -> &[u32] {
        self.0.as_flattened()
    }

    /// Pack one row: strip `s` shows its own slot of that row.
    pub fn pack_row(&mut self, row: &Row<N>) {
        for (words, leds) in self.0.iter_mut().zip(row.iter()) {
            *words = pack_position(*leds);
        }
    }

    /// Pack three rows for the stacked segments of a multiline poi.
    ///
    /// Each strip slot takes its pixel from a different row: with
    /// [`Orientation::Normal`] slot 0 comes from `bottom`, slot 1 from `mid`
    /// and slot 2 from `top`; [`Orientation::Reversed`] swaps `top` and `bottom`.
    pub fn pack_rows(
        &mut self,
        top: &Row<N>,
        mid: &Row<N>,
        bottom: &Row<N>,
        orientation: Orientation,
    ) {
        let (first, last) = match orientation {
            Orientation::Normal => (bottom, top),
            Orientation::Reversed => (top, bottom),
        };
        let positions = first.iter().zip(mid.iter()).zip(last.iter());
        for (words, ((first, mid), last)) in self.0.iter_mut().zip(positions) {
            *words = pack_position([first[0], mid[1], last[2]]);
        }
    }

    /// Pack all-off LEDs.
    pub fn clear(&mut self) {
        self.0 = [[0; CHANNELS]; N];
    }
}

impl<const N: usize> Default for PackedFrame<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Interleave one LED position of every strip, green first.
#[inline(always)]
fn pack_position(strips: [Rgb; STRIPS]) -> [u32; CHANNELS] {
    let [s0, s1, s2] = strips;
    [
        interleave(s0.g, s1.g, s2.g, 0),
        interleave(s0.r, s1.r, s2.r, 0),
        interleave(s0.b, s1.b, s2.b, 0),
    ]
}
