//! Bit-plane interleaving for parallel WS2812 output.
//!
//! The parallel serializer emits one 4-bit nibble per WS2812 bit slot, one bit
//! per strip. A channel byte for each of up to four strips therefore becomes a
//! single 32-bit word:
//!
//! ```text
//! (MSB)                                                                 (LSB)
//! [s3 b0][s2 b0][s1 b0][s0 b0] [s3 b1] ... [s0 b1] ... [s3 b7][s2 b7][s1 b7][s0 b7]
//! ```
//!
//! The serializer shifts nibbles out least-significant first, so the nibble
//! holding bit 7 of every strip byte goes on the wire first, as WS2812 expects.

/// Maximum number of strips one interleaved word can carry.
pub const MAX_STRIPS: usize = 4;

/// Spread of a single byte across the nibbles of a word, strip slot 0.
///
/// Bit `j` of the index lands on word bit `4 * (7 - j)`.
pub const SPREAD_TABLE: [u32; 256] = build_spread_table();

const fn build_spread_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut value = 0;
    while value < 256 {
        let mut word = 0u32;
        let mut bit = 0;
        while bit < 8 {
            if value & (1 << bit) != 0 {
                word |= 1 << (4 * (7 - bit));
            }
            bit += 1;
        }
        table[value] = word;
        value += 1;
    }
    table
}

/// Looks up the strip-0 spread pattern of `value`.
#[inline(always)]
#[must_use]
pub const fn spread(value: u8) -> u32 {
    SPREAD_TABLE[value as usize]
}

/// Combines one channel byte per strip into a single serializer word.
///
/// Strip `k` occupies bit `k` of every nibble. Pass 0 for unused strips.
#[inline(always)]
#[must_use]
pub const fn interleave(v0: u8, v1: u8, v2: u8, v3: u8) -> u32 {
    spread(v0) | (spread(v1) << 1) | (spread(v2) << 2) | (spread(v3) << 3)
}

/// Recovers the per-strip channel bytes from a serializer word.
#[must_use]
pub const fn deinterleave(word: u32) -> [u8; MAX_STRIPS] {
    let mut values = [0u8; MAX_STRIPS];
    let mut strip = 0;
    while strip < MAX_STRIPS {
        let mut value = 0u8;
        let mut bit = 0;
        while bit < 8 {
            if word & (1 << (4 * (7 - bit) + strip)) != 0 {
                value |= 1 << bit;
            }
            bit += 1;
        }
        values[strip] = value;
        strip += 1;
    }
    values
}
