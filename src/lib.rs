//! Firmware building blocks for a spinning LED poi on Pico 1 and 2.
//!
//! The poi carries three WS2812 strips wired to consecutive GPIO pins. One
//! [PIO](crate#glossary) state machine drives all of them at once from a single
//! interleaved word stream, so every refresh costs one DMA transfer.
//!
//! Data flows leaf-first:
//!
//! - [`interleave`] spreads one byte per strip into a shared bit-plane word.
//! - [`packed_frame`] packs one or three [`Row`](animation::Row)s into a
//!   [`PackedFrame`](packed_frame::PackedFrame).
//! - [`animation`] answers "which row is logical row `y`" under loop and mirror rules.
//! - [`playback`] is the RUN/WAIT/HALT state machine with drift-compensated timing.
//! - [`selector`] maps the DIP switch to a built-in animation.
//! - [`transmit`] hands packed frames to the serializer.
//!
//! [`poi`] holds the async tasks that tie these together. Host builds add
//! `to_png` for long-exposure previews.
//!
//! # Glossary
//!
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):** Pico 1 has 2. Pico 2 has 3.
//! - **DMA ([Direct Memory Access](https://en.wikipedia.org/wiki/Direct_memory_access)):** Both Pico 1 and 2 have 12 channels.
//! - **Multiline poi:** three LED segments stacked and spun together; each refresh
//!   composites three consecutive animation rows.
//! - **Mirror playback:** an animation followed by its own reverse (ping-pong).
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the 'arm' architecture feature for firmware builds");

#[cfg(all(not(feature = "defmt"), not(feature = "host")))]
compile_error!("Firmware builds log through defmt: enable the 'defmt' feature");

pub mod animation;
mod error;
pub mod interleave;
pub mod packed_frame;
pub mod playback;
pub mod poi;
pub mod selector;
#[cfg(feature = "host")]
pub mod to_png;
pub mod transmit;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
