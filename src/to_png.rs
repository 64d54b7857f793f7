//! Long-exposure previews of poi playback.
//!
//! Playback is simulated on the host and every packed frame is decoded back
//! from the serializer words, so the picture shows exactly what the strips
//! would light. Time runs left to right, one column per refresh; the strips
//! are stacked bottom-up with LED 0 of each at the bottom of its band.
#![cfg(feature = "host")]

use png::{BitDepth, ColorType, Encoder};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::animation::{Animation, Rgb, Row, STRIPS};
use crate::interleave::deinterleave;
use crate::packed_frame::{CHANNELS, Orientation, PackedFrame};
use crate::playback::{ButtonFlag, ButtonLevel, Cycle, Playback};

/// Decode the LEDs shown by each of the first `cycles` refreshes of `animation`.
///
/// The button is never pressed. Idle refreshes (after a non-looping pass
/// halts) come back as [`Row::BLANK`].
#[must_use]
pub fn playback_columns<const N: usize>(
    animation: &'static Animation<N>,
    orientation: Orientation,
    cycles: usize,
) -> Vec<Row<N>> {
    let press = ButtonFlag::new();
    let mut playback = Playback::new(animation, orientation, &press);
    let mut select = || animation;
    let mut frame = PackedFrame::new();
    (0..cycles)
        .map(
            |_| match playback.next_cycle(ButtonLevel::Up, &mut select, &mut frame) {
                Cycle::Frame { .. } | Cycle::Blank => decode_frame(&frame),
                Cycle::Idle => Row::BLANK,
            },
        )
        .collect()
}

/// Recover the per-strip colors from a packed frame.
#[must_use]
pub fn decode_frame<const N: usize>(frame: &PackedFrame<N>) -> Row<N> {
    let mut row = Row::BLANK;
    for (leds, words) in row.iter_mut().zip(frame.words().chunks_exact(CHANNELS)) {
        let &[green, red, blue] = words else {
            continue;
        };
        let (green, red, blue) = (deinterleave(green), deinterleave(red), deinterleave(blue));
        let channels = red.into_iter().zip(green).zip(blue);
        for (led, ((r, g), b)) in leds.iter_mut().zip(channels) {
            *led = Rgb::new(r, g, b);
        }
    }
    row
}

/// Render `cycles` refreshes of `animation` as an 8-bit RGB PNG.
///
/// Each LED becomes a `cell_size` square, so the image is
/// `cycles * cell_size` wide and `3 * N * cell_size` tall.
///
/// # Errors
///
/// Returns an error if the image is too large or the file cannot be written.
pub fn write_playback_png<const N: usize>(
    animation: &'static Animation<N>,
    orientation: Orientation,
    output_path: impl AsRef<Path>,
    cycles: usize,
    cell_size: u32,
) -> Result<(), Box<dyn Error>> {
    assert!(cycles > 0, "cycles must be positive");
    assert!(cell_size > 0, "cell_size must be positive");
    let output_path = output_path.as_ref();
    let columns = playback_columns(animation, orientation, cycles);
    let width = u32::try_from(cycles)?
        .checked_mul(cell_size)
        .ok_or("image too wide")?;
    let height = u32::try_from(STRIPS * N)?
        .checked_mul(cell_size)
        .ok_or("image too tall")?;
    let pixels = exposure_pixels(&columns, usize::try_from(cell_size)?);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    println!("wrote PNG to {}", output_path.display());
    Ok(())
}

#[allow(
    clippy::indexing_slicing,
    reason = "led and strip are bounded by the row dimensions"
)]
fn exposure_pixels<const N: usize>(columns: &[Row<N>], cell_size: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(columns.len() * cell_size * STRIPS * N * cell_size * 3);
    for strip in (0..STRIPS).rev() {
        for led in (0..N).rev() {
            let line: Vec<u8> = columns
                .iter()
                .flat_map(|row| {
                    let pixel = row[led][strip];
                    [pixel.r, pixel.g, pixel.b].repeat(cell_size)
                })
                .collect();
            for _ in 0..cell_size {
                bytes.extend_from_slice(&line);
            }
        }
    }
    bytes
}
