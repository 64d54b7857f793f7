//! Host-side tasks for poi-envoy.
//!
//! ```text
//! cargo xtask image-table <image.png> [--name NAME] [--full-brightness]
//! ```
//!
//! `image-table` prints a Rust `static` holding one `Row` per image row. Each
//! image row is read left to right as LED positions, three pixels per position
//! (strip 0, 1, 2), so the image width must be a multiple of 3. Channels are
//! halved unless `--full-brightness` is given.

use std::error::Error;
use std::fmt::Write as _;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use png::{ColorType, Decoder, Transformations};

const STRIPS: usize = 3;

fn main() -> ExitCode {
    match run(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("usage: cargo xtask image-table <image.png> [--name NAME] [--full-brightness]");
            ExitCode::FAILURE
        }
    }
}

fn run(mut args: impl Iterator<Item = String>) -> Result<(), Box<dyn Error>> {
    match args.next().as_deref() {
        Some("image-table") => {
            let options = TableOptions::parse(args)?;
            print!("{}", image_table(&options)?);
            Ok(())
        }
        Some(other) => Err(format!("unknown task `{other}`").into()),
        None => Err("missing task".into()),
    }
}

#[derive(Debug)]
struct TableOptions {
    path: PathBuf,
    name: String,
    full_brightness: bool,
}

impl TableOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, Box<dyn Error>> {
        let mut path = None;
        let mut name = None;
        let mut full_brightness = false;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--name" => name = Some(args.next().ok_or("--name needs a value")?),
                "--full-brightness" => full_brightness = true,
                flag if flag.starts_with("--") => return Err(format!("unknown flag `{flag}`").into()),
                _ if path.is_none() => path = Some(PathBuf::from(&arg)),
                _ => return Err(format!("unexpected argument `{arg}`").into()),
            }
        }
        let path = path.ok_or("missing image path")?;
        let name = match name {
            Some(name) => name,
            None => static_name(&path),
        };
        Ok(Self {
            path,
            name,
            full_brightness,
        })
    }
}

/// `images/Blue Wave.png` becomes `BLUE_WAVE`.
fn static_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "IMAGE_");
    }
    name
}

/// Decoded 8-bit RGB pixels, row-major.
struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

fn read_rgb(path: &Path) -> Result<RgbImage, Box<dyn Error>> {
    let mut decoder = Decoder::new(File::open(path)?);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let mut buffer = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    let bytes = buffer.get(..info.buffer_size()).ok_or("short PNG frame")?;

    let samples = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => return Err("indexed PNG was not expanded".into()),
    };
    let width = usize::try_from(info.width)?;
    let height = usize::try_from(info.height)?;
    let line_size = info.line_size;

    let mut pixels = Vec::with_capacity(width * height);
    for line in bytes.chunks_exact(line_size).take(height) {
        for sample in line.chunks_exact(samples).take(width) {
            let pixel = match *sample {
                [v] | [v, _] => [v, v, v],
                [r, g, b] | [r, g, b, _] => [r, g, b],
                _ => return Err("unexpected sample layout".into()),
            };
            pixels.push(pixel);
        }
    }
    Ok(RgbImage {
        width,
        height,
        pixels,
    })
}

fn image_table(options: &TableOptions) -> Result<String, Box<dyn Error>> {
    let image = read_rgb(&options.path)?;
    if image.width == 0 || image.height == 0 {
        return Err("image is empty".into());
    }
    if image.width % STRIPS != 0 {
        return Err(format!("image width {} is not a multiple of {STRIPS}", image.width).into());
    }
    let leds = image.width / STRIPS;
    let scale = |v: u8| if options.full_brightness { v } else { v / 2 };

    let mut out = String::new();
    writeln!(
        out,
        "// Generated by `cargo xtask image-table {}`.",
        options.path.display()
    )?;
    writeln!(out, "use poi_envoy::animation::{{Rgb, Row}};")?;
    writeln!(out)?;
    writeln!(
        out,
        "pub static {}: [Row<{leds}>; {}] = [",
        options.name, image.height
    )?;
    for line in image.pixels.chunks_exact(image.width) {
        writeln!(out, "    Row([")?;
        for position in line.chunks_exact(STRIPS) {
            let strips: Vec<String> = position
                .iter()
                .map(|&[r, g, b]| {
                    format!(
                        "Rgb::new(0x{:02x}, 0x{:02x}, 0x{:02x})",
                        scale(r),
                        scale(g),
                        scale(b)
                    )
                })
                .collect();
            writeln!(out, "        [{}],", strips.join(", "))?;
        }
        writeln!(out, "    ]),")?;
    }
    writeln!(out, "];")?;
    Ok(out)
}
