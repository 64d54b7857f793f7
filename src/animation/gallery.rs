//! Built-in animations for the 80-LED poi.
//!
//! Every table is generated by a `const fn`, so the images cost flash but no
//! startup time. Channel values are pre-halved, matching what
//! `cargo xtask image-table` emits for converted PNGs.

use embassy_time::Duration;

use super::{Animation, Rgb, Row, STRIPS};

/// LEDs on each strip of the poi.
pub const STRIP_LEN: usize = 80;

const DEFAULT_PERIOD_US: u64 = 2500;

/// Refresh period of the built-in animations (400 Hz).
pub const DEFAULT_PERIOD: Duration = Duration::from_micros(DEFAULT_PERIOD_US);

/// Row type of the built-in animations.
pub type PoiRow = Row<STRIP_LEN>;

const BLUE_WAVE_HEIGHT: usize = 60;
const SYMBOL_HEIGHT: usize = 32;
const RAINBOW_HEIGHT: usize = 48;

static BLUE_WAVE_ROWS: [PoiRow; BLUE_WAVE_HEIGHT] = blue_wave();
static SYMBOL_ROWS: [PoiRow; SYMBOL_HEIGHT] = symbol();
static RAINBOW_ROWS: [PoiRow; RAINBOW_HEIGHT] = rainbow();
static RED_ROWS: [PoiRow; 1] = [Row::filled(Rgb::new(127, 0, 0))];
static GREEN_ROWS: [PoiRow; 1] = [Row::filled(Rgb::new(0, 127, 0))];
static BLUE_ROWS: [PoiRow; 1] = [Row::filled(Rgb::new(0, 0, 127))];

/// A single pass of blue ripples, played slowly on one segment, then halts.
pub static BLUE_WAVE: Animation<STRIP_LEN> = Animation::new(
    &BLUE_WAVE_ROWS,
    Duration::from_micros(DEFAULT_PERIOD_US * 3),
)
.with_loop(false)
.with_multiline(false);

/// Repeating chevrons.
pub static SYMBOL: Animation<STRIP_LEN> = Animation::new(&SYMBOL_ROWS, DEFAULT_PERIOD);

/// Hue wheel drifting along the strips.
pub static RAINBOW: Animation<STRIP_LEN> = Animation::new(&RAINBOW_ROWS, DEFAULT_PERIOD);

/// Solid red.
pub static RED: Animation<STRIP_LEN> = Animation::new(&RED_ROWS, DEFAULT_PERIOD);

/// Solid green.
pub static GREEN: Animation<STRIP_LEN> = Animation::new(&GREEN_ROWS, DEFAULT_PERIOD);

/// Solid blue.
pub static BLUE: Animation<STRIP_LEN> = Animation::new(&BLUE_ROWS, DEFAULT_PERIOD);

/// Pixel position along the whole row, strip slots interleaved (0..3 * N).
const fn position(led: usize, strip: usize) -> usize {
    led * STRIPS + strip
}

/// Triangle wave over 0..=255 with a 256-step period.
const fn triangle(phase: usize) -> u8 {
    let phase = phase % 256;
    if phase < 128 {
        (phase * 2) as u8
    } else {
        ((255 - phase) * 2) as u8
    }
}

/// Classic 3-segment color wheel.
const fn wheel(hue: u8) -> Rgb {
    let hue = hue as u16;
    if hue < 85 {
        Rgb::new((255 - hue * 3) as u8, (hue * 3) as u8, 0)
    } else if hue < 170 {
        let hue = hue - 85;
        Rgb::new(0, (255 - hue * 3) as u8, (hue * 3) as u8)
    } else {
        let hue = hue - 170;
        Rgb::new((hue * 3) as u8, 0, (255 - hue * 3) as u8)
    }
}

const fn halve(color: Rgb) -> Rgb {
    Rgb::new(color.r / 2, color.g / 2, color.b / 2)
}

const fn blue_wave<const H: usize>() -> [PoiRow; H] {
    let mut rows = [Row::BLANK; H];
    let mut y = 0;
    while y < H {
        let mut led = 0;
        while led < STRIP_LEN {
            let mut strip = 0;
            while strip < STRIPS {
                let level = triangle(position(led, strip) * 6 + y * 13);
                let glow = level / 8;
                rows[y].0[led][strip] = halve(Rgb::new(0, glow, level));
                strip += 1;
            }
            led += 1;
        }
        y += 1;
    }
    rows
}

const fn symbol<const H: usize>() -> [PoiRow; H] {
    let mut rows = [Row::BLANK; H];
    let mut y = 0;
    while y < H {
        let offset = if y < H / 2 { y } else { H - y };
        let mut led = 0;
        while led < STRIP_LEN {
            let mut strip = 0;
            while strip < STRIPS {
                if (position(led, strip) + offset * 4) % 40 < 6 {
                    rows[y].0[led][strip] = halve(Rgb::new(255, 160, 0));
                }
                strip += 1;
            }
            led += 1;
        }
        y += 1;
    }
    rows
}

const fn rainbow<const H: usize>() -> [PoiRow; H] {
    let mut rows = [Row::BLANK; H];
    let span = STRIP_LEN * STRIPS;
    let mut y = 0;
    while y < H {
        let mut led = 0;
        while led < STRIP_LEN {
            let mut strip = 0;
            while strip < STRIPS {
                let hue = (position(led, strip) * 256 / span + y * 256 / H) % 256;
                rows[y].0[led][strip] = halve(wheel(hue as u8));
                strip += 1;
            }
            led += 1;
        }
        y += 1;
    }
    rows
}
