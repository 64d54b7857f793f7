#![allow(missing_docs)]
use embassy_time::{Duration, Instant};
use poi_envoy::animation::{Animation, Rgb, Row};
use poi_envoy::packed_frame::{Orientation, PackedFrame};
use poi_envoy::playback::{
    ButtonFlag, ButtonLevel, Cursor, Cycle, Playback, PlaybackState, remaining,
};
use poi_envoy::selector::SelectAnimation;
use poi_envoy::to_png::decode_frame;

const N: usize = 3;
const PERIOD: Duration = Duration::from_micros(2500);

const fn red(level: u8) -> Row<N> {
    Row::filled(Rgb::new(level, 0, 0))
}

static ROWS: [Row<N>; 4] = [red(1), red(2), red(3), red(4)];

static ONE_SHOT: Animation<N> = Animation::new(
    // Only the first three rows are part of this animation.
    ROWS.split_at(3).0,
    PERIOD,
)
.with_loop(false)
.with_multiline(false);

static TWO_LOOP: Animation<N> = Animation::new(ROWS.split_at(2).0, PERIOD).with_multiline(false);

static BOUNCE: Animation<N> = Animation::new(&ROWS, PERIOD).with_mirror(true);

static GREEN_ROWS: [Row<N>; 1] = [Row::filled(Rgb::new(0, 9, 0))];
static GREEN: Animation<N> = Animation::new(&GREEN_ROWS, Duration::from_millis(7));

/// Hands out one animation and counts how often it was asked.
struct Counting {
    animation: &'static Animation<N>,
    calls: usize,
}

impl Counting {
    const fn new(animation: &'static Animation<N>) -> Self {
        Self { animation, calls: 0 }
    }
}

impl SelectAnimation<N> for Counting {
    fn select(&mut self) -> &'static Animation<N> {
        self.calls += 1;
        self.animation
    }
}

#[test]
fn one_shot_plays_each_row_then_halts() {
    let press = ButtonFlag::new();
    let mut selector = Counting::new(&ONE_SHOT);
    let mut frame = PackedFrame::new();
    let mut playback = Playback::new(&ONE_SHOT, Orientation::Normal, &press);

    let mut cursors = vec![playback.cursor()];
    let mut shown = Vec::new();
    for _ in 0..3 {
        let cycle = playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
        assert_eq!(cycle, Cycle::Frame { period: PERIOD });
        shown.push(decode_frame(&frame));
        cursors.push(playback.cursor());
    }

    assert_eq!(
        cursors,
        [Cursor::At(0), Cursor::At(1), Cursor::At(2), Cursor::Halted]
    );
    assert_eq!(shown, [red(1), red(2), red(3)]);
    assert_eq!(playback.state(), PlaybackState::Halt);

    // Halted: nothing is packed, least of all the fourth table row.
    for _ in 0..5 {
        let cycle = playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
        assert_eq!(cycle, Cycle::Idle);
        assert_eq!(decode_frame(&frame), red(3));
    }
    assert_eq!(selector.calls, 0);
}

#[test]
fn looping_wraps_to_zero() {
    let press = ButtonFlag::new();
    let mut selector = Counting::new(&TWO_LOOP);
    let mut frame = PackedFrame::new();
    let mut playback = Playback::new(&TWO_LOOP, Orientation::Normal, &press);

    let mut shown = Vec::new();
    for _ in 0..5 {
        playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
        shown.push(decode_frame(&frame));
    }
    assert_eq!(shown, [red(1), red(2), red(1), red(2), red(1)]);
    assert_eq!(playback.cursor(), Cursor::At(1));
    assert_eq!(playback.state(), PlaybackState::Run);
}

#[test]
fn multiline_pre_roll_fills_in_from_the_bottom() {
    let press = ButtonFlag::new();
    let mut selector = Counting::new(&BOUNCE);
    let mut frame = PackedFrame::new();
    let mut playback = Playback::new(&BOUNCE, Orientation::Normal, &press);
    assert_eq!(playback.cursor(), Cursor::At(-2));

    playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
    let first = decode_frame(&frame);
    // Rows -2, -1 and 0: only strip 0 (bottom row) is lit.
    assert!(
        first
            .iter()
            .all(|leds| *leds == [Rgb::new(1, 0, 0), Rgb::default(), Rgb::default()])
    );

    playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
    let second = decode_frame(&frame);
    assert!(
        second
            .iter()
            .all(|leds| *leds == [Rgb::new(2, 0, 0), Rgb::new(1, 0, 0), Rgb::default()])
    );
}

#[test]
fn reversed_multiline_puts_leading_row_on_strip_two() {
    let press = ButtonFlag::new();
    let mut selector = Counting::new(&BOUNCE);
    let mut frame = PackedFrame::new();
    let mut playback = Playback::new(&BOUNCE, Orientation::Reversed, &press);

    playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
    let first = decode_frame(&frame);
    assert!(
        first
            .iter()
            .all(|leds| *leds == [Rgb::default(), Rgb::default(), Rgb::new(1, 0, 0)])
    );
}

#[test]
fn press_mid_run_blanks_then_restarts_at_pre_roll() {
    let press = ButtonFlag::new();
    let mut selector = Counting::new(&BOUNCE);
    let mut frame = PackedFrame::new();
    let mut playback = Playback::new(&BOUNCE, Orientation::Normal, &press);
    assert_eq!(BOUNCE.limit(), 8);

    while playback.cursor() != Cursor::At(5) {
        playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
    }
    assert_ne!(decode_frame(&frame), Row::BLANK);

    press.raise();
    assert_eq!(playback.state(), PlaybackState::Wait);
    for _ in 0..4 {
        let cycle = playback.next_cycle(ButtonLevel::Down, &mut selector, &mut frame);
        assert_eq!(cycle, Cycle::Blank);
        assert_eq!(decode_frame(&frame), Row::BLANK);
        assert_eq!(playback.cursor(), Cursor::At(5));
        assert_eq!(playback.state(), PlaybackState::Wait);
    }
    assert_eq!(selector.calls, 0);

    let cycle = playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
    assert_eq!(cycle, Cycle::Frame { period: PERIOD });
    assert_eq!(selector.calls, 1);
    assert!(!press.is_raised());
    assert_eq!(playback.state(), PlaybackState::Run);
    // The release pass already showed row -2, so the cursor is one further.
    assert_eq!(playback.cursor(), Cursor::At(-1));
    assert!(
        decode_frame(&frame)
            .iter()
            .all(|leds| *leds == [Rgb::new(1, 0, 0), Rgb::default(), Rgb::default()])
    );
}

#[test]
fn press_while_halted_waits_then_plays_the_new_selection() {
    let press = ButtonFlag::new();
    let mut selector = Counting::new(&GREEN);
    let mut frame = PackedFrame::new();
    let mut playback = Playback::new(&ONE_SHOT, Orientation::Normal, &press);

    for _ in 0..3 {
        playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
    }
    assert_eq!(playback.state(), PlaybackState::Halt);

    press.raise();
    assert_eq!(playback.state(), PlaybackState::Wait);
    let cycle = playback.next_cycle(ButtonLevel::Down, &mut selector, &mut frame);
    assert_eq!(cycle, Cycle::Blank);

    let cycle = playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
    assert_eq!(
        cycle,
        Cycle::Frame {
            period: Duration::from_millis(7)
        }
    );
    assert!(core::ptr::eq(playback.animation(), &GREEN));
    assert_eq!(playback.cursor(), Cursor::At(-1));
    assert_eq!(playback.state(), PlaybackState::Run);
}

#[test]
fn press_released_before_the_next_pass_restarts_immediately() {
    let press = ButtonFlag::new();
    let mut selector = Counting::new(&TWO_LOOP);
    let mut frame = PackedFrame::new();
    let mut playback = Playback::new(&TWO_LOOP, Orientation::Normal, &press);

    playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
    assert_eq!(playback.cursor(), Cursor::At(1));

    press.raise();
    let cycle = playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame);
    assert_eq!(cycle, Cycle::Frame { period: PERIOD });
    assert_eq!(selector.calls, 1);
    assert_eq!(decode_frame(&frame), red(1));
    assert_eq!(playback.cursor(), Cursor::At(1));
}

#[test]
fn closures_select_animations() {
    let press = ButtonFlag::new();
    let mut frame = PackedFrame::new();
    let mut playback = Playback::new(&ONE_SHOT, Orientation::Normal, &press);
    let mut select = || &TWO_LOOP;

    press.raise();
    playback.next_cycle(ButtonLevel::Up, &mut select, &mut frame);
    assert!(core::ptr::eq(playback.animation(), &TWO_LOOP));
}

#[test]
fn remaining_is_the_rest_of_the_period() {
    let start = Instant::from_micros(1_000);
    assert_eq!(remaining(PERIOD, start, start), PERIOD);
    assert_eq!(
        remaining(PERIOD, start, Instant::from_micros(1_600)),
        Duration::from_micros(1_900)
    );
    assert_eq!(
        remaining(PERIOD, start, Instant::from_micros(3_500)),
        Duration::from_ticks(0)
    );
    assert_eq!(
        remaining(PERIOD, start, Instant::from_micros(9_000)),
        Duration::from_ticks(0)
    );
    // A clock reading before the start counts as no time spent.
    assert_eq!(remaining(PERIOD, start, Instant::from_micros(10)), PERIOD);
}

#[test]
fn cycle_starts_do_not_drift() {
    let press = ButtonFlag::new();
    let mut selector = Counting::new(&BOUNCE);
    let mut frame = PackedFrame::new();
    let mut playback = Playback::new(&BOUNCE, Orientation::Normal, &press);

    let mut now = Instant::from_micros(123);
    let mut starts = Vec::new();
    for cycle_index in 0..150u64 {
        let start = now;
        starts.push(start);
        let Cycle::Frame { period } =
            playback.next_cycle(ButtonLevel::Up, &mut selector, &mut frame)
        else {
            panic!("expected a frame");
        };
        // Overhead varies from cycle to cycle but always fits the period.
        let overhead = Duration::from_micros((cycle_index * 389) % 2_400);
        now = start + overhead;
        now += remaining(period, start, now);
    }

    for pair in starts.windows(2) {
        assert_eq!(pair[1] - pair[0], PERIOD);
    }
    assert_eq!(
        *starts.last().unwrap() - starts[0],
        Duration::from_micros(2_500 * 149)
    );
}
