#![allow(missing_docs)]
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use poi_envoy::Error;
use poi_envoy::animation::gallery::{BLUE, BLUE_WAVE, GREEN, RAINBOW, RED, SYMBOL};
use poi_envoy::packed_frame::Orientation;
use poi_envoy::selector::{BuiltIn, SelectAnimation, SelectorSwitch, SwitchSetting};

#[derive(Debug)]
struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A switch position that reads a fixed level, or fails.
struct FakePin(Option<bool>);

impl ErrorType for FakePin {
    type Error = PinFault;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, PinFault> {
        self.0.ok_or(PinFault)
    }

    fn is_low(&mut self) -> Result<bool, PinFault> {
        self.is_high().map(|high| !high)
    }
}

fn switch(levels: [bool; 5]) -> SelectorSwitch<FakePin> {
    SelectorSwitch::new(levels.map(|level| FakePin(Some(level))))
}

#[test]
fn codes_map_to_animations() {
    let expected = [
        (0..=8, BuiltIn::BlueWave),
        (9..=9, BuiltIn::Symbol),
        (10..=10, BuiltIn::Rainbow),
        (11..=12, BuiltIn::Red),
        (13..=13, BuiltIn::Green),
        (14..=15, BuiltIn::Blue),
    ];
    for (codes, built_in) in expected {
        for code in codes {
            assert_eq!(BuiltIn::from_selector_code(code), built_in, "code {code}");
        }
    }
}

#[test]
fn reserved_codes_resolve_like_code_zero() {
    let default = BuiltIn::from_selector_code(0);
    assert_eq!(default, BuiltIn::default());
    for code in 16..=u8::MAX {
        assert_eq!(BuiltIn::from_selector_code(code), default, "code {code}");
    }
    assert!(core::ptr::eq(
        BuiltIn::from_selector_code(200).animation(),
        BuiltIn::from_selector_code(0).animation()
    ));
}

#[test]
fn variants_point_at_the_gallery() {
    let pairs = [
        (BuiltIn::BlueWave, &BLUE_WAVE),
        (BuiltIn::Symbol, &SYMBOL),
        (BuiltIn::Rainbow, &RAINBOW),
        (BuiltIn::Red, &RED),
        (BuiltIn::Green, &GREEN),
        (BuiltIn::Blue, &BLUE),
    ];
    for (built_in, animation) in pairs {
        assert!(core::ptr::eq(built_in.animation(), animation), "{built_in:?}");
    }
}

#[test]
fn raw_bits_split_into_code_and_orientation() {
    assert_eq!(
        SwitchSetting::from_raw(0b0_1001),
        SwitchSetting {
            code: 9,
            orientation: Orientation::Normal
        }
    );
    assert_eq!(
        SwitchSetting::from_raw(0b1_0000),
        SwitchSetting {
            code: 0,
            orientation: Orientation::Reversed
        }
    );
    // Bits above position 4 are ignored.
    assert_eq!(SwitchSetting::from_raw(0xE9), SwitchSetting::from_raw(0x09));
}

#[test]
fn switch_reads_position_zero_as_least_significant() -> Result<(), Error> {
    let mut selector = switch([true, false, true, true, false]);
    let setting = selector.read()?;
    assert_eq!(setting.code, 13);
    assert_eq!(setting.orientation, Orientation::Normal);
    assert_eq!(setting.built_in(), BuiltIn::Green);
    assert!(core::ptr::eq(selector.select(), &GREEN));
    Ok(())
}

#[test]
fn switch_position_four_sets_reversed() {
    let mut selector = switch([false, true, false, true, true]);
    assert_eq!(selector.orientation(), Orientation::Reversed);
    assert!(core::ptr::eq(selector.select(), &RAINBOW));
}

#[test]
fn unreadable_switch_falls_back_to_default() {
    let mut pins = [true, true, true, true, true].map(|level| FakePin(Some(level)));
    pins[2] = FakePin(None);
    let mut selector = SelectorSwitch::new(pins);

    assert!(matches!(selector.read(), Err(Error::SelectorPin)));
    assert_eq!(selector.orientation(), Orientation::Normal);
    assert!(core::ptr::eq(selector.select(), &BLUE_WAVE));
}
