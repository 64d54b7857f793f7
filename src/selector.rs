//! Choosing the active animation from the hardware selector.
//!
//! A 5-position DIP switch picks the animation (positions 0–3, a 4-bit code)
//! and the multiline [`Orientation`] (position 4). Codes map onto the
//! [`BuiltIn`] gallery; the many codes with no dedicated animation all land on
//! the default so a noisy switch still shows something sensible.
//!
//! # Example
//!
//! ```
//! use poi_envoy::selector::{BuiltIn, SwitchSetting};
//! use poi_envoy::packed_frame::Orientation;
//!
//! let setting = SwitchSetting::from_raw(0b1_1010);
//! assert_eq!(setting.built_in(), BuiltIn::Rainbow);
//! assert_eq!(setting.orientation, Orientation::Reversed);
//! ```

use embedded_hal::digital::InputPin;

use crate::animation::Animation;
use crate::animation::gallery::{self, STRIP_LEN};
use crate::packed_frame::Orientation;
use crate::{Error, Result};

/// Number of DIP switch positions read.
pub const SELECTOR_PINS: usize = 5;

const CODE_MASK: u8 = 0x0F;
const ORIENTATION_MASK: u8 = 0x10;

/// The built-in animations.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuiltIn {
    /// [`gallery::BLUE_WAVE`]; also the fallback for unassigned codes.
    #[default]
    BlueWave,
    /// [`gallery::SYMBOL`]
    Symbol,
    /// [`gallery::RAINBOW`]
    Rainbow,
    /// [`gallery::RED`]
    Red,
    /// [`gallery::GREEN`]
    Green,
    /// [`gallery::BLUE`]
    Blue,
}

impl BuiltIn {
    /// Map a selector code to an animation. Every code maps to something.
    #[must_use]
    #[allow(clippy::match_same_arms, reason = "reserved codes share the default")]
    pub const fn from_selector_code(code: u8) -> Self {
        match code {
            0..=8 => Self::BlueWave,
            9 => Self::Symbol,
            10 => Self::Rainbow,
            11 | 12 => Self::Red,
            13 => Self::Green,
            14 | 15 => Self::Blue,
            16..=u8::MAX => Self::BlueWave,
        }
    }

    /// The animation behind this variant.
    #[must_use]
    pub fn animation(self) -> &'static Animation<STRIP_LEN> {
        match self {
            Self::BlueWave => &gallery::BLUE_WAVE,
            Self::Symbol => &gallery::SYMBOL,
            Self::Rainbow => &gallery::RAINBOW,
            Self::Red => &gallery::RED,
            Self::Green => &gallery::GREEN,
            Self::Blue => &gallery::BLUE,
        }
    }
}

/// A decoded DIP switch reading.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchSetting {
    /// 4-bit animation code (positions 0–3, position 0 least significant).
    pub code: u8,
    /// Mounting orientation (position 4).
    pub orientation: Orientation,
}

impl SwitchSetting {
    /// Decode raw switch bits, position `k` at bit `k`.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        let orientation = if raw & ORIENTATION_MASK == 0 {
            Orientation::Normal
        } else {
            Orientation::Reversed
        };
        Self {
            code: raw & CODE_MASK,
            orientation,
        }
    }

    /// The built-in animation this setting selects.
    #[must_use]
    pub const fn built_in(self) -> BuiltIn {
        BuiltIn::from_selector_code(self.code)
    }
}

/// Picks the animation to play when playback (re)starts.
pub trait SelectAnimation<const N: usize> {
    /// Resolve the active animation. Must always return one.
    fn select(&mut self) -> &'static Animation<N>;
}

impl<const N: usize, F> SelectAnimation<N> for F
where
    F: FnMut() -> &'static Animation<N>,
{
    fn select(&mut self) -> &'static Animation<N> {
        self()
    }
}

/// The DIP switch, one input per position, read high = on.
///
/// Pins are given in position order; board wiring that does not follow GPIO
/// order is handled by the caller's choice of array order.
pub struct SelectorSwitch<P> {
    pins: [P; SELECTOR_PINS],
}

impl<P: InputPin> SelectorSwitch<P> {
    /// Wrap the five switch inputs, position 0 first.
    #[must_use]
    pub const fn new(pins: [P; SELECTOR_PINS]) -> Self {
        Self { pins }
    }

    /// Read and decode the switch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelectorPin`] if any input cannot be read.
    pub fn read(&mut self) -> Result<SwitchSetting> {
        let mut raw = 0u8;
        for (position, pin) in self.pins.iter_mut().enumerate() {
            if pin.is_high().map_err(|_| Error::SelectorPin)? {
                raw |= 1 << position;
            }
        }
        Ok(SwitchSetting::from_raw(raw))
    }

    /// Read the orientation bit, falling back to [`Orientation::Normal`].
    pub fn orientation(&mut self) -> Orientation {
        self.read().map_or(Orientation::Normal, |setting| setting.orientation)
    }

    /// Release the pins.
    pub fn into_pins(self) -> [P; SELECTOR_PINS] {
        self.pins
    }
}

impl<P: InputPin> SelectAnimation<STRIP_LEN> for SelectorSwitch<P> {
    fn select(&mut self) -> &'static Animation<STRIP_LEN> {
        let built_in = match self.read() {
            Ok(setting) => setting.built_in(),
            Err(_error) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("selector: unreadable switch, using default animation");
                BuiltIn::default()
            }
        };
        #[cfg(feature = "defmt")]
        defmt::info!("selector: {}", built_in);
        built_in.animation()
    }
}
