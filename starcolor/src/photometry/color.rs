//! Stellar color rendering and spectral classification for catalog visualization.
//!
//! This module turns an effective temperature into a displayable 8-bit RGB color
//! using an empirical blackbody fit, and implements the Harvard spectral
//! classification system (OBAFGKM) used to key per-class lookups elsewhere in the
//! crate.
//!
//! # Blackbody Fit
//!
//! The fit is piecewise per channel with a break at 6600K:
//!
//! - **Red**: saturated at or below the break, power-law falloff above it
//! - **Green**: logarithmic rise below the break, power-law falloff above it
//! - **Blue**: zero at or below 2000K, logarithmic rise up to the break, saturated above it
//!
//! The fit is evaluated directly on the temperature in Kelvin, clamped to
//! [1000K, 40000K], and each channel is truncated (not rounded) to an integer.
//! Output is bit-for-bit compatible with previously published bright-star datasets.
//!
//! # Examples
//!
//! ## Temperature to Color
//! ```rust
//! use starcolor::photometry::color::{temperature_to_rgb, Rgb};
//!
//! let hot = temperature_to_rgb(15000.0);
//! assert_eq!(hot, Rgb::new(98, 144, 255));
//! assert_eq!(hot.to_hex().as_str(), "#6290ff");
//!
//! // Cool stars lose their blue channel entirely
//! let cool = temperature_to_rgb(1500.0);
//! assert_eq!(cool.b, 0);
//! ```
//!
//! ## Spectral Classification
//! ```rust
//! use starcolor::photometry::color::SpectralClass;
//!
//! assert_eq!(SpectralClass::from_spectral_type("G2V"), Some(SpectralClass::G)); // Sun
//! assert_eq!(SpectralClass::from_spectral_type("m5V"), Some(SpectralClass::M));
//! assert_eq!(SpectralClass::from_spectral_type("DA2"), None); // white dwarf
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The spectral classification system for stars, known as the Morgan-Keenan system.
///
/// This system classifies stars based on their spectral characteristics, primarily temperature.
/// The main classes from hottest to coolest are: O, B, A, F, G, K, M.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralClass {
    /// O-type stars: Very hot and bright, with temperatures above 30,000K
    O,

    /// B-type stars: Hot and blue-white stars, temperatures 10,000-30,000K
    B,

    /// A-type stars: White stars with strong hydrogen lines, temperatures 7,500-10,000K
    A,

    /// F-type stars: Yellow-white stars, temperatures 6,000-7,500K
    F,

    /// G-type stars: Yellow stars like our Sun, temperatures 5,200-6,000K
    G,

    /// K-type stars: Orange stars, temperatures 3,700-5,200K
    K,

    /// M-type stars: Red stars, temperatures below 3,700K
    M,
}

impl SpectralClass {
    /// Classify a catalog spectral-type string such as `"G2V"` or `"b8Ia"`.
    ///
    /// Only the leading character is inspected (case-insensitive). Returns `None`
    /// for empty strings and for prefixes outside OBAFGKM (white dwarfs, carbon
    /// stars, blank or garbled entries).
    pub fn from_spectral_type(spect: &str) -> Option<Self> {
        match spect.chars().next()?.to_ascii_uppercase() {
            'O' => Some(SpectralClass::O),
            'B' => Some(SpectralClass::B),
            'A' => Some(SpectralClass::A),
            'F' => Some(SpectralClass::F),
            'G' => Some(SpectralClass::G),
            'K' => Some(SpectralClass::K),
            'M' => Some(SpectralClass::M),
            _ => None,
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display as a single character
        write!(
            f,
            "{}",
            match self {
                SpectralClass::O => 'O',
                SpectralClass::B => 'B',
                SpectralClass::A => 'A',
                SpectralClass::F => 'F',
                SpectralClass::G => 'G',
                SpectralClass::K => 'K',
                SpectralClass::M => 'M',
            }
        )
    }
}

/// An 8-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from real-valued channels, truncating toward zero and
    /// saturating at the `[0, 255]` bounds. NaN maps to 0.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: channel_to_u8(r),
            g: channel_to_u8(g),
            b: channel_to_u8(b),
        }
    }

    /// Lowercase `#rrggbb` form of this color.
    pub fn to_hex(&self) -> HexColor {
        HexColor(format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

fn channel_to_u8(value: f64) -> u8 {
    // `as` saturates and maps NaN to zero
    value.clamp(0.0, 255.0).trunc() as u8
}

/// Canonical `#rrggbb` color string, always lowercase and six digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back into channel values.
    pub fn to_rgb(&self) -> Rgb {
        // Construction guarantees six valid hex digits after the '#'
        let channel = |i: usize| {
            self.0
                .get(i..i + 2)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .unwrap_or(0)
        };
        Rgb::new(channel(1), channel(3), channel(5))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Rgb> for HexColor {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl From<HexColor> for String {
    fn from(hex: HexColor) -> Self {
        hex.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for HexColor {
    type Err = String;

    /// Parse `"#FF9944"`, `"ff9944"` and similar; output is normalized to lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color: {s}"));
        }

        Ok(HexColor(format!("#{}", digits.to_ascii_lowercase())))
    }
}

/// Coefficients of the piecewise blackbody-to-RGB fit.
///
/// Units are Kelvin throughout; channel values are on the 0-255 scale.
pub struct BlackbodyFit {}

impl BlackbodyFit {
    /// Lower clamp applied before evaluating the fit
    pub const MIN_TEMPERATURE: f64 = 1000.0;
    /// Upper clamp applied before evaluating the fit
    pub const MAX_TEMPERATURE: f64 = 40000.0;

    /// Break between the warm and hot branches of every channel
    pub const BREAK_TEMPERATURE: f64 = 6600.0;
    /// Temperature offset inside the hot-branch power laws
    pub const POWER_LAW_OFFSET: f64 = 6000.0;

    pub const RED_COEFF: f64 = 329.698727446;
    pub const RED_EXP: f64 = -0.1332047592;

    pub const GREEN_WARM_COEFF: f64 = 99.4708025861;
    pub const GREEN_WARM_OFFSET: f64 = -161.1195681661;
    pub const GREEN_HOT_COEFF: f64 = 288.1221695283;
    pub const GREEN_HOT_EXP: f64 = -0.0755148492;

    /// At or below this temperature the blue channel is zero
    pub const BLUE_CUTOFF: f64 = 2000.0;
    pub const BLUE_COEFF: f64 = 138.5177312231;
    pub const BLUE_OFFSET: f64 = -305.0447927307;

    pub fn red(t: f64) -> f64 {
        if t <= Self::BREAK_TEMPERATURE {
            255.0
        } else {
            Self::RED_COEFF * (t - Self::POWER_LAW_OFFSET).powf(Self::RED_EXP)
        }
    }

    pub fn green(t: f64) -> f64 {
        if t <= Self::BREAK_TEMPERATURE {
            Self::GREEN_WARM_COEFF * t.ln() + Self::GREEN_WARM_OFFSET
        } else {
            Self::GREEN_HOT_COEFF * (t - Self::POWER_LAW_OFFSET).powf(Self::GREEN_HOT_EXP)
        }
    }

    pub fn blue(t: f64) -> f64 {
        if t >= Self::BREAK_TEMPERATURE {
            255.0
        } else if t <= Self::BLUE_CUTOFF {
            0.0
        } else {
            Self::BLUE_COEFF * (t - Self::BLUE_CUTOFF).ln() + Self::BLUE_OFFSET
        }
    }
}

/// Convert an effective temperature to a display color.
///
/// The temperature is clamped to [1000K, 40000K] first, so any finite input
/// (including zero or negative values) yields a defined color. Each channel is
/// clamped to [0, 255] and truncated.
///
/// # Arguments
/// * `temperature` - Effective temperature in Kelvin
///
/// # Returns
/// The 8-bit RGB color; use [`Rgb::to_hex`] for the `#rrggbb` form
pub fn temperature_to_rgb(temperature: f64) -> Rgb {
    let t = if temperature.is_nan() {
        BlackbodyFit::MIN_TEMPERATURE
    } else {
        temperature.clamp(BlackbodyFit::MIN_TEMPERATURE, BlackbodyFit::MAX_TEMPERATURE)
    };

    Rgb::from_channels(
        BlackbodyFit::red(t),
        BlackbodyFit::green(t),
        BlackbodyFit::blue(t),
    )
}
