//! Stellar radius estimation in solar units.
//!
//! When a catalog luminosity is available the radius follows from the
//! Stefan–Boltzmann law, `L ∝ R² T⁴`, so `R = √L × (T☉ / T)²`. Otherwise a
//! representative radius for the spectral class is used.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::color::SpectralClass;
use super::parse_real;

/// Effective temperature of the Sun in Kelvin
pub const SOLAR_TEMPERATURE: f64 = 5778.0;

/// Radius from luminosity and temperature, rounded to two decimals.
///
/// Returns `None` unless both luminosity and temperature are finite and
/// strictly positive, or when the radius rounds to zero.
///
/// # Arguments
/// * `luminosity` - Luminosity in solar units
/// * `temperature` - Effective temperature in Kelvin
pub fn radius_from_luminosity(luminosity: f64, temperature: f64) -> Option<f64> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(luminosity) || !valid(temperature) {
        return None;
    }

    let radius =
        round_to_hundredths(luminosity.sqrt() * (SOLAR_TEMPERATURE / temperature).powi(2));
    (radius > 0.0 && radius.is_finite()).then_some(radius)
}

/// Round to two decimals the way the published dataset was produced: the
/// exact binary value decides, and exact ties go to the even hundredth.
fn round_to_hundredths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // `mul_add` gives the sign of `value * 100 - t` without intermediate rounding
    let below = |t: f64| value.mul_add(100.0, -t) < 0.0;
    let compare = |t: f64| value.mul_add(100.0, -t).partial_cmp(&0.0);

    let mut lower = (value * 100.0).floor();
    if below(lower) {
        lower -= 1.0;
    }

    let hundredths = match compare(lower + 0.5) {
        Some(Ordering::Greater) => lower + 1.0,
        Some(Ordering::Less) => lower,
        _ if lower % 2.0 == 0.0 => lower,
        _ => lower + 1.0,
    };
    hundredths / 100.0
}

/// Typical radius per spectral class, in solar radii.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusTable {
    pub o: f64,
    pub b: f64,
    pub a: f64,
    pub f: f64,
    pub g: f64,
    pub k: f64,
    pub m: f64,
    /// Used when the class is missing or outside OBAFGKM
    pub default: f64,
}

impl Default for RadiusTable {
    fn default() -> Self {
        Self {
            o: 10.0,
            b: 5.0,
            a: 2.0,
            f: 1.3,
            g: 1.0,
            k: 0.8,
            m: 0.5,
            default: 1.0,
        }
    }
}

impl RadiusTable {
    pub fn radius(&self, class: SpectralClass) -> f64 {
        match class {
            SpectralClass::O => self.o,
            SpectralClass::B => self.b,
            SpectralClass::A => self.a,
            SpectralClass::F => self.f,
            SpectralClass::G => self.g,
            SpectralClass::K => self.k,
            SpectralClass::M => self.m,
        }
    }

    /// Radius for a catalog spectral-type string.
    pub fn radius_for_spectral_type(&self, spect: &str) -> f64 {
        SpectralClass::from_spectral_type(spect)
            .map(|class| self.radius(class))
            .unwrap_or(self.default)
    }

    /// Estimate a star's radius.
    ///
    /// A usable luminosity takes precedence over the spectral type. A
    /// non-positive temperature disables the luminosity path rather than
    /// dividing by zero.
    pub fn estimate(&self, spect: &str, temperature: f64, luminosity: Option<f64>) -> f64 {
        luminosity
            .and_then(|lum| radius_from_luminosity(lum, temperature))
            .unwrap_or_else(|| self.radius_for_spectral_type(spect))
    }
}

/// Estimate a star's radius from raw catalog values using the default table.
///
/// # Examples
/// ```rust
/// use starcolor::photometry::size::estimate_radius;
///
/// assert_eq!(estimate_radius("", 5778.0, "1.0"), 1.0);   // the Sun
/// assert_eq!(estimate_radius("M5V", 3000.0, ""), 0.5);  // class fallback
/// assert_eq!(estimate_radius("G2V", 0.0, "4.2"), 1.0);  // zero temperature guarded
/// ```
pub fn estimate_radius(spect: &str, temperature: f64, luminosity: &str) -> f64 {
    RadiusTable::default().estimate(spect, temperature, parse_real(luminosity))
}
