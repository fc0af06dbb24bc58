//! B−V color index to effective temperature.
//!
//! Uses the empirical relation `log10(T) = 3.988 − 0.881 (B−V)`, valid for
//! color indices strictly between −0.4 and 2.0. Outside that window a fixed
//! fallback temperature is used, and a missing or unparseable index
//! short-circuits to a fixed temperature with a white color.

use log::debug;
use serde::{Deserialize, Serialize};

use super::color::{temperature_to_rgb, Rgb};
use super::parse_real;

/// Intercept of the log-temperature relation
pub const LOG_TEMPERATURE_INTERCEPT: f64 = 3.988;
/// Slope of the log-temperature relation per magnitude of B−V
pub const LOG_TEMPERATURE_SLOPE: f64 = 0.881;

/// Temperature together with the true color derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorEstimate {
    /// Effective temperature in Kelvin, not clamped
    pub temperature: f64,
    pub rgb: Rgb,
}

/// Evaluate the log-temperature relation without any range checks.
pub fn temperature_from_color_index(color_index: f64) -> f64 {
    10f64.powf(LOG_TEMPERATURE_INTERCEPT - LOG_TEMPERATURE_SLOPE * color_index)
}

/// Parameters of the color-index conversion and its fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorIndexModel {
    /// Exclusive lower bound of the usable B−V range
    pub min_color_index: f64,
    /// Exclusive upper bound of the usable B−V range
    pub max_color_index: f64,
    /// Temperature reported for indices outside the usable range
    pub out_of_range_temperature: f64,
    /// Temperature reported when the index is missing or unparseable
    pub missing_temperature: f64,
    /// Color reported when the index is missing or unparseable
    pub missing_color: Rgb,
}

impl Default for ColorIndexModel {
    fn default() -> Self {
        Self {
            min_color_index: -0.4,
            max_color_index: 2.0,
            out_of_range_temperature: 4600.0,
            missing_temperature: 9000.0,
            missing_color: Rgb::WHITE,
        }
    }
}

impl ColorIndexModel {
    /// True when the index lies strictly inside the usable range.
    pub fn in_range(&self, color_index: f64) -> bool {
        color_index > self.min_color_index && color_index < self.max_color_index
    }

    /// Temperature for a parsed color index, using the fallback outside the range.
    pub fn temperature(&self, color_index: f64) -> f64 {
        if self.in_range(color_index) {
            temperature_from_color_index(color_index)
        } else {
            self.out_of_range_temperature
        }
    }

    /// Estimate temperature and true color from an optional color index.
    ///
    /// A missing index returns the configured default temperature and color
    /// without evaluating the blackbody fit.
    pub fn estimate(&self, color_index: Option<f64>) -> ColorEstimate {
        let Some(ci) = color_index else {
            return ColorEstimate {
                temperature: self.missing_temperature,
                rgb: self.missing_color,
            };
        };

        if !self.in_range(ci) {
            debug!("Color index {ci} outside usable range, using fallback temperature");
        }

        let temperature = self.temperature(ci);
        ColorEstimate {
            temperature,
            rgb: temperature_to_rgb(temperature),
        }
    }

    /// Same as [`estimate`](Self::estimate) for a raw catalog string.
    pub fn estimate_raw(&self, raw: &str) -> ColorEstimate {
        self.estimate(parse_real(raw))
    }
}

/// Convert a raw catalog B−V value to temperature and true color using the
/// default model.
///
/// # Examples
/// ```rust
/// use starcolor::photometry::temperature::color_index_to_temperature;
/// use starcolor::photometry::color::Rgb;
///
/// let missing = color_index_to_temperature("");
/// assert_eq!(missing.temperature, 9000.0);
/// assert_eq!(missing.rgb, Rgb::WHITE);
///
/// let extreme = color_index_to_temperature("2.5");
/// assert_eq!(extreme.temperature, 4600.0);
/// ```
pub fn color_index_to_temperature(raw: &str) -> ColorEstimate {
    ColorIndexModel::default().estimate_raw(raw)
}
