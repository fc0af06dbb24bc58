//! Atmospheric color adjustment for naked-eye rendering.
//!
//! Starlight seen from the ground is reddened by Rayleigh scattering, which
//! removes short wavelengths preferentially, and brighter stars show stronger
//! scintillation. The model here is empirical: each channel keeps a fixed
//! fraction of its value, scaled by a scintillation factor that grows as
//! apparent magnitude falls, and a small warm tint is added to red and green.
//!
//! For a channel with retention coefficient `c` and scintillation factor
//! `s = 1 − m / 10`:
//!
//! ```text
//! value' = floor(value × (1 − (1 − c) × s))
//! red'  += floor(5 × s)
//! green' += floor(3 × s)
//! ```
//!
//! Every intermediate result is clamped to [0, 255].

use serde::{Deserialize, Serialize};

use super::color::{HexColor, Rgb};

/// Empirical coefficients of the atmospheric model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereModel {
    /// Fraction of red retained at full scintillation (least scattered)
    pub red_retention: f64,
    /// Fraction of green retained at full scintillation
    pub green_retention: f64,
    /// Fraction of blue retained at full scintillation (most scattered)
    pub blue_retention: f64,
    /// Magnitude at which the scintillation factor reaches zero
    pub scintillation_magnitude: f64,
    /// Red added at full scintillation
    pub red_tint: f64,
    /// Green added at full scintillation
    pub green_tint: f64,
}

impl Default for AtmosphereModel {
    fn default() -> Self {
        Self {
            red_retention: 0.93,
            green_retention: 0.87,
            blue_retention: 0.78,
            scintillation_magnitude: 10.0,
            red_tint: 5.0,
            green_tint: 3.0,
        }
    }
}

impl AtmosphereModel {
    /// Scintillation factor for an apparent magnitude.
    ///
    /// Brighter stars (lower magnitude) get a larger factor. The factor is 1.0
    /// at magnitude 0 and goes negative past the scintillation magnitude.
    pub fn scintillation_factor(&self, magnitude: f64) -> f64 {
        1.0 - magnitude / self.scintillation_magnitude
    }

    /// Apply scattering and tint to a true color.
    pub fn adjust(&self, rgb: Rgb, magnitude: f64) -> Rgb {
        let s = self.scintillation_factor(magnitude);

        let scatter =
            |value: u8, retention: f64| clamp_channel(value as f64 * (1.0 - (1.0 - retention) * s));

        let r = scatter(rgb.r, self.red_retention);
        let g = scatter(rgb.g, self.green_retention);
        let b = scatter(rgb.b, self.blue_retention);

        Rgb::new(
            clamp_channel(r as f64 + (self.red_tint * s).floor()),
            clamp_channel(g as f64 + (self.green_tint * s).floor()),
            b,
        )
    }

    /// Apply the adjustment and return the `#rrggbb` form.
    pub fn adjust_hex(&self, rgb: Rgb, magnitude: f64) -> HexColor {
        self.adjust(rgb, magnitude).to_hex()
    }
}

fn clamp_channel(value: f64) -> u8 {
    // NaN saturates to zero through the cast
    value.floor().clamp(0.0, 255.0) as u8
}

/// Atmosphere-adjusted color of a star using the default model.
///
/// # Examples
/// ```rust
/// use starcolor::photometry::atmosphere::adjust_for_atmosphere;
/// use starcolor::photometry::color::Rgb;
///
/// // Sirius, a white star at magnitude -1.46, picks up a warm cast
/// let seen = adjust_for_atmosphere(Rgb::WHITE, -1.46);
/// assert_eq!(seen.as_str(), "#efdcbe");
/// ```
pub fn adjust_for_atmosphere(rgb: Rgb, magnitude: f64) -> HexColor {
    AtmosphereModel::default().adjust_hex(rgb, magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Rgb::WHITE, -1.46, "#efdcbe")]
    #[case(Rgb::WHITE, 6.5, "#f9f4eb")]
    #[case(Rgb::new(98, 144, 255), 0.0, "#6080c6")]
    #[case(Rgb::new(255, 177, 255), 3.0, "#f5a2d7")]
    fn test_reference_adjustments(#[case] rgb: Rgb, #[case] magnitude: f64, #[case] hex: &str) {
        assert_eq!(adjust_for_atmosphere(rgb, magnitude).as_str(), hex);
    }

    #[test]
    fn test_scintillation_factor() {
        let model = AtmosphereModel::default();
        assert_relative_eq!(model.scintillation_factor(0.0), 1.0);
        assert_relative_eq!(model.scintillation_factor(6.0), 0.4);
        assert_relative_eq!(model.scintillation_factor(-1.0), 1.1);
        assert_relative_eq!(model.scintillation_factor(10.0), 0.0);
    }

    #[test]
    fn test_no_effect_at_zero_scintillation() {
        let rgb = Rgb::new(12, 200, 99);
        assert_eq!(AtmosphereModel::default().adjust(rgb, 10.0), rgb);
    }

    #[test]
    fn test_faint_black_star_stays_in_range() {
        // Negative factor would otherwise push red and green below zero
        assert_eq!(adjust_for_atmosphere(Rgb::BLACK, 20.0).as_str(), "#000000");
    }

    #[test]
    fn test_channels_bounded_over_magnitude_range() {
        let model = AtmosphereModel::default();
        let colors = [
            Rgb::WHITE,
            Rgb::BLACK,
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(3, 2, 1),
            Rgb::new(82, 131, 255),
        ];

        for rgb in colors {
            for step in 0..=220 {
                let magnitude = -2.0 + step as f64 * 0.1;
                let adjusted = model.adjust(rgb, magnitude);
                let hex = model.adjust_hex(rgb, magnitude);
                assert_eq!(hex.to_rgb(), adjusted);
                assert_eq!(hex.as_str().len(), 7);
            }
        }
    }

    #[test]
    fn test_blue_scattered_most() {
        let adjusted = AtmosphereModel::default().adjust(Rgb::WHITE, 1.0);
        assert!(adjusted.r > adjusted.g);
        assert!(adjusted.g > adjusted.b);
    }
}
