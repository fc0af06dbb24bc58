//! Photometric derivations for catalog stars
//!
//! The color pipeline runs color index → temperature → RGB, with an
//! independent atmospheric post-process on the RGB result. Radius estimation
//! shares the temperature but is otherwise separate.

pub mod atmosphere;
pub mod color;
pub mod size;
pub mod temperature;

pub use atmosphere::{adjust_for_atmosphere, AtmosphereModel};
pub use color::{temperature_to_rgb, HexColor, Rgb, SpectralClass};
pub use size::{estimate_radius, RadiusTable};
pub use temperature::{color_index_to_temperature, ColorEstimate, ColorIndexModel};

/// Parse a catalog value as a real number.
///
/// Surrounding whitespace is ignored. Empty or malformed values give `None`;
/// `NaN` and infinities parse like any other number and are left to callers.
pub fn parse_real(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
