//! Output record for one bright star.
//!
//! The serialized field names and null conventions are consumed directly by
//! the sky viewer, so they are part of the interface:
//!
//! - `lum`, `absmag`, `vx`, `vy`, `vz`, `x`, `y`, `z` and `hip` are `null`
//!   when the catalog value is absent or malformed.
//! - `dist`, `ra` and `dec` are `0.0` when absent or malformed. This
//!   asymmetry is kept for compatibility with existing consumers.
//! - `var_min` and `var_max` are omitted entirely unless the star is flagged
//!   variable and both bounds parse.

use serde::{Deserialize, Serialize};

use crate::photometry::HexColor;

/// Derived presentation data for one star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Proper name, empty for unnamed stars
    pub id: String,
    /// Apparent visual magnitude
    pub mag: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    /// True color in space
    pub color: HexColor,
    /// Color as seen through the atmosphere
    pub atmospheric_color: HexColor,
    /// Effective temperature in Kelvin, truncated
    pub temperature: i64,
    /// Raw spectral type
    pub spect: String,
    /// Raw B−V color index
    pub ci: String,
    /// Hipparcos catalog number
    pub hip: Option<u64>,
    /// Estimated radius in solar radii
    pub size: f64,
    /// Distance in parsecs
    pub dist: f64,
    /// Right ascension
    pub ra: f64,
    /// Declination
    pub dec: f64,
    /// Luminosity in solar units
    pub lum: Option<f64>,
    /// Absolute magnitude
    pub absmag: Option<f64>,
    /// Constellation abbreviation
    pub con: String,
    pub vx: Option<f64>,
    pub vy: Option<f64>,
    pub vz: Option<f64>,
    /// Bayer designation
    pub bayer: String,
    /// Flamsteed number
    pub flam: String,
    /// Flagged variable in the catalog
    pub variable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_max: Option<f64>,
}

impl StarRecord {
    /// Velocity vector when all three components are known.
    pub fn velocity(&self) -> Option<[f64; 3]> {
        Some([self.vx?, self.vy?, self.vz?])
    }

    /// Cartesian position when all three components are known.
    pub fn position(&self) -> Option<[f64; 3]> {
        Some([self.x?, self.y?, self.z?])
    }

    /// Variability range `(min, max)` when reported.
    pub fn variability_range(&self) -> Option<(f64, f64)> {
        Some((self.var_min?, self.var_max?))
    }
}
