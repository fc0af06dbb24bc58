//! Raw catalog rows and per-field defaulting.
//!
//! A [`CatalogRow`] holds one record as the reader saw it: a mapping from
//! column name to the raw string value. Accessors implement the defaulting
//! policy for each kind of field so that malformed data never becomes an
//! error. Numeric fields that are absent, unparseable or non-finite read as
//! `None`, except for the positional fields accessed through
//! [`CatalogRow::real_or`]. JSON has no representation for `inf` or `NaN`,
//! so they never reach an output record.

use std::collections::HashMap;

use crate::photometry::parse_real;

/// Column names understood by the pipeline.
pub mod fields {
    pub const MAG: &str = "mag";
    pub const CI: &str = "ci";
    pub const SPECT: &str = "spect";
    pub const LUM: &str = "lum";
    pub const PROPER: &str = "proper";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const Z: &str = "z";
    pub const HIP: &str = "hip";
    pub const DIST: &str = "dist";
    pub const RA: &str = "ra";
    pub const DEC: &str = "dec";
    pub const ABSMAG: &str = "absmag";
    pub const CON: &str = "con";
    pub const VX: &str = "vx";
    pub const VY: &str = "vy";
    pub const VZ: &str = "vz";
    pub const BAYER: &str = "bayer";
    pub const FLAM: &str = "flam";
    pub const VAR: &str = "var";
    pub const VAR_MIN: &str = "var_min";
    pub const VAR_MAX: &str = "var_max";
}

/// One catalog record keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRow {
    values: HashMap<String, String>,
}

impl CatalogRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    /// Raw value, `None` when the column is absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Raw value with absent columns read as the empty string.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Parsed finite real value, `None` when absent, empty, malformed or
    /// non-finite.
    pub fn real(&self, name: &str) -> Option<f64> {
        self.get(name)
            .and_then(parse_real)
            .filter(|value| value.is_finite())
    }

    /// Parsed real value with a fallback for absent or malformed values.
    pub fn real_or(&self, name: &str, default: f64) -> f64 {
        self.real(name).unwrap_or(default)
    }

    /// Unsigned identifier, only when the raw value is entirely decimal digits.
    pub fn digits(&self, name: &str) -> Option<u64> {
        let raw = self.get(name)?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok()
    }

    /// True when the field is present and not empty.
    pub fn is_set(&self, name: &str) -> bool {
        !self.text(name).is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CatalogRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
