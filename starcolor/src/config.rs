//! Pipeline configuration and swappable model constants.
//!
//! All empirical constants used by the derivations (fallback temperatures,
//! scattering coefficients, the radius table) are grouped in [`ModelConfig`].
//! The defaults reproduce the published bright-star dataset; a JSON file can
//! override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::photometry::{AtmosphereModel, ColorIndexModel, RadiusTable};

/// Stars at or above this apparent magnitude are dropped
pub const DEFAULT_MAGNITUDE_LIMIT: f64 = 7.0;

/// Empirical constants of the derivation models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub color_index: ColorIndexModel,
    pub atmosphere: AtmosphereModel,
    pub radius: RadiusTable,
}

impl ModelConfig {
    /// Load a model file. Missing keys keep their default values.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| CatalogError::Model {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| CatalogError::io(path, e))
    }
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Exclusive upper bound on apparent magnitude
    pub magnitude_limit: f64,
    pub model: ModelConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
            model: ModelConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_magnitude_limit(mut self, magnitude_limit: f64) -> Self {
        self.magnitude_limit = magnitude_limit;
        self
    }

    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    /// True when a star of this magnitude is bright enough to keep.
    pub fn accepts(&self, magnitude: f64) -> bool {
        magnitude < self.magnitude_limit
    }
}
