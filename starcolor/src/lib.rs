//! Bright-star catalog reduction for sky visualization.
//!
//! Reads a stellar catalog, keeps naked-eye stars, and derives presentation
//! attributes for each one:
//!
//! - **Temperature** from the B−V color index
//! - **True color** from a blackbody fit to that temperature
//! - **Atmospheric color** simulating Rayleigh scattering and scintillation
//! - **Radius** from luminosity, or from spectral class when luminosity is unknown
//!
//! The derivations in [`photometry`] are pure functions of a single record.
//! [`catalog`] handles the delimited input and JSON output, and [`pipeline`]
//! ties them together with sequential and rayon-parallel drivers.
//!
//! ```rust
//! use starcolor::catalog::CatalogRow;
//! use starcolor::config::PipelineConfig;
//! use starcolor::pipeline::derive_star;
//!
//! let row = CatalogRow::new()
//!     .with("proper", "Betelgeuse")
//!     .with("mag", "0.45")
//!     .with("ci", "1.5")
//!     .with("spect", "M1-2Ia-Iab");
//!
//! let star = derive_star(&row, &PipelineConfig::default()).unwrap();
//! assert_eq!(star.size, 0.5);
//! assert_eq!(star.temperature, 463);
//! assert_eq!(star.color.as_str(), "#ffff00");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod photometry;
pub mod pipeline;
pub mod shared_args;

pub use catalog::{CatalogRow, StarRecord};
pub use config::{ModelConfig, PipelineConfig};
pub use error::CatalogError;
