//! # LedVI Core
//!
//! Forward-characteristic model for indicator LEDs.
//!
//! This library provides:
//! - A read-only catalog of LED devices and their rated forward voltage/current
//! - The ideal diode law and its closed-form inverse
//! - A linear stress model derating a device for temperature and operating time
//! - VI curve sweeps across one or more voltages, with baseline comparison curves
//!
//! ## Architecture
//!
//! - [`catalog`] - Device specifications and the device catalog
//! - [`model`] - Diode law and stress derating
//! - [`curve`] - Voltage sweeps producing labeled current series
//! - [`input`] - Parsing of user-entered voltage lists and currents
//! - [`report`] - Series output for the CLI (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! ledvi sweep --device Red --voltages 2,3.5 --comparison
//! ledvi inverse --device Blue --current 0.02 --temperature 60 --duration 3600
//! ```
//!
//! ### Library
//!
//! ```
//! use ledvi_core::{CurveGenerator, DeviceCatalog};
//!
//! let generator = CurveGenerator::new(DeviceCatalog::builtin());
//! let series = generator.sweep("Red", None, &[5.0], true).unwrap();
//! assert_eq!(series.len(), 5);
//! ```
//!
//! ## Evaluation
//!
//! Every operation is a pure function of its inputs. The only shared state is
//! the catalog, which is never mutated after construction, so calls may run
//! concurrently without locking.

pub mod catalog;
pub mod curve;
pub mod error;
pub mod input;
pub mod model;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use catalog::{DeviceCatalog, DeviceSpec};
pub use curve::{CurveGenerator, CurveSeries, SeriesStyle, SweepConfig};
pub use error::{LedError, Result};
pub use model::{AdjustedSpec, Stressors};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmLedModel;

/// Boltzmann constant (J/K)
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Elementary charge (C), rounded as in the calibration data
pub const ELEMENTARY_CHARGE: f64 = 1.6e-19;

/// Forward current every catalog rating is calibrated at (20 mA)
pub const REFERENCE_CURRENT: f64 = 20e-3;

/// Ambient temperature the ratings are specified at (°C)
pub const REFERENCE_TEMPERATURE_C: f64 = 25.0;

/// Junction temperature used when no stress is applied (K)
pub const BASELINE_TEMPERATURE_K: f64 = 298.0;

/// Offset between Celsius and Kelvin
pub const CELSIUS_TO_KELVIN: f64 = 273.15;
