//! Electrical model of a single LED.
//!
//! - [`diode`] - Ideal diode law and its closed-form inverse
//! - [`stress`] - Temperature and ageing derating of rated parameters
//!
//! Both are pure functions: nothing here holds state between calls.

pub mod diode;
pub mod stress;

pub use diode::{forward_current, inverse_voltage, thermal_voltage, Bias};
pub use stress::{apply, AdjustedSpec, OperatingConditions, Stressors};
