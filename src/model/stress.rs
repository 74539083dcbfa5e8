//! Stress derating.
//!
//! A linearised empirical heuristic for how heat and operating time shift a
//! device's rated point:
//!
//! ```text
//! d_temp = (T_c - 25) * 0.002
//! d_dur  = t_s * 0.0005
//! V_f'   = max(V_f - d_temp - d_dur, 0)
//! I_f'   = max(I_f + 10 * d_temp - 10 * d_dur, 1e-6)
//! ```
//!
//! The floors keep the diode law away from a non-positive reference current.
//!
//! A stressed evaluation runs at `T_c + 273.15` K. An unstressed evaluation
//! always runs at 298 K, whatever temperature the caller might hold.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::catalog::DeviceSpec;
use crate::error::{LedError, Result};
use crate::{BASELINE_TEMPERATURE_K, CELSIUS_TO_KELVIN, REFERENCE_TEMPERATURE_C};

/// Forward-voltage droop per °C above the reference temperature (V/°C)
pub const TEMPERATURE_COEFFICIENT: f64 = 0.002;

/// Forward-voltage droop per second of operation (V/s)
pub const AGEING_COEFFICIENT: f64 = 0.0005;

/// Scale from voltage shift to current shift (A/V)
pub const CURRENT_SENSITIVITY: f64 = 10.0;

/// Lower bound on a derated forward current (A)
pub const MIN_FORWARD_CURRENT: f64 = 1e-6;

/// Environmental and usage stressors for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stressors {
    /// Ambient temperature (°C)
    pub temperature_celsius: f64,
    /// Elapsed operating time (s)
    pub duration_seconds: f64,
}

impl Default for Stressors {
    fn default() -> Self {
        Self {
            temperature_celsius: REFERENCE_TEMPERATURE_C,
            duration_seconds: 0.0,
        }
    }
}

impl Stressors {
    /// Create a new set of stressors.
    pub fn new(temperature_celsius: f64, duration_seconds: f64) -> Self {
        Self {
            temperature_celsius,
            duration_seconds,
        }
    }

    /// Stressors from optional request fields.
    ///
    /// `None` when neither field is given; a missing field takes its
    /// reference value (25 °C, 0 s).
    pub fn from_parts(temperature_celsius: Option<f64>, duration_seconds: Option<f64>) -> Option<Self> {
        if temperature_celsius.is_none() && duration_seconds.is_none() {
            return None;
        }
        let defaults = Self::default();
        Some(Self::new(
            temperature_celsius.unwrap_or(defaults.temperature_celsius),
            duration_seconds.unwrap_or(defaults.duration_seconds),
        ))
    }

    /// Absolute operating temperature under stress.
    pub fn temperature_kelvin(&self) -> f64 {
        self.temperature_celsius + CELSIUS_TO_KELVIN
    }

    /// Reject non-finite values, temperatures at or below absolute zero and
    /// negative durations.
    pub fn validate(&self) -> Result<()> {
        if !self.temperature_celsius.is_finite() {
            return Err(LedError::invalid_input(
                "temperature_celsius",
                "temperature must be finite",
            ));
        }
        if self.temperature_kelvin() <= 0.0 {
            return Err(LedError::invalid_input(
                "temperature_celsius",
                format!("{} °C is at or below absolute zero", self.temperature_celsius),
            ));
        }
        if !self.duration_seconds.is_finite() || self.duration_seconds < 0.0 {
            return Err(LedError::invalid_input(
                "duration_seconds",
                format!("duration must be finite and non-negative, got {}", self.duration_seconds),
            ));
        }
        Ok(())
    }
}

/// A device specification derated by [`apply`].
///
/// Same shape as [`DeviceSpec`]; guarantees `forward_voltage >= 0` and
/// `forward_current >= 1e-6`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedSpec(DeviceSpec);

impl AdjustedSpec {
    pub fn into_inner(self) -> DeviceSpec {
        self.0
    }
}

impl Deref for AdjustedSpec {
    type Target = DeviceSpec;

    fn deref(&self) -> &DeviceSpec {
        &self.0
    }
}

/// Derate a device for the given stressors.
pub fn apply(spec: &DeviceSpec, stress: &Stressors) -> AdjustedSpec {
    let d_temp = (stress.temperature_celsius - REFERENCE_TEMPERATURE_C) * TEMPERATURE_COEFFICIENT;
    let d_dur = stress.duration_seconds * AGEING_COEFFICIENT;

    let raw_vf = spec.forward_voltage - d_temp - d_dur;
    let raw_if = spec.forward_current + d_temp * CURRENT_SENSITIVITY - d_dur * CURRENT_SENSITIVITY;

    if raw_vf < 0.0 || raw_if < MIN_FORWARD_CURRENT {
        log::debug!(
            "'{}' derated past its floor at {} °C after {} s (V_f {:.4}, I_f {:.3e})",
            spec.id,
            stress.temperature_celsius,
            stress.duration_seconds,
            raw_vf,
            raw_if
        );
    }

    AdjustedSpec(DeviceSpec {
        id: spec.id.clone(),
        forward_voltage: raw_vf.max(0.0),
        forward_current: raw_if.max(MIN_FORWARD_CURRENT),
    })
}

/// The spec and absolute temperature one evaluation runs at.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingConditions {
    pub spec: DeviceSpec,
    pub temperature_kelvin: f64,
}

impl OperatingConditions {
    /// Unmodified spec at the 298 K baseline.
    pub fn baseline(spec: &DeviceSpec) -> Self {
        Self {
            spec: spec.clone(),
            temperature_kelvin: BASELINE_TEMPERATURE_K,
        }
    }

    /// Derated spec at the stress temperature.
    pub fn stressed(spec: &DeviceSpec, stress: &Stressors) -> Self {
        Self {
            spec: apply(spec, stress).into_inner(),
            temperature_kelvin: stress.temperature_kelvin(),
        }
    }

    /// Pick baseline or stressed conditions depending on whether stress applies.
    pub fn resolve(spec: &DeviceSpec, stress: Option<&Stressors>) -> Self {
        match stress {
            Some(s) => Self::stressed(spec, s),
            None => Self::baseline(spec),
        }
    }
}
