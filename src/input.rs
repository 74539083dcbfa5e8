//! Parsing of user-entered values.
//!
//! Voltages arrive as a comma-separated list (`"1.8, 2.5,3"`); blank entries
//! are skipped and the list must not end up empty. The target current must be
//! a positive number of amps.

use crate::error::{LedError, Result};

/// Parse a comma-separated list of voltages.
pub fn parse_voltage_list(input: &str) -> Result<Vec<f64>> {
    let mut voltages = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let v: f64 = part.parse().map_err(|_| {
            LedError::invalid_input("voltage_points", format!("'{}' is not a number", part))
        })?;
        if !v.is_finite() || v < 0.0 {
            return Err(LedError::invalid_input(
                "voltage_points",
                format!("voltages must be finite and non-negative, got {}", part),
            ));
        }
        voltages.push(v);
    }

    if voltages.is_empty() {
        return Err(LedError::invalid_input(
            "voltage_points",
            "please enter valid voltage values",
        ));
    }
    Ok(voltages)
}

/// Parse a target current in amps.
pub fn parse_target_current(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let current: f64 = trimmed.parse().map_err(|_| {
        LedError::invalid_input("target_current", format!("'{}' is not a number", trimmed))
    })?;
    if !current.is_finite() || current <= 0.0 {
        return Err(LedError::invalid_input(
            "target_current",
            "enter a valid current value",
        ));
    }
    Ok(current)
}
