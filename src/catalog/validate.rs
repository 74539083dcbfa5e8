//! Catalog entry validation.

use crate::error::{LedError, Result};

use super::DeviceSpec;

/// Validate a single device specification.
///
/// Checks:
/// - The id is not blank
/// - Forward voltage and forward current are finite and positive
pub fn validate_spec(spec: &DeviceSpec) -> Result<()> {
    if spec.id.trim().is_empty() {
        return Err(LedError::invalid_device(&spec.id, "device id cannot be empty"));
    }

    if !spec.forward_voltage.is_finite() || spec.forward_voltage <= 0.0 {
        return Err(LedError::invalid_device(
            &spec.id,
            format!("forward voltage must be positive, got {}", spec.forward_voltage),
        ));
    }

    if !spec.forward_current.is_finite() || spec.forward_current <= 0.0 {
        return Err(LedError::invalid_device(
            &spec.id,
            format!("forward current must be positive, got {}", spec.forward_current),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_spec() {
        assert!(validate_spec(&DeviceSpec::new("Red", 1.8, 0.02)).is_ok());
    }

    #[test]
    fn test_invalid_specs() {
        assert!(validate_spec(&DeviceSpec::new("  ", 1.8, 0.02)).is_err());
        assert!(validate_spec(&DeviceSpec::new("Red", 0.0, 0.02)).is_err());
        assert!(validate_spec(&DeviceSpec::new("Red", 1.8, -0.02)).is_err());
        assert!(validate_spec(&DeviceSpec::new("Red", f64::NAN, 0.02)).is_err());
    }
}
