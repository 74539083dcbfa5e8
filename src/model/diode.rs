//! Diode model.
//!
//! Uses the ideal diode equation scaled by the device's rated current:
//!   I = I_f * (exp(V / V_T) - 1),   V_T = k * T / q
//!
//! and its closed-form inverse, normalised against the fixed calibration
//! current rather than the (possibly derated) I_f of the device:
//!   V = V_T * ln(I / I_ref + 1)
//!
//! The forward law is total: exponent overflow saturates to `+inf` so a sweep
//! over any voltage range always yields a plottable series.

use crate::catalog::DeviceSpec;
use crate::{BOLTZMANN, ELEMENTARY_CHARGE, REFERENCE_CURRENT};

/// Thermal voltage k*T/q at an absolute temperature (K).
pub fn thermal_voltage(temperature_kelvin: f64) -> f64 {
    BOLTZMANN * temperature_kelvin / ELEMENTARY_CHARGE
}

/// Voltage input to the forward law: a single bias or an ordered sweep.
///
/// Sequences are evaluated elementwise and keep their shape.
pub trait Bias {
    type Output;

    fn map_bias<F: Fn(f64) -> f64>(self, f: F) -> Self::Output;
}

impl Bias for f64 {
    type Output = f64;

    fn map_bias<F: Fn(f64) -> f64>(self, f: F) -> f64 {
        f(self)
    }
}

impl Bias for &[f64] {
    type Output = Vec<f64>;

    fn map_bias<F: Fn(f64) -> f64>(self, f: F) -> Vec<f64> {
        self.iter().map(|&v| f(v)).collect()
    }
}

impl Bias for &Vec<f64> {
    type Output = Vec<f64>;

    fn map_bias<F: Fn(f64) -> f64>(self, f: F) -> Vec<f64> {
        self.as_slice().map_bias(f)
    }
}

impl<const N: usize> Bias for [f64; N] {
    type Output = [f64; N];

    fn map_bias<F: Fn(f64) -> f64>(self, f: F) -> [f64; N] {
        self.map(f)
    }
}

#[inline]
fn diode_law(v: f64, i_f: f64, v_t: f64) -> f64 {
    let e = (v / v_t).exp();
    if e.is_infinite() {
        return f64::INFINITY;
    }
    i_f * (e - 1.0)
}

/// Forward current for a voltage (or sweep of voltages) at the given
/// absolute temperature.
///
/// The temperature must be positive; callers validate it.
pub fn forward_current<B: Bias>(voltage: B, spec: &DeviceSpec, temperature_kelvin: f64) -> B::Output {
    debug_assert!(temperature_kelvin > 0.0);
    let v_t = thermal_voltage(temperature_kelvin);
    let i_f = spec.forward_current;
    voltage.map_bias(|v| diode_law(v, i_f, v_t))
}

/// Voltage needed to drive `target_current` through the device.
///
/// Returns `None` when no finite voltage exists (e.g. `target_current` at or
/// below `-I_ref`). Positivity of `target_current` is the caller's contract.
pub fn inverse_voltage(target_current: f64, spec: &DeviceSpec, temperature_kelvin: f64) -> Option<f64> {
    let v_t = thermal_voltage(temperature_kelvin);
    let v = v_t * (target_current / REFERENCE_CURRENT).ln_1p();
    if v.is_finite() {
        Some(v)
    } else {
        log::debug!(
            "no finite voltage for {} A through '{}' at {} K",
            target_current,
            spec.id,
            temperature_kelvin
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DeviceCatalog;
    use approx::assert_relative_eq;

    fn red() -> DeviceSpec {
        DeviceSpec::new("Red", 1.8, 0.02)
    }

    #[test]
    fn test_thermal_voltage() {
        assert_relative_eq!(thermal_voltage(300.0), 0.025887, max_relative = 1e-4);
    }

    #[test]
    fn test_zero_bias_is_exactly_zero() {
        for spec in DeviceCatalog::builtin().iter() {
            for t in [250.0, 298.0, 300.0, 400.0] {
                assert_eq!(forward_current(0.0, spec, t), 0.0);
            }
        }
    }

    #[test]
    fn test_monotonic_in_voltage() {
        let spec = red();
        let volts: Vec<f64> = (0..=400).map(|i| i as f64 * 0.01).collect();
        let currents = forward_current(&volts, &spec, 298.0);
        for pair in currents.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_rated_voltage_matches_formula() {
        let spec = red();
        let v_t = BOLTZMANN * 300.0 / 1.6e-19;
        let expected = 0.02 * ((1.8 / v_t).exp() - 1.0);
        let i = forward_current(1.8, &spec, 300.0);
        assert!(i > 1e25);
        assert_relative_eq!(i, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_overflow_saturates_to_infinity() {
        let spec = red();
        assert_eq!(forward_current(100.0, &spec, 300.0), f64::INFINITY);
        assert_eq!(forward_current(f64::MAX, &spec, 300.0), f64::INFINITY);
    }

    #[test]
    fn test_sweep_keeps_shape() {
        let spec = red();
        let scalar = forward_current(0.5, &spec, 298.0);
        let swept = forward_current([0.0, 0.5, 100.0], &spec, 298.0);
        assert_eq!(swept[0], 0.0);
        assert_eq!(swept[1], scalar);
        assert_eq!(swept[2], f64::INFINITY);

        let empty: &[f64] = &[];
        assert!(forward_current(empty, &spec, 298.0).is_empty());
    }

    #[test]
    fn test_inverse_at_reference_current() {
        let v = inverse_voltage(0.02, &red(), 298.0).unwrap();
        assert_relative_eq!(v, thermal_voltage(298.0) * 2f64.ln(), max_relative = 1e-12);
        assert!(v > 0.0175 && v < 0.0182);
    }

    #[test]
    fn test_round_trip() {
        for spec in DeviceCatalog::builtin().iter() {
            for target in [1e-6, 1e-3, 0.02, 0.35, 5.0] {
                let v = inverse_voltage(target, spec, 310.0).unwrap();
                let i = forward_current(v, spec, 310.0);
                assert_relative_eq!(i, target, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn test_inverse_uncomputable() {
        assert_eq!(inverse_voltage(-0.02, &red(), 298.0), None);
        assert_eq!(inverse_voltage(-1.0, &red(), 298.0), None);
        assert_eq!(inverse_voltage(f64::NAN, &red(), 298.0), None);
        assert_eq!(inverse_voltage(f64::INFINITY, &red(), 298.0), None);
    }
}
