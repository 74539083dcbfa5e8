//! VI curve generation.
//!
//! A sweep evaluates the diode law over a uniform voltage domain for each
//! requested voltage and labels the result for a chart renderer:
//!
//! ```text
//! domain(v)   = linspace(0, max(v + 1, 5), 100)     "Red LED @ 2.5V"
//! comparison  = linspace(0, 5, 100) at 298 K         "Green LED" (dashed)
//! ```
//!
//! Stress, when supplied, derates the selected device only. Comparison
//! curves always show the other catalog devices at their rated values.

mod config;

pub use config::{
    SweepConfig, DEFAULT_COMPARISON_SPAN, DEFAULT_HEADROOM, DEFAULT_MIN_SPAN, DEFAULT_POINTS,
};

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

use crate::catalog::DeviceCatalog;
use crate::error::{LedError, Result};
use crate::model::{forward_current, inverse_voltage, OperatingConditions, Stressors};
use crate::BASELINE_TEMPERATURE_K;

/// `n` evenly spaced samples over `[start, stop]`, endpoints included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// Marker written in place of a saturated (`+inf`) current.
pub const SATURATED: &str = "inf";

fn serialize_saturating<S: Serializer>(currents: &[f64], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(currents.len()))?;
    for &i in currents {
        if i == f64::INFINITY {
            seq.serialize_element(SATURATED)?;
        } else {
            seq.serialize_element(&i)?;
        }
    }
    seq.end()
}

/// How a renderer should draw a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesStyle {
    /// Requested device sweep
    Solid,
    /// Baseline comparison device
    Dashed,
}

/// One labeled current response curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSeries {
    pub label: String,
    /// Bias voltages (V), ascending
    pub voltages: Vec<f64>,
    /// Forward currents (A), one per voltage; saturated points serialize as `"inf"`
    #[serde(serialize_with = "serialize_saturating")]
    pub currents: Vec<f64>,
    pub style: SeriesStyle,
}

impl CurveSeries {
    fn new(label: String, voltages: Vec<f64>, currents: Vec<f64>, style: SeriesStyle) -> Self {
        debug_assert_eq!(voltages.len(), currents.len());
        Self {
            label,
            voltages,
            currents,
            style,
        }
    }

    /// Currents scaled to milliamps for plotting.
    pub fn currents_milliamps(&self) -> Vec<f64> {
        self.currents.iter().map(|i| i * 1e3).collect()
    }

    pub fn len(&self) -> usize {
        self.voltages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltages.is_empty()
    }
}

/// A voltage solved for a target current, with the sweep drawn at it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InverseSolution {
    pub voltage: f64,
    pub series: Vec<CurveSeries>,
}

/// Shortest round-trip form of a voltage: `5.0`, `2.5`, `1e-05`, `1.5e+16`.
fn format_volts(v: f64) -> String {
    // Debug switches to exponent form at the same magnitudes, but writes
    // the exponent bare (`1e-5`); pad to a signed two-digit exponent
    let debug = format!("{:?}", v);
    match debug.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(e) => format!("{}e{}{:02}", mantissa, if e < 0 { '-' } else { '+' }, e.abs()),
            Err(_) => debug,
        },
        None => debug,
    }
}

fn sweep_label(device_id: &str, voltage: f64) -> String {
    format!("{} LED @ {}V", device_id, format_volts(voltage))
}

fn validate_voltage_points(voltage_points: &[f64]) -> Result<()> {
    if voltage_points.is_empty() {
        return Err(LedError::invalid_input(
            "voltage_points",
            "at least one voltage is required",
        ));
    }
    if let Some(bad) = voltage_points.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(LedError::invalid_input(
            "voltage_points",
            format!("voltages must be finite and non-negative, got {}", bad),
        ));
    }
    Ok(())
}

fn validate_target_current(target_current: f64) -> Result<()> {
    if !target_current.is_finite() || target_current <= 0.0 {
        return Err(LedError::invalid_input(
            "target_current",
            format!("current must be finite and positive, got {}", target_current),
        ));
    }
    Ok(())
}

/// Builds VI curves for devices of a catalog.
#[derive(Debug, Clone)]
pub struct CurveGenerator<'a> {
    catalog: &'a DeviceCatalog,
    config: SweepConfig,
}

impl<'a> CurveGenerator<'a> {
    /// Create a generator with the default sweep configuration.
    pub fn new(catalog: &'a DeviceCatalog) -> Self {
        Self::with_config(catalog, SweepConfig::default())
    }

    /// Create a generator with a custom sweep configuration.
    pub fn with_config(catalog: &'a DeviceCatalog, config: SweepConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &'a DeviceCatalog {
        self.catalog
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Sweep `device_id` once per requested voltage, optionally followed by
    /// one dashed baseline series for every other catalog device.
    ///
    /// # Errors
    /// - `UnknownDevice` if `device_id` is not in the catalog
    /// - `InvalidInput` for an empty list, a negative or non-finite voltage,
    ///   invalid stressors or an invalid configuration
    pub fn sweep(
        &self,
        device_id: &str,
        stress: Option<&Stressors>,
        voltage_points: &[f64],
        comparison: bool,
    ) -> Result<Vec<CurveSeries>> {
        let base = self.catalog.lookup(device_id)?;
        validate_voltage_points(voltage_points)?;
        if let Some(s) = stress {
            s.validate()?;
        }

        let conditions = OperatingConditions::resolve(base, stress);
        self.sweep_at(&base.id, &conditions, voltage_points, comparison)
    }

    fn sweep_at(
        &self,
        device_id: &str,
        conditions: &OperatingConditions,
        voltage_points: &[f64],
        comparison: bool,
    ) -> Result<Vec<CurveSeries>> {
        self.config.validate()?;
        log::debug!(
            "sweeping '{}' at {} voltages ({} K, V_f {:.4}, I_f {:.3e}, comparison: {})",
            device_id,
            voltage_points.len(),
            conditions.temperature_kelvin,
            conditions.spec.forward_voltage,
            conditions.spec.forward_current,
            comparison
        );

        let extra = if comparison { self.catalog.len() - 1 } else { 0 };
        let mut series = Vec::with_capacity(voltage_points.len() + extra);

        for &v in voltage_points {
            let stop = (v + self.config.headroom).max(self.config.min_span);
            let voltages = linspace(0.0, stop, self.config.points);
            let currents = forward_current(
                &voltages,
                &conditions.spec,
                conditions.temperature_kelvin,
            );
            log::trace!("series @ {} V over [0, {}]", v, stop);
            series.push(CurveSeries::new(
                sweep_label(device_id, v),
                voltages,
                currents,
                SeriesStyle::Solid,
            ));
        }

        if comparison {
            let voltages = linspace(0.0, self.config.comparison_span, self.config.points);
            for other in self.catalog.iter().filter(|d| d.id != device_id) {
                let currents = forward_current(&voltages, other, BASELINE_TEMPERATURE_K);
                log::trace!("comparison series for '{}'", other.id);
                series.push(CurveSeries::new(
                    format!("{} LED", other.id),
                    voltages.clone(),
                    currents,
                    SeriesStyle::Dashed,
                ));
            }
        }

        Ok(series)
    }

    /// Voltage needed to drive `target_current` through `device_id`, derated
    /// and at the stress temperature when stress is supplied, otherwise at
    /// rated values and 298 K.
    ///
    /// `Ok(None)` means no finite voltage exists.
    pub fn inverse_point(
        &self,
        device_id: &str,
        target_current: f64,
        stress: Option<&Stressors>,
    ) -> Result<Option<f64>> {
        let base = self.catalog.lookup(device_id)?;
        validate_target_current(target_current)?;
        if let Some(s) = stress {
            s.validate()?;
        }

        let conditions = OperatingConditions::resolve(base, stress);
        log::debug!(
            "solving '{}' for {} A at {} K",
            base.id,
            target_current,
            conditions.temperature_kelvin
        );
        Ok(inverse_voltage(
            target_current,
            &conditions.spec,
            conditions.temperature_kelvin,
        ))
    }

    /// Solve the voltage for `target_current`, then sweep at that voltage.
    ///
    /// `Ok(None)` when the voltage is not computable; no sweep is drawn then.
    pub fn solve_and_sweep(
        &self,
        device_id: &str,
        target_current: f64,
        stress: Option<&Stressors>,
        comparison: bool,
    ) -> Result<Option<InverseSolution>> {
        let base = self.catalog.lookup(device_id)?;
        validate_target_current(target_current)?;
        if let Some(s) = stress {
            s.validate()?;
        }

        // Derate once for both the solve and the sweep
        let conditions = OperatingConditions::resolve(base, stress);
        let Some(voltage) = inverse_voltage(
            target_current,
            &conditions.spec,
            conditions.temperature_kelvin,
        ) else {
            return Ok(None);
        };
        validate_voltage_points(&[voltage])?;
        let series = self.sweep_at(&base.id, &conditions, &[voltage], comparison)?;
        Ok(Some(InverseSolution { voltage, series }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DeviceSpec;
    use crate::model::{apply, thermal_voltage};
    use approx::assert_relative_eq;

    fn generator() -> CurveGenerator<'static> {
        CurveGenerator::new(DeviceCatalog::builtin())
    }

    #[test]
    fn test_linspace() {
        let xs = linspace(0.0, 5.0, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[99], 5.0);
        assert_relative_eq!(xs[1] - xs[0], 5.0 / 99.0, epsilon = 1e-12);

        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn test_sweep_with_comparison() {
        let series = generator().sweep("Red", None, &[5.0], true).unwrap();
        assert_eq!(series.len(), 5);

        assert_eq!(series[0].label, "Red LED @ 5.0V");
        assert_eq!(series[0].style, SeriesStyle::Solid);
        assert_eq!(series[0].len(), 100);
        assert_eq!(*series[0].voltages.last().unwrap(), 6.0);

        let labels: Vec<&str> = series[1..].iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Green LED", "Blue LED", "Yellow LED", "White LED"]);
        for s in &series[1..] {
            assert_eq!(s.style, SeriesStyle::Dashed);
            assert_eq!(s.len(), 100);
            assert_eq!(*s.voltages.last().unwrap(), 5.0);
        }
    }

    #[test]
    fn test_sweep_domain_minimum_span() {
        let series = generator().sweep("Green", None, &[1.5, 2.5, 7.25], false).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].label, "Green LED @ 1.5V");
        assert_eq!(*series[0].voltages.last().unwrap(), 5.0);
        assert_eq!(*series[1].voltages.last().unwrap(), 5.0);
        assert_eq!(*series[2].voltages.last().unwrap(), 8.25);
        for s in &series {
            assert_eq!(s.voltages.len(), s.currents.len());
            assert_eq!(s.currents[0], 0.0);
        }
    }

    #[test]
    fn test_sweep_baseline_matches_model() {
        let series = generator().sweep("Yellow", None, &[2.0], false).unwrap();
        let spec = DeviceCatalog::builtin().lookup("Yellow").unwrap();
        let expected = forward_current(&series[0].voltages, spec, 298.0);
        assert_eq!(series[0].currents, expected);
    }

    #[test]
    fn test_sweep_stressed_derates_selected_only() {
        let stress = Stressors::new(85.0, 600.0);
        let series = generator()
            .sweep("Blue", Some(&stress), &[3.0], true)
            .unwrap();

        let blue = DeviceCatalog::builtin().lookup("Blue").unwrap();
        let adjusted = apply(blue, &stress);
        let expected = forward_current(&series[0].voltages, &adjusted, stress.temperature_kelvin());
        assert_eq!(series[0].currents, expected);

        let red = DeviceCatalog::builtin().lookup("Red").unwrap();
        let red_series = series.iter().find(|s| s.label == "Red LED").unwrap();
        assert_eq!(red_series.currents, forward_current(&red_series.voltages, red, 298.0));
    }

    #[test]
    fn test_sweep_saturates_instead_of_failing() {
        let series = generator().sweep("White", None, &[500.0], false).unwrap();
        assert_eq!(*series[0].currents.last().unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_sweep_errors() {
        let g = generator();
        assert!(matches!(
            g.sweep("Purple", None, &[2.0], false),
            Err(LedError::UnknownDevice { .. })
        ));
        for bad in [vec![], vec![-1.0], vec![2.0, f64::NAN], vec![f64::INFINITY]] {
            let err = g.sweep("Red", None, &bad, false).unwrap_err();
            assert_eq!(err.field(), Some("voltage_points"));
        }
        let err = g
            .sweep("Red", Some(&Stressors::new(25.0, -5.0)), &[2.0], false)
            .unwrap_err();
        assert_eq!(err.field(), Some("duration_seconds"));
    }

    #[test]
    fn test_custom_config() {
        let config = SweepConfig::new().with_points(11).with_comparison_span(4.0);
        let g = CurveGenerator::with_config(DeviceCatalog::builtin(), config);
        let series = g.sweep("Red", None, &[1.0], true).unwrap();
        assert!(series.iter().all(|s| s.len() == 11));
        assert_eq!(*series[1].voltages.last().unwrap(), 4.0);

        let bad = CurveGenerator::with_config(DeviceCatalog::builtin(), SweepConfig::new().with_points(0));
        assert!(bad.sweep("Red", None, &[1.0], false).is_err());
    }

    #[test]
    fn test_single_device_catalog_comparison() {
        let catalog = DeviceCatalog::new(vec![DeviceSpec::new("IR", 1.2, 0.05)]).unwrap();
        let series = CurveGenerator::new(&catalog).sweep("IR", None, &[1.0], true).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_inverse_point_baseline() {
        let v = generator().inverse_point("Red", 0.02, None).unwrap().unwrap();
        assert_relative_eq!(v, thermal_voltage(298.0) * 2f64.ln(), max_relative = 1e-12);
    }

    #[test]
    fn test_inverse_point_stressed_uses_stress_temperature() {
        let stress = Stressors::new(100.0, 0.0);
        let v = generator()
            .inverse_point("Red", 0.02, Some(&stress))
            .unwrap()
            .unwrap();
        assert_relative_eq!(v, thermal_voltage(373.15) * 2f64.ln(), max_relative = 1e-12);
    }

    #[test]
    fn test_inverse_point_errors() {
        let g = generator();
        assert!(matches!(
            g.inverse_point("Purple", 0.02, None),
            Err(LedError::UnknownDevice { .. })
        ));
        for bad in [-0.02, 0.0, f64::NAN] {
            match g.inverse_point("Red", bad, None) {
                Err(LedError::InvalidInput { field, .. }) => assert_eq!(field, "target_current"),
                other => panic!("expected InvalidInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_solve_and_sweep() {
        let solution = generator()
            .solve_and_sweep("Green", 0.02, None, false)
            .unwrap()
            .unwrap();
        assert_eq!(solution.series.len(), 1);
        assert_eq!(
            solution.series[0].label,
            format!("Green LED @ {:?}V", solution.voltage)
        );
    }

    #[test]
    fn test_solve_and_sweep_matches_separate_calls() {
        let g = generator();
        let cold = Stressors::new(-10.0, 0.0);
        let solution = g
            .solve_and_sweep("Red", 0.02, Some(&cold), true)
            .unwrap()
            .unwrap();

        let voltage = g.inverse_point("Red", 0.02, Some(&cold)).unwrap().unwrap();
        assert_eq!(solution.voltage, voltage);
        assert_eq!(
            solution.series,
            g.sweep("Red", Some(&cold), &[voltage], true).unwrap()
        );
    }

    #[test]
    fn test_stress_does_not_carry_between_calls() {
        let g = generator();
        let hot = Stressors::from_parts(Some(150.0), None);

        let before = g.inverse_point("Red", 0.02, None).unwrap();
        let stressed = g.inverse_point("Red", 0.02, hot.as_ref()).unwrap();
        let after = g.inverse_point("Red", 0.02, None).unwrap();

        assert_eq!(before, after);
        assert_ne!(before, stressed);
        assert_relative_eq!(
            stressed.unwrap(),
            thermal_voltage(423.15) * 2f64.ln(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_format_volts() {
        assert_eq!(format_volts(5.0), "5.0");
        assert_eq!(format_volts(2.5), "2.5");
        assert_eq!(format_volts(0.0001), "0.0001");
        assert_eq!(format_volts(1e-5), "1e-05");
        assert_eq!(format_volts(1.5e-7), "1.5e-07");
        assert_eq!(format_volts(1e16), "1e+16");
        assert_eq!(format_volts(2.5e123), "2.5e+123");
    }

    #[test]
    fn test_small_voltage_label() {
        let series = generator().sweep("Red", None, &[1e-5], false).unwrap();
        assert_eq!(series[0].label, "Red LED @ 1e-05V");
    }

    #[test]
    fn test_saturated_currents_serialize_as_marker() {
        let series = generator().sweep("Red", None, &[100.0], false).unwrap();
        let value = serde_json::to_value(&series[0]).unwrap();
        let currents = value["currents"].as_array().unwrap();
        assert_eq!(currents.len(), 100);
        assert_eq!(currents[0], 0.0);
        assert_eq!(currents[99], SATURATED);
        assert!(currents.iter().all(|c| !c.is_null()));
    }

    #[test]
    fn test_currents_milliamps() {
        let series = generator().sweep("Red", None, &[1.0], false).unwrap();
        let ma = series[0].currents_milliamps();
        assert_relative_eq!(ma[10], series[0].currents[10] * 1e3);
    }
}
