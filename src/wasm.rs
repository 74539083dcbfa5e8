//! WASM bindings for LedVI Core.
//!
//! This module provides JavaScript-friendly bindings so a browser chart
//! front-end can request curves directly.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLedModel } from 'ledvi_core';
//!
//! await init();
//!
//! const model = new WasmLedModel();
//!
//! // Baseline: no temperature or duration
//! const doc = JSON.parse(model.sweep_json('Red', [2.0, 3.5], true));
//! for (const s of doc.series) {
//!   chart.addSeries(s.label, s.voltages, s.currents, s.style);
//! }
//!
//! // Stressed: 60 °C after one hour; undefined if not computable
//! const v = model.inverse_point('Blue', 0.02, 60, 3600);
//! ```
//!
//! Every call carries its own stressors; passing neither temperature nor
//! duration evaluates at baseline.

use wasm_bindgen::prelude::*;

use crate::catalog::DeviceCatalog;
use crate::curve::CurveGenerator;
use crate::error::LedError;
use crate::model::Stressors;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: LedError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible LED model over a device catalog.
#[wasm_bindgen]
pub struct WasmLedModel {
    catalog: DeviceCatalog,
}

#[wasm_bindgen]
impl WasmLedModel {
    /// Create a model over the builtin catalog.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmLedModel {
        WasmLedModel {
            catalog: DeviceCatalog::builtin().clone(),
        }
    }

    /// Create a model over a catalog given in its JSON document form.
    #[wasm_bindgen]
    pub fn with_catalog(catalog_json: &str) -> Result<WasmLedModel, JsValue> {
        let catalog = DeviceCatalog::from_json(catalog_json).map_err(to_js)?;
        Ok(WasmLedModel { catalog })
    }

    /// Sweep a device and return `{"series": [...]}` as JSON.
    ///
    /// Stress applies when `temperature_celsius` or `duration_seconds` is given.
    #[wasm_bindgen]
    pub fn sweep_json(
        &self,
        device: &str,
        voltages: &[f64],
        comparison: bool,
        temperature_celsius: Option<f64>,
        duration_seconds: Option<f64>,
    ) -> Result<String, JsValue> {
        let stress = Stressors::from_parts(temperature_celsius, duration_seconds);
        let series = CurveGenerator::new(&self.catalog)
            .sweep(device, stress.as_ref(), voltages, comparison)
            .map_err(to_js)?;
        serde_json::to_string(&serde_json::json!({ "series": series }))
            .map_err(|e| to_js(LedError::WasmError { message: e.to_string() }))
    }

    /// Voltage for a target current, or `undefined` if not computable.
    ///
    /// Stress applies when `temperature_celsius` or `duration_seconds` is given.
    #[wasm_bindgen]
    pub fn inverse_point(
        &self,
        device: &str,
        target_current: f64,
        temperature_celsius: Option<f64>,
        duration_seconds: Option<f64>,
    ) -> Result<Option<f64>, JsValue> {
        let stress = Stressors::from_parts(temperature_celsius, duration_seconds);
        CurveGenerator::new(&self.catalog)
            .inverse_point(device, target_current, stress.as_ref())
            .map_err(to_js)
    }

    /// Device ids in catalog order.
    #[wasm_bindgen]
    pub fn devices(&self) -> Vec<String> {
        self.catalog.ids().map(String::from).collect()
    }
}

impl Default for WasmLedModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
