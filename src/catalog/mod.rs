//! Device specifications and the device catalog.
//!
//! The catalog maps a device id (an LED colour) to its rated forward voltage
//! and forward current at 25 °C. It is built once, either from the builtin
//! table or from a JSON document, and exposes no mutation API afterwards.
//!
//! # Catalog document
//!
//! ```text
//! {
//!   "devices": [
//!     { "id": "Red",   "forward_voltage": 1.8, "forward_current": 0.02 },
//!     { "id": "Amber", "forward_voltage": 2.0, "forward_current": 0.02 }
//!   ]
//! }
//! ```
//!
//! Entry order is preserved; comparison curves are emitted in that order.

mod validate;

pub use validate::validate_spec;

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{LedError, Result};
use crate::REFERENCE_CURRENT;

/// Rated operating point of one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Catalog key, e.g. "Red"
    pub id: String,
    /// Rated forward voltage (V)
    pub forward_voltage: f64,
    /// Rated forward current (A)
    pub forward_current: f64,
}

impl DeviceSpec {
    /// Create a new device specification.
    pub fn new(id: impl Into<String>, forward_voltage: f64, forward_current: f64) -> Self {
        Self {
            id: id.into(),
            forward_voltage,
            forward_current,
        }
    }
}

/// Builtin ratings at 25 °C: (id, V_f).
const BUILTIN_DEVICES: [(&str, f64); 5] = [
    ("Red", 1.8),
    ("Green", 2.2),
    ("Blue", 3.0),
    ("Yellow", 2.1),
    ("White", 3.2),
];

static BUILTIN: OnceLock<DeviceCatalog> = OnceLock::new();

#[derive(Deserialize)]
struct CatalogDocument {
    devices: Vec<DeviceSpec>,
}

/// Read-only registry of device specifications keyed by id.
#[derive(Debug, Clone)]
pub struct DeviceCatalog {
    devices: Vec<DeviceSpec>,
}

impl DeviceCatalog {
    /// Build a catalog, rejecting duplicate ids and non-physical ratings.
    pub fn new(devices: Vec<DeviceSpec>) -> Result<Self> {
        for (i, spec) in devices.iter().enumerate() {
            validate_spec(spec)?;
            if devices[..i].iter().any(|d| d.id == spec.id) {
                return Err(LedError::DuplicateDevice {
                    id: spec.id.clone(),
                });
            }
        }
        Ok(Self { devices })
    }

    /// The builtin five-colour catalog, initialised on first use.
    pub fn builtin() -> &'static DeviceCatalog {
        BUILTIN.get_or_init(|| Self {
            devices: BUILTIN_DEVICES
                .iter()
                .map(|&(id, vf)| DeviceSpec::new(id, vf, REFERENCE_CURRENT))
                .collect(),
        })
    }

    /// Parse a catalog from its JSON document form.
    pub fn from_json(input: &str) -> Result<Self> {
        let doc: CatalogDocument =
            serde_json::from_str(input).map_err(|e| LedError::CatalogParse {
                message: e.to_string(),
            })?;
        Self::new(doc.devices)
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LedError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let catalog = Self::from_json(&content)?;
        log::info!(
            "loaded {} devices from catalog '{}'",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Look up a device by id.
    pub fn lookup(&self, id: &str) -> Result<&DeviceSpec> {
        self.devices
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| LedError::unknown_device(id))
    }

    /// Device ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(|d| d.id.as_str())
    }

    /// Iterate over all device specifications in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceSpec> {
        self.devices.iter()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
