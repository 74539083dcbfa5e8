//! Sweep configuration.

use crate::error::{LedError, Result};

/// Samples per series.
pub const DEFAULT_POINTS: usize = 100;

/// Smallest upper bound of a requested sweep (V).
pub const DEFAULT_MIN_SPAN: f64 = 5.0;

/// Margin swept past each requested voltage (V).
pub const DEFAULT_HEADROOM: f64 = 1.0;

/// Upper bound of every comparison sweep (V).
pub const DEFAULT_COMPARISON_SPAN: f64 = 5.0;

/// Configuration for the curve generator.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Samples per series, endpoints included.
    pub points: usize,
    /// A requested sweep covers `[0, max(v + headroom, min_span)]`.
    pub min_span: f64,
    pub headroom: f64,
    /// Comparison sweeps cover `[0, comparison_span]`.
    pub comparison_span: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
            min_span: DEFAULT_MIN_SPAN,
            headroom: DEFAULT_HEADROOM,
            comparison_span: DEFAULT_COMPARISON_SPAN,
        }
    }
}

impl SweepConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of samples per series.
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Set the minimum sweep span (in volts).
    pub fn with_min_span(mut self, min_span: f64) -> Self {
        self.min_span = min_span;
        self
    }

    /// Set the headroom past each requested voltage (in volts).
    pub fn with_headroom(mut self, headroom: f64) -> Self {
        self.headroom = headroom;
        self
    }

    /// Set the span of the baseline comparison sweeps (in volts).
    pub fn with_comparison_span(mut self, comparison_span: f64) -> Self {
        self.comparison_span = comparison_span;
        self
    }

    /// Check the configuration can produce non-degenerate series.
    pub fn validate(&self) -> Result<()> {
        if self.points < 2 {
            return Err(LedError::invalid_input(
                "points",
                format!("a sweep needs at least 2 points, got {}", self.points),
            ));
        }
        for (field, value) in [
            ("min_span", self.min_span),
            ("comparison_span", self.comparison_span),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LedError::invalid_input(
                    field,
                    format!("span must be finite and positive, got {}", value),
                ));
            }
        }
        if !self.headroom.is_finite() || self.headroom < 0.0 {
            return Err(LedError::invalid_input(
                "headroom",
                format!("headroom must be finite and non-negative, got {}", self.headroom),
            ));
        }
        Ok(())
    }
}
