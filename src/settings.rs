//! Numerical tolerances used by the analysis pipeline.

use serde::{Deserialize, Serialize};

/// Tolerances controlling degeneracy and singularity detection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Elements no longer than this are rejected as degenerate.
    pub length_tolerance: f64,
    /// Smallest accepted ratio between the weakest LU pivot and the largest
    /// diagonal entry of the reduced stiffness matrix.
    pub pivot_tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            length_tolerance: 1e-12,
            pivot_tolerance: 1e-12,
        }
    }
}

impl SolverSettings {
    /// Set the degenerate-length tolerance.
    #[must_use]
    pub fn with_length_tolerance(mut self, tolerance: f64) -> Self {
        self.length_tolerance = tolerance;
        self
    }

    /// Set the singular-pivot tolerance.
    #[must_use]
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }
}
