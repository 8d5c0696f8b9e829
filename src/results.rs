//! Result arrays produced by an analysis.

use serde::{Deserialize, Serialize};

use crate::geometry::Displacement;

/// Output of a truss analysis, ordered as the input tables.
///
/// `axial_stresses` are stresses (force per area); `internal_forces` are
/// the corresponding axial forces. Positive values are tension.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Support reactions, aligned with the restraint list.
    pub reactions: Vec<f64>,
    /// Displacement of every DOF, `2 * nn` entries.
    pub displacements: Vec<f64>,
    /// Axial strain of each element.
    pub deformations: Vec<f64>,
    /// Axial force of each element.
    pub internal_forces: Vec<f64>,
    /// Axial stress of each element.
    pub axial_stresses: Vec<f64>,
}

impl AnalysisResults {
    /// Displacement of a node given its 1-based number.
    #[must_use]
    pub fn node_displacement(&self, number: usize) -> Option<Displacement> {
        let base = 2 * number.checked_sub(1)?;
        Some(Displacement::new(
            *self.displacements.get(base)?,
            *self.displacements.get(base + 1)?,
        ))
    }

    /// Index and value of the element with the largest absolute stress.
    #[must_use]
    pub fn max_stress_element(&self) -> Option<(usize, f64)> {
        self.axial_stresses
            .iter()
            .copied()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResults {
        AnalysisResults {
            reactions: vec![-1.0, 0.0],
            displacements: vec![0.0, 0.0, 0.5, -0.25],
            deformations: vec![0.1, -0.3],
            internal_forces: vec![10.0, -30.0],
            axial_stresses: vec![100.0, -300.0],
        }
    }

    #[test]
    fn node_displacement_uses_one_based_numbers() {
        let results = sample();
        assert_eq!(results.node_displacement(2), Some(Displacement::new(0.5, -0.25)));
        assert_eq!(results.node_displacement(0), None);
        assert_eq!(results.node_displacement(3), None);
    }

    #[test]
    fn max_stress_compares_magnitudes() {
        assert_eq!(sample().max_stress_element(), Some((1, -300.0)));
        assert_eq!(AnalysisResults::default().max_stress_element(), None);
    }
}
