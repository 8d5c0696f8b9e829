//! Raw numeric description of a truss handed to the analysis.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::geometry::Point;
use crate::settings::SolverSettings;

/// One row of the incidence table.
///
/// Node numbers are 1-based. Deserializes from either
/// `[node1, node2, youngs_modulus, area]` or the equivalent object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncidenceRow {
    /// Number of the first endpoint.
    pub node1: usize,
    /// Number of the second endpoint.
    pub node2: usize,
    /// Young's modulus of the member.
    pub youngs_modulus: f64,
    /// Cross-sectional area of the member.
    pub area: f64,
}

impl IncidenceRow {
    /// Create a row connecting `node1` to `node2`.
    #[must_use]
    pub const fn new(node1: usize, node2: usize, youngs_modulus: f64, area: f64) -> Self {
        Self {
            node1,
            node2,
            youngs_modulus,
            area,
        }
    }
}

/// Complete, explicit input to a single analysis.
///
/// Degree-of-freedom indices (in `forces` and `restraints`) are 0-based: node
/// `i` owns `2i - 2` (X) and `2i - 1` (Y).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProblemDefinition {
    /// Number of nodes, `nn`.
    pub node_count: usize,
    /// Node coordinates, one point per node.
    pub coordinates: Vec<Point>,
    /// Number of members, `nm`.
    pub member_count: usize,
    /// Incidence table, one row per member.
    pub incidence: Vec<IncidenceRow>,
    /// Number of applied loads, `nc`. Informational.
    pub load_count: usize,
    /// Nodal force vector of length `2 * nn`.
    pub forces: Vec<f64>,
    /// Number of restrained degrees of freedom, `nr`.
    pub restraint_count: usize,
    /// Restrained degree-of-freedom indices.
    pub restraints: Vec<usize>,
    /// Solver tolerances.
    #[serde(default)]
    pub settings: SolverSettings,
}

impl ProblemDefinition {
    /// Build a definition whose declared counts match the supplied tables.
    ///
    /// `load_count` is taken as the number of non-zero entries of `forces`.
    ///
    /// # Examples
    /// ```
    /// use planar_truss::{point, IncidenceRow, ProblemDefinition};
    ///
    /// let problem = ProblemDefinition::from_tables(
    ///     vec![point(0.0, 0.0), point(1.0, 0.0)],
    ///     vec![IncidenceRow::new(1, 2, 200.0e9, 0.01)],
    ///     vec![0.0, 0.0, 1_000.0, 0.0],
    ///     vec![0, 1, 3],
    /// );
    /// assert_eq!(problem.dof_count(), 4);
    /// assert_eq!(problem.load_count, 1);
    /// ```
    #[must_use]
    pub fn from_tables(
        coordinates: Vec<Point>,
        incidence: Vec<IncidenceRow>,
        forces: Vec<f64>,
        restraints: Vec<usize>,
    ) -> Self {
        Self {
            node_count: coordinates.len(),
            member_count: incidence.len(),
            load_count: forces.iter().filter(|force| **force != 0.0).count(),
            restraint_count: restraints.len(),
            coordinates,
            incidence,
            forces,
            restraints,
            settings: SolverSettings::default(),
        }
    }

    /// Replace the solver settings.
    #[must_use]
    pub fn with_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Total number of degrees of freedom, `2 * nn`.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        2 * self.node_count
    }

    /// Check that every table matches its declared count and holds finite values.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InputShape`] on a size mismatch and
    /// [`AnalysisError::NonFiniteInput`] when a coordinate or force is NaN or infinite.
    pub fn check_shape(&self) -> AnalysisResult<()> {
        expect_len("coordinates", self.node_count, self.coordinates.len())?;
        expect_len("incidence", self.member_count, self.incidence.len())?;
        expect_len("forces", self.dof_count(), self.forces.len())?;
        expect_len("restraints", self.restraint_count, self.restraints.len())?;
        if self.load_count > self.dof_count() {
            return Err(AnalysisError::InputShape {
                table: "loads",
                expected: self.dof_count(),
                found: self.load_count,
            });
        }

        for (position, point) in self.coordinates.iter().enumerate() {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(AnalysisError::NonFiniteInput {
                    table: "coordinates",
                    position,
                });
            }
        }
        if let Some(position) = self.forces.iter().position(|force| !force.is_finite()) {
            return Err(AnalysisError::NonFiniteInput {
                table: "forces",
                position,
            });
        }

        let applied = self.forces.iter().filter(|force| **force != 0.0).count();
        if applied != self.load_count {
            warn!(
                "{} loads declared but the force vector has {} non-zero entries",
                self.load_count, applied
            );
        }
        Ok(())
    }
}

/// Fail with [`AnalysisError::InputShape`] unless `found == expected`.
fn expect_len(table: &'static str, expected: usize, found: usize) -> AnalysisResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(AnalysisError::InputShape {
            table,
            expected,
            found,
        })
    }
}
