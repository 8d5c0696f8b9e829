//! Two-node axial bar element.

use nalgebra::{SMatrix, SVector};

use crate::errors::{AnalysisError, AnalysisResult, MemberPropertyError};
use crate::geometry::Node;

/// 4x4 element stiffness ordered `(node1.x, node1.y, node2.x, node2.y)`.
pub type LocalStiffness = SMatrix<f64, 4, 4>;

/// Immutable pin-jointed bar connecting two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Position of the element in the incidence table.
    index: usize,
    /// First endpoint.
    node1: Node,
    /// Second endpoint.
    node2: Node,
    /// Young's modulus of the member material.
    youngs_modulus: f64,
    /// Cross-sectional area.
    area: f64,
    /// Distance between the endpoints.
    length: f64,
    /// Cosine of the angle between the member and the X axis.
    cos: f64,
    /// Sine of the angle between the member and the X axis.
    sin: f64,
    /// Element stiffness in global coordinates.
    stiffness: LocalStiffness,
}

impl Element {
    /// Build an element and derive its length, direction cosines and stiffness.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidMemberProperties`] when `youngs_modulus` or
    /// `area` is not strictly positive, and [`AnalysisError::DegenerateElement`]
    /// when the endpoints are no further apart than `length_tolerance`.
    pub fn new(
        index: usize,
        node1: Node,
        node2: Node,
        youngs_modulus: f64,
        area: f64,
        length_tolerance: f64,
    ) -> AnalysisResult<Self> {
        if youngs_modulus <= 0.0 || !youngs_modulus.is_finite() {
            return Err(AnalysisError::InvalidMemberProperties {
                element: index,
                source: MemberPropertyError::NonPositiveElasticModulus {
                    elastic_modulus: youngs_modulus,
                },
            });
        }
        if area <= 0.0 || !area.is_finite() {
            return Err(AnalysisError::InvalidMemberProperties {
                element: index,
                source: MemberPropertyError::NonPositiveArea { area },
            });
        }

        let delta = node2.position().to_vector() - node1.position().to_vector();
        let length = delta.norm();
        if length <= length_tolerance || !length.is_finite() {
            return Err(AnalysisError::DegenerateElement {
                element: index,
                length,
            });
        }
        let cos = delta.x / length;
        let sin = delta.y / length;

        Ok(Self {
            index,
            node1,
            node2,
            youngs_modulus,
            area,
            length,
            cos,
            sin,
            stiffness: Self::calculate_stiffness(cos, sin, youngs_modulus * area / length),
        })
    }

    /// Stiffness of an axial bar with direction `(cos, sin)` and rigidity `EA/L`.
    fn calculate_stiffness(cos: f64, sin: f64, ea_over_l: f64) -> LocalStiffness {
        let c2 = cos * cos;
        let s2 = sin * sin;
        let cs = cos * sin;

        ea_over_l
            * LocalStiffness::from_row_slice(&[
                c2, cs, -c2, -cs, //
                cs, s2, -cs, -s2, //
                -c2, -cs, c2, cs, //
                -cs, -s2, cs, s2,
            ])
    }

    /// Position of the element in the incidence table.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// First endpoint.
    #[must_use]
    pub fn node1(&self) -> &Node {
        &self.node1
    }

    /// Second endpoint.
    #[must_use]
    pub fn node2(&self) -> &Node {
        &self.node2
    }

    /// Young's modulus.
    #[must_use]
    pub fn youngs_modulus(&self) -> f64 {
        self.youngs_modulus
    }

    /// Cross-sectional area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Length between the endpoints.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Direction cosine along X.
    #[must_use]
    pub fn cos(&self) -> f64 {
        self.cos
    }

    /// Direction cosine along Y.
    #[must_use]
    pub fn sin(&self) -> f64 {
        self.sin
    }

    /// Axial rigidity over length, `E * A / L`.
    #[must_use]
    pub fn axial_stiffness(&self) -> f64 {
        self.youngs_modulus * self.area / self.length
    }

    /// Element stiffness matrix in global coordinates.
    #[must_use]
    pub fn stiffness(&self) -> &LocalStiffness {
        &self.stiffness
    }

    /// Global DOF indices in local order `(node1.x, node1.y, node2.x, node2.y)`.
    #[must_use]
    pub fn dof_map(&self) -> [usize; 4] {
        [
            self.node1.dofx,
            self.node1.dofy,
            self.node2.dofx,
            self.node2.dofy,
        ]
    }

    /// Axial projection vector `(-cos, -sin, cos, sin)`.
    ///
    /// Dotting it with the element's nodal displacements gives the elongation;
    /// positive is tension.
    #[must_use]
    pub fn projection(&self) -> SVector<f64, 4> {
        SVector::<f64, 4>::new(-self.cos, -self.sin, self.cos, self.sin)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{point, Node};

    fn bar(from: (f64, f64), to: (f64, f64)) -> AnalysisResult<Element> {
        Element::new(
            0,
            Node::numbered(1, point(from.0, from.1)),
            Node::numbered(2, point(to.0, to.1)),
            200.0e9,
            0.01,
            1e-12,
        )
    }

    #[test]
    fn horizontal_bar_has_axial_stiffness_only_along_x() {
        let element = bar((0.0, 0.0), (2.0, 0.0)).expect("valid element");
        let k = 200.0e9 * 0.01 / 2.0;
        assert_relative_eq!(element.length(), 2.0);
        assert_relative_eq!(element.stiffness()[(0, 0)], k);
        assert_relative_eq!(element.stiffness()[(0, 2)], -k);
        assert_relative_eq!(element.stiffness()[(1, 1)], 0.0);
        assert_relative_eq!(element.stiffness()[(3, 3)], 0.0);
    }

    #[test]
    fn stiffness_is_symmetric_with_a_single_nonzero_mode() {
        let element = bar((1.0, -0.5), (3.5, 2.25)).expect("valid element");
        let stiffness = *element.stiffness();
        assert_eq!(stiffness, stiffness.transpose());

        let mut eigenvalues: Vec<f64> = stiffness
            .symmetric_eigen()
            .eigenvalues
            .iter()
            .copied()
            .collect();
        eigenvalues.sort_by(f64::total_cmp);

        // The only deformation mode is axial stretching; the matrix trace
        // (2 * EA/L) is carried entirely by that eigenvalue.
        let k = element.axial_stiffness();
        for zero in &eigenvalues[..3] {
            assert!(zero.abs() < 1e-9 * k, "expected zero eigenvalue, got {zero}");
        }
        assert_relative_eq!(eigenvalues[3], 2.0 * k, max_relative = 1e-9);
        assert_relative_eq!(stiffness.trace(), 2.0 * k, max_relative = 1e-12);
    }

    #[test]
    fn direction_cosines_follow_node_order() {
        let element = bar((0.0, 0.0), (-3.0, 4.0)).expect("valid element");
        assert_relative_eq!(element.cos(), -0.6);
        assert_relative_eq!(element.sin(), 0.8);
        assert_eq!(element.dof_map(), [0, 1, 2, 3]);
    }

    #[test]
    fn coincident_endpoints_are_rejected() {
        let error = bar((1.0, 1.0), (1.0, 1.0)).expect_err("zero length detected");
        assert_eq!(
            error,
            AnalysisError::DegenerateElement {
                element: 0,
                length: 0.0
            }
        );
    }

    #[test]
    fn invalid_properties_are_rejected() {
        let node1 = Node::numbered(1, point(0.0, 0.0));
        let node2 = Node::numbered(2, point(1.0, 0.0));

        let area_error =
            Element::new(4, node1, node2, 200.0e9, 0.0, 1e-12).expect_err("zero area rejected");
        assert!(matches!(
            area_error,
            AnalysisError::InvalidMemberProperties {
                element: 4,
                source: MemberPropertyError::NonPositiveArea { .. }
            }
        ));

        let modulus_error = Element::new(4, node1, node2, f64::NAN, 0.01, 1e-12)
            .expect_err("NaN modulus rejected");
        assert!(matches!(
            modulus_error,
            AnalysisError::InvalidMemberProperties {
                source: MemberPropertyError::NonPositiveElasticModulus { .. },
                ..
            }
        ));
    }
}
