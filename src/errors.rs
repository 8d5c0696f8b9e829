//! Error types produced while building or analysing a truss.

use std::fmt;

use thiserror::Error;

/// Which kind of index failed a range check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    /// A 1-based node number taken from the incidence table.
    Node,
    /// A 0-based degree-of-freedom index taken from the restraint list.
    Dof,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Node => write!(f, "node number"),
            IndexKind::Dof => write!(f, "degree of freedom"),
        }
    }
}

/// Error returned when a truss analysis fails.
///
/// Every variant aborts the whole pipeline; no partial results are produced.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when a raw table does not match its declared count.
    #[error("table `{table}` has {found} entries but {expected} were declared")]
    InputShape {
        /// Name of the offending table.
        table: &'static str,
        /// Size implied by the declared counts.
        expected: usize,
        /// Size actually supplied.
        found: usize,
    },
    /// Returned when a raw table holds a NaN or infinite value.
    #[error("table `{table}` holds a non-finite value at entry {position}")]
    NonFiniteInput {
        /// Name of the offending table.
        table: &'static str,
        /// Position of the value inside the table.
        position: usize,
    },
    /// Returned when an element's endpoints coincide.
    #[error("element {element} has degenerate length {length:e}")]
    DegenerateElement {
        /// 0-based position of the element in the incidence table.
        element: usize,
        /// Computed length of the element.
        length: f64,
    },
    /// Returned when a node number or restraint index is outside its valid range.
    #[error("{kind} {index} at position {position} is outside the valid range (bound {bound})")]
    IndexOutOfRange {
        /// The kind of index being checked.
        kind: IndexKind,
        /// The rejected index as supplied.
        index: usize,
        /// Exclusive upper bound: `nn + 1` for node numbers, `2nn` for DOFs.
        bound: usize,
        /// Row of the incidence table or entry of the restraint list.
        position: usize,
    },
    /// Returned when the restraint list repeats a degree of freedom.
    #[error("degree of freedom {dof} is restrained more than once")]
    DuplicateRestraint {
        /// The repeated degree of freedom.
        dof: usize,
    },
    /// Returned when the reduced stiffness matrix cannot be solved.
    #[error(
        "reduced stiffness matrix is singular (pivot ratio {pivot_ratio:e}); \
         check supports and connectivity"
    )]
    SingularSystem {
        /// Smallest LU pivot relative to the largest diagonal entry.
        pivot_ratio: f64,
    },
    /// Returned when the supplied properties for an element are not physically meaningful.
    #[error("element {element} has invalid properties: {source}")]
    InvalidMemberProperties {
        /// 0-based position of the offending element.
        element: usize,
        /// Description of the invalid property.
        #[source]
        source: MemberPropertyError,
    },
}

/// Reason a member's material or section value is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MemberPropertyError {
    /// Returned when the cross-sectional area is zero, negative or not finite.
    #[error("area must be positive (received {area})")]
    NonPositiveArea {
        /// Rejected cross-sectional area.
        area: f64,
    },
    /// Returned when the elastic modulus is zero, negative or not finite.
    #[error("elastic modulus must be positive (received {elastic_modulus})")]
    NonPositiveElasticModulus {
        /// Rejected elastic modulus.
        elastic_modulus: f64,
    },
}

/// Result type for truss analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
