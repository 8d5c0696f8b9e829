#![warn(clippy::all)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod element;
mod errors;
mod geometry;
mod problem;
mod results;
mod settings;
mod structure;

pub use element::{Element, LocalStiffness};
pub use errors::{AnalysisError, AnalysisResult, IndexKind, MemberPropertyError};
pub use geometry::{point, Displacement, Node, Point};
pub use problem::{IncidenceRow, ProblemDefinition};
pub use results::AnalysisResults;
pub use settings::SolverSettings;
pub use structure::{
    apply_boundary_conditions, assemble_global_stiffness, compute_axial_stress,
    compute_deformation, compute_internal_force, compute_reactions, create_elements,
    solve_displacements, Assembly, ReducedSystem, SolvedSystem, Structure,
};
