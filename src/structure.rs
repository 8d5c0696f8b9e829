//! Direct-stiffness analysis pipeline for planar trusses.
//!
//! The pipeline is a fixed sequence of stages, each consuming the previous
//! stage's output:
//!
//! 1. [`create_elements`] turns the incidence table into [`Element`]s.
//! 2. [`assemble_global_stiffness`] scatters element stiffnesses into an [`Assembly`].
//! 3. [`apply_boundary_conditions`] removes restrained rows and columns, giving a [`ReducedSystem`].
//! 4. [`solve_displacements`] solves the reduced system, giving a [`SolvedSystem`].
//! 5. [`SolvedSystem::recover`] derives reactions, deformations, stresses and
//!    forces and seals everything into a [`Structure`].
//!
//! [`Structure::analyze`] runs the whole sequence.

use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector, SVector};

use crate::element::Element;
use crate::errors::{AnalysisError, AnalysisResult, IndexKind};
use crate::geometry::Node;
use crate::problem::ProblemDefinition;
use crate::results::AnalysisResults;
use crate::settings::SolverSettings;

/// Build the elements described by the incidence table, in input order.
///
/// # Errors
///
/// Returns [`AnalysisError::IndexOutOfRange`] when a node number is outside
/// `1..=nn`, and propagates element construction failures.
pub fn create_elements(problem: &ProblemDefinition) -> AnalysisResult<Vec<Element>> {
    let node_count = problem.coordinates.len();
    let resolve = |position: usize, number: usize| -> AnalysisResult<Node> {
        if number == 0 || number > node_count {
            return Err(AnalysisError::IndexOutOfRange {
                kind: IndexKind::Node,
                index: number,
                bound: node_count + 1,
                position,
            });
        }
        Ok(Node::numbered(number, problem.coordinates[number - 1]))
    };

    problem
        .incidence
        .iter()
        .enumerate()
        .map(|(position, row)| {
            let node1 = resolve(position, row.node1)?;
            let node2 = resolve(position, row.node2)?;
            Element::new(
                position,
                node1,
                node2,
                row.youngs_modulus,
                row.area,
                problem.settings.length_tolerance,
            )
        })
        .collect()
}

/// Elements together with the global stiffness matrix they assemble into.
#[derive(Clone, Debug)]
pub struct Assembly {
    /// Elements in input order.
    elements: Vec<Element>,
    /// Global stiffness matrix, `2nn x 2nn`.
    stiffness: DMatrix<f64>,
}

impl Assembly {
    /// Elements in input order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Global stiffness matrix.
    #[must_use]
    pub fn stiffness(&self) -> &DMatrix<f64> {
        &self.stiffness
    }
}

/// Sum every element stiffness into a zeroed `2nn x 2nn` matrix.
///
/// Each element contributes its four 2x2 blocks at the crossings of its two
/// nodes' DOF pairs.
///
/// # Panics
///
/// Panics if an element refers to a DOF at or beyond `2 * node_count`; elements
/// from [`create_elements`] never do.
#[must_use]
pub fn assemble_global_stiffness(node_count: usize, elements: Vec<Element>) -> Assembly {
    let dof = 2 * node_count;
    let mut stiffness = DMatrix::zeros(dof, dof);
    for element in &elements {
        let local = element.stiffness();
        let dof_map = element.dof_map();
        for (row_local, &global_row) in dof_map.iter().enumerate() {
            for (col_local, &global_col) in dof_map.iter().enumerate() {
                stiffness[(global_row, global_col)] += local[(row_local, col_local)];
            }
        }
    }
    debug!(
        "assembled {dof}x{dof} global stiffness from {} elements",
        elements.len()
    );
    Assembly {
        elements,
        stiffness,
    }
}

/// Linear system left after eliminating restrained degrees of freedom.
#[derive(Clone, Debug)]
pub struct ReducedSystem {
    /// The assembly the system was reduced from.
    assembly: Assembly,
    /// Full nodal force vector.
    forces: DVector<f64>,
    /// Restrained DOFs in input order.
    restraints: Vec<usize>,
    /// Unrestrained DOFs in ascending order.
    free_dofs: Vec<usize>,
    /// Stiffness restricted to the free DOFs.
    stiffness: DMatrix<f64>,
    /// Forces restricted to the free DOFs.
    load: DVector<f64>,
}

impl ReducedSystem {
    /// Stiffness restricted to the free DOFs.
    #[must_use]
    pub fn stiffness(&self) -> &DMatrix<f64> {
        &self.stiffness
    }

    /// Forces restricted to the free DOFs.
    #[must_use]
    pub fn load(&self) -> &DVector<f64> {
        &self.load
    }

    /// Unrestrained DOFs in ascending order.
    #[must_use]
    pub fn free_dofs(&self) -> &[usize] {
        &self.free_dofs
    }
}

/// Delete restrained rows and columns from the global system.
///
/// Only homogeneous (zero-displacement) restraints are supported.
///
/// # Errors
///
/// Returns [`AnalysisError::InputShape`] when `forces` does not match the
/// assembly, [`AnalysisError::IndexOutOfRange`] for a restraint outside
/// `0..2nn`, and [`AnalysisError::DuplicateRestraint`] for a repeated entry.
pub fn apply_boundary_conditions(
    assembly: Assembly,
    forces: &[f64],
    restraints: &[usize],
) -> AnalysisResult<ReducedSystem> {
    let dof = assembly.stiffness.nrows();
    if forces.len() != dof {
        return Err(AnalysisError::InputShape {
            table: "forces",
            expected: dof,
            found: forces.len(),
        });
    }

    let mut restrained = vec![false; dof];
    for (position, &index) in restraints.iter().enumerate() {
        if index >= dof {
            return Err(AnalysisError::IndexOutOfRange {
                kind: IndexKind::Dof,
                index,
                bound: dof,
                position,
            });
        }
        if restrained[index] {
            return Err(AnalysisError::DuplicateRestraint { dof: index });
        }
        restrained[index] = true;
        if forces[index] != 0.0 {
            warn!(
                "load {} on restrained DOF {index} is carried directly by the support",
                forces[index]
            );
        }
    }

    let free_dofs: Vec<usize> = (0..dof).filter(|&index| !restrained[index]).collect();
    let free_len = free_dofs.len();
    let mut stiffness = DMatrix::zeros(free_len, free_len);
    let mut load = DVector::zeros(free_len);
    for (row_idx, &row) in free_dofs.iter().enumerate() {
        load[row_idx] = forces[row];
        for (col_idx, &col) in free_dofs.iter().enumerate() {
            stiffness[(row_idx, col_idx)] = assembly.stiffness[(row, col)];
        }
    }
    debug!(
        "eliminated {} restrained DOFs, {free_len} remain",
        restraints.len()
    );

    Ok(ReducedSystem {
        assembly,
        forces: DVector::from_column_slice(forces),
        restraints: restraints.to_vec(),
        free_dofs,
        stiffness,
        load,
    })
}

/// Reduced system together with the full displacement vector.
#[derive(Clone, Debug)]
pub struct SolvedSystem {
    /// The system that was solved.
    reduced: ReducedSystem,
    /// Displacements for every DOF; zero at restrained ones.
    displacements: DVector<f64>,
}

/// Solve the reduced system with a dense LU factorisation and scatter the
/// solution back to all `2nn` DOFs.
///
/// # Errors
///
/// Returns [`AnalysisError::SingularSystem`] when the smallest pivot relative to
/// the largest diagonal entry is at or below `settings.pivot_tolerance`, when
/// the factorisation cannot solve, or when the solution is not finite.
pub fn solve_displacements(
    reduced: ReducedSystem,
    settings: &SolverSettings,
) -> AnalysisResult<SolvedSystem> {
    let mut displacements = DVector::zeros(reduced.forces.len());
    if reduced.free_dofs.is_empty() {
        return Ok(SolvedSystem {
            reduced,
            displacements,
        });
    }

    let scale = reduced
        .stiffness
        .diagonal()
        .iter()
        .fold(0.0_f64, |max, value| max.max(value.abs()));
    let lu = reduced.stiffness.clone().lu();
    let pivot = lu
        .u()
        .diagonal()
        .iter()
        .fold(f64::INFINITY, |min, value| min.min(value.abs()));
    let pivot_ratio = if scale > 0.0 { pivot / scale } else { 0.0 };
    debug!("reduced system pivot ratio {pivot_ratio:e}");
    if pivot_ratio.is_nan() || pivot_ratio <= settings.pivot_tolerance {
        return Err(AnalysisError::SingularSystem { pivot_ratio });
    }

    let solution = lu
        .solve(&reduced.load)
        .ok_or(AnalysisError::SingularSystem { pivot_ratio })?;
    if solution.iter().any(|value| !value.is_finite()) {
        return Err(AnalysisError::SingularSystem { pivot_ratio });
    }

    for (idx, &dof) in reduced.free_dofs.iter().enumerate() {
        displacements[dof] = solution[idx];
    }
    Ok(SolvedSystem {
        reduced,
        displacements,
    })
}

impl SolvedSystem {
    /// Displacements for every DOF.
    #[must_use]
    pub fn displacements(&self) -> &DVector<f64> {
        &self.displacements
    }

    /// Derive reactions and per-element results, sealing the analysis record.
    #[must_use]
    pub fn recover(self) -> Structure {
        let ReducedSystem {
            assembly,
            forces,
            restraints,
            free_dofs,
            stiffness: reduced_stiffness,
            load: reduced_forces,
        } = self.reduced;
        let displacements = self.displacements;

        let reactions = compute_reactions(&assembly.stiffness, &displacements, &restraints);
        let deformations = compute_deformation(&assembly.elements, &displacements);
        let axial_stresses = compute_axial_stress(&assembly.elements, &deformations);
        let internal_forces = compute_internal_force(&assembly.elements, &axial_stresses);

        Structure {
            elements: assembly.elements,
            global_stiffness: assembly.stiffness,
            forces,
            restraints,
            free_dofs,
            reduced_stiffness,
            reduced_forces,
            results: AnalysisResults {
                reactions,
                displacements: displacements.iter().copied().collect(),
                deformations,
                internal_forces,
                axial_stresses,
            },
        }
    }
}

/// Support forces `(K u)` picked at the restrained DOFs, in restraint order.
#[must_use]
pub fn compute_reactions(
    stiffness: &DMatrix<f64>,
    displacements: &DVector<f64>,
    restraints: &[usize],
) -> Vec<f64> {
    let nodal_forces = stiffness * displacements;
    restraints.iter().map(|&dof| nodal_forces[dof]).collect()
}

/// Axial strain of each element: projected relative displacement over length.
#[must_use]
pub fn compute_deformation(elements: &[Element], displacements: &DVector<f64>) -> Vec<f64> {
    elements
        .iter()
        .map(|element| {
            let [a, b, c, d] = element.dof_map();
            let local = SVector::<f64, 4>::new(
                displacements[a],
                displacements[b],
                displacements[c],
                displacements[d],
            );
            element.projection().dot(&local) / element.length()
        })
        .collect()
}

/// Hooke's law per element, `E * deformation`.
#[must_use]
pub fn compute_axial_stress(elements: &[Element], deformations: &[f64]) -> Vec<f64> {
    elements
        .iter()
        .zip(deformations)
        .map(|(element, deformation)| element.youngs_modulus() * deformation)
        .collect()
}

/// Axial force per element, `A * stress`. Positive is tension.
#[must_use]
pub fn compute_internal_force(elements: &[Element], stresses: &[f64]) -> Vec<f64> {
    elements
        .iter()
        .zip(stresses)
        .map(|(element, stress)| element.area() * stress)
        .collect()
}

/// Immutable record of one completed truss analysis.
#[derive(Clone, Debug)]
pub struct Structure {
    /// Elements in input order.
    elements: Vec<Element>,
    /// Global stiffness matrix.
    global_stiffness: DMatrix<f64>,
    /// Full nodal force vector.
    forces: DVector<f64>,
    /// Restrained DOFs in input order.
    restraints: Vec<usize>,
    /// Unrestrained DOFs in ascending order.
    free_dofs: Vec<usize>,
    /// Stiffness restricted to the free DOFs.
    reduced_stiffness: DMatrix<f64>,
    /// Forces restricted to the free DOFs.
    reduced_forces: DVector<f64>,
    /// Result arrays handed to writers.
    results: AnalysisResults,
}

impl Structure {
    /// Run the full pipeline on `problem`.
    ///
    /// # Errors
    ///
    /// Returns the first [`AnalysisError`] raised by any stage; no partial
    /// results are produced.
    ///
    /// # Examples
    /// ```
    /// use planar_truss::{point, IncidenceRow, ProblemDefinition, Structure};
    ///
    /// let problem = ProblemDefinition::from_tables(
    ///     vec![point(0.0, 0.0), point(1.0, 0.0)],
    ///     vec![IncidenceRow::new(1, 2, 200.0e9, 0.01)],
    ///     vec![0.0, 0.0, 1_000.0, 0.0],
    ///     vec![0, 1, 3],
    /// );
    /// let structure = Structure::analyze(&problem).expect("stable truss");
    /// assert!((structure.results().internal_forces[0] - 1_000.0).abs() < 1e-6);
    /// ```
    pub fn analyze(problem: &ProblemDefinition) -> AnalysisResult<Self> {
        problem.check_shape()?;
        debug!(
            "analysing {} nodes, {} members, {} restraints",
            problem.node_count, problem.member_count, problem.restraint_count
        );

        let elements = create_elements(problem)?;
        let assembly = assemble_global_stiffness(problem.node_count, elements);
        let reduced = apply_boundary_conditions(assembly, &problem.forces, &problem.restraints)?;
        let solved = solve_displacements(reduced, &problem.settings)?;
        let structure = solved.recover();

        info!(
            "solved truss with {} elements and {} free DOFs",
            structure.elements.len(),
            structure.free_dofs.len()
        );
        Ok(structure)
    }

    /// Elements in input order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Global stiffness matrix.
    #[must_use]
    pub fn global_stiffness(&self) -> &DMatrix<f64> {
        &self.global_stiffness
    }

    /// Stiffness after restraint elimination.
    #[must_use]
    pub fn reduced_stiffness(&self) -> &DMatrix<f64> {
        &self.reduced_stiffness
    }

    /// Force vector after restraint elimination.
    #[must_use]
    pub fn reduced_forces(&self) -> &DVector<f64> {
        &self.reduced_forces
    }

    /// Unrestrained DOFs in ascending order.
    #[must_use]
    pub fn free_dofs(&self) -> &[usize] {
        &self.free_dofs
    }

    /// Restrained DOFs in input order.
    #[must_use]
    pub fn restraints(&self) -> &[usize] {
        &self.restraints
    }

    /// Result arrays.
    #[must_use]
    pub fn results(&self) -> &AnalysisResults {
        &self.results
    }

    /// Consume the record, keeping only the result arrays.
    #[must_use]
    pub fn into_results(self) -> AnalysisResults {
        self.results
    }

    /// Net unbalanced force `[x, y]`: reactions plus loads acting on free DOFs.
    ///
    /// Loads on restrained DOFs go straight into the support and are not part
    /// of the reactions, so they are left out. Both components are zero up to
    /// rounding for any solved structure.
    #[must_use]
    pub fn equilibrium_residual(&self) -> [f64; 2] {
        let mut residual = [0.0; 2];
        for (&dof, reaction) in self.restraints.iter().zip(&self.results.reactions) {
            residual[dof % 2] += reaction;
        }
        for &dof in &self.free_dofs {
            residual[dof % 2] += self.forces[dof];
        }
        residual
    }
}
