//! Three-member truss with a pin, a roller and a vertical apex load.
//!
//! Nodes: 1 at (0, 0) pinned, 2 at (4, 0) on a roller, 3 at (2, 1.5) loaded
//! with `-P` along Y. The diagonals are 2.5 long with direction cosines
//! (0.8, 0.6), which gives the hand solution used below.

use approx::assert_relative_eq;
use planar_truss::{point, IncidenceRow, ProblemDefinition, Structure};

const E: f64 = 200.0e9;
const A: f64 = 1.0e-3;
const P: f64 = 10_000.0;
const TOLERANCE: f64 = 1e-9;

fn triangle() -> ProblemDefinition {
    ProblemDefinition::from_tables(
        vec![point(0.0, 0.0), point(4.0, 0.0), point(2.0, 1.5)],
        vec![
            IncidenceRow::new(1, 2, E, A),
            IncidenceRow::new(2, 3, E, A),
            IncidenceRow::new(1, 3, E, A),
        ],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, -P],
        vec![0, 1, 3],
    )
}

#[test]
fn member_forces_match_method_of_joints() {
    let structure = Structure::analyze(&triangle()).expect("stable truss");
    let results = structure.results();

    let diagonal = -P / 1.2;
    let bottom = 2.0 * P / 3.0;
    assert_relative_eq!(results.internal_forces[0], bottom, max_relative = TOLERANCE);
    assert_relative_eq!(results.internal_forces[1], diagonal, max_relative = TOLERANCE);
    assert_relative_eq!(results.internal_forces[2], diagonal, max_relative = TOLERANCE);

    for (force, stress) in results.internal_forces.iter().zip(&results.axial_stresses) {
        assert_relative_eq!(*stress, force / A, max_relative = TOLERANCE);
    }
}

#[test]
fn reactions_split_the_load_between_supports() {
    let structure = Structure::analyze(&triangle()).expect("stable truss");
    let reactions = &structure.results().reactions;

    assert_eq!(reactions.len(), 3);
    assert!(reactions[0].abs() < 1e-6, "no horizontal reaction expected");
    assert_relative_eq!(reactions[1], P / 2.0, max_relative = TOLERANCE);
    assert_relative_eq!(reactions[2], P / 2.0, max_relative = TOLERANCE);
}

#[test]
fn displacements_match_closed_form() {
    let structure = Structure::analyze(&triangle()).expect("stable truss");
    let results = structure.results();
    let unit = P / (E * A);

    let roller = results.node_displacement(2).expect("node 2");
    assert_relative_eq!(roller.x, 8.0 / 3.0 * unit, max_relative = TOLERANCE);
    assert_eq!(roller.y, 0.0);

    let apex = results.node_displacement(3).expect("node 3");
    assert_relative_eq!(apex.x, 4.0 / 3.0 * unit, max_relative = TOLERANCE);
    assert_relative_eq!(apex.y, -5.25 * unit, max_relative = TOLERANCE);

    assert_eq!(results.node_displacement(1), Some(Default::default()));
}

#[test]
fn deformations_are_strains() {
    let structure = Structure::analyze(&triangle()).expect("stable truss");
    let results = structure.results();

    for (element, deformation) in structure.elements().iter().zip(&results.deformations) {
        let expected = results.internal_forces[element.index()] / (E * A);
        assert_relative_eq!(*deformation, expected, max_relative = TOLERANCE);
    }
}
