use planar_truss::{point, IncidenceRow, ProblemDefinition, Structure};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Warren truss: four bottom panels, three top nodes.
    let coordinates = vec![
        point(0.0, 0.0),
        point(4.0, 0.0),
        point(8.0, 0.0),
        point(12.0, 0.0),
        point(16.0, 0.0),
        point(2.0, 3.0),
        point(6.0, 3.0),
        point(10.0, 3.0),
        point(14.0, 3.0),
    ];
    let steel = |a, b| IncidenceRow::new(a, b, 210.0e9, 3.0e-3);
    let incidence = vec![
        steel(1, 2),
        steel(2, 3),
        steel(3, 4),
        steel(4, 5),
        steel(6, 7),
        steel(7, 8),
        steel(8, 9),
        steel(1, 6),
        steel(6, 2),
        steel(2, 7),
        steel(7, 3),
        steel(3, 8),
        steel(8, 4),
        steel(4, 9),
        steel(9, 5),
    ];

    // Deck loads on the interior bottom nodes.
    let mut forces = vec![0.0; 18];
    for node in 2..=4 {
        forces[2 * node - 1] = -50_000.0;
    }

    // Pin at node 1, roller at node 5.
    let problem = ProblemDefinition::from_tables(coordinates, incidence, forces, vec![0, 1, 9]);
    let structure = Structure::analyze(&problem)?;
    let results = structure.results();

    for (element, (force, stress)) in results
        .internal_forces
        .iter()
        .zip(&results.axial_stresses)
        .enumerate()
    {
        let state = if *force >= 0.0 { "tension" } else { "compression" };
        println!(
            "member {:>2}: {force:+12.1} N  {stress:+.3e} Pa  ({state})",
            element + 1
        );
    }

    let [x, y] = structure.equilibrium_residual();
    println!("equilibrium residual: ({x:.2e}, {y:.2e}) N");

    Ok(())
}
