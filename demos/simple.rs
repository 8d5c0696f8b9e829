use planar_truss::{point, IncidenceRow, ProblemDefinition, Structure};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A single bar pinned at the origin, free to stretch along X.
    let problem = ProblemDefinition::from_tables(
        vec![point(0.0, 0.0), point(1.0, 0.0)],
        vec![IncidenceRow::new(1, 2, 200.0e9, 0.01)],
        vec![0.0, 0.0, -1_000.0, 0.0],
        vec![0, 1, 3],
    );

    let structure = Structure::analyze(&problem)?;

    if let Some(displacement) = structure.results().node_displacement(2) {
        println!("ux = {:.3e} m", displacement.x);
    }
    println!("axial force = {:+.1} N", structure.results().internal_forces[0]);

    Ok(())
}
