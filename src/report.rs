use planar_truss::{AnalysisResults, Structure};
use std::fmt::Write;

/// Render the five result arrays as a plain-text report.
///
/// Sections follow input order: reactions by restraint entry, displacements
/// by DOF, then one line per element for deformation, force and stress.
#[must_use]
pub fn render_report(structure: &Structure) -> String {
    let results = structure.results();
    let mut output = String::new();

    section(&mut output, "Support reactions [N]");
    for (dof, reaction) in structure.restraints().iter().zip(&results.reactions) {
        writeln!(&mut output, "  dof {dof:>4}: {reaction:+.6e}")
            .expect("writing to string cannot fail");
    }

    section(&mut output, "Displacements [m]");
    for (dof, displacement) in results.displacements.iter().enumerate() {
        writeln!(&mut output, "  dof {dof:>4}: {displacement:+.6e}")
            .expect("writing to string cannot fail");
    }

    element_section(&mut output, "Deformations []", &results.deformations);
    element_section(&mut output, "Internal forces [N]", &results.internal_forces);
    element_section(&mut output, "Axial stresses [Pa]", &results.axial_stresses);

    output
}

/// One-line summary printed after a run.
#[must_use]
pub fn render_summary(results: &AnalysisResults) -> String {
    let peak_displacement = results
        .displacements
        .iter()
        .fold(0.0_f64, |max, value| max.max(value.abs()));
    match results.max_stress_element() {
        Some((element, stress)) => format!(
            "max |u| = {peak_displacement:.3e} m, max |stress| = {:.3e} Pa in element {}",
            stress.abs(),
            element + 1
        ),
        None => format!("max |u| = {peak_displacement:.3e} m, no elements"),
    }
}

/// Start a titled block, separated from the previous one by a blank line.
fn section(output: &mut String, title: &str) {
    if !output.is_empty() {
        output.push('\n');
    }
    writeln!(output, "{title}").expect("writing to string cannot fail");
}

/// Titled block with one line per element.
fn element_section(output: &mut String, title: &str, values: &[f64]) {
    section(output, title);
    for (index, value) in values.iter().enumerate() {
        // Elements are reported with 1-based numbers, like nodes.
        writeln!(output, "  element {:>4}: {value:+.6e}", index + 1)
            .expect("writing to string cannot fail");
    }
}
