use std::path::Path;

use anyhow::{Context, Result};
use planar_truss::ProblemDefinition;

/// Read a JSON problem definition from `path`.
pub fn load_problem(path: &Path) -> Result<ProblemDefinition> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read input file {}", path.display()))?;
    parse_problem(&contents)
        .with_context(|| format!("invalid problem definition in {}", path.display()))
}

/// Parse a JSON problem definition.
pub fn parse_problem(contents: &str) -> Result<ProblemDefinition> {
    Ok(serde_json::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_are_optional() {
        let problem = parse_problem(
            r#"{
                "node_count": 2,
                "coordinates": [{ "x": 0.0, "y": 0.0 }, { "x": 2.0, "y": 0.0 }],
                "member_count": 1,
                "incidence": [{ "node1": 1, "node2": 2, "youngs_modulus": 7.0e10, "area": 1.0e-4 }],
                "load_count": 1,
                "forces": [0.0, 0.0, 500.0, 0.0],
                "restraint_count": 3,
                "restraints": [0, 1, 3]
            }"#,
        )
        .expect("valid problem");
        assert_eq!(problem.settings, planar_truss::SolverSettings::default());
        assert_eq!(problem.incidence[0].node2, 2);
    }

    #[test]
    fn negative_restraints_are_rejected_by_the_parser() {
        let error = parse_problem(
            r#"{
                "node_count": 1, "coordinates": [[0, 0]],
                "member_count": 0, "incidence": [],
                "load_count": 0, "forces": [0, 0],
                "restraint_count": 1, "restraints": [-1]
            }"#,
        )
        .expect_err("negative index rejected");
        assert!(error.to_string().contains("invalid value"));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = load_problem(Path::new("does-not-exist.json")).expect_err("missing file");
        assert!(error.to_string().contains("does-not-exist.json"));
    }
}
