//! Renders the shipped sample templates against the sample case.

use crate::config::Settings;
use crate::runner::{LogNaming, Step};
use crate::template::Template;
use crate::tree::ConfigTree;

const ALLRUN: &str = include_str!("../templates/default/Allrun");
const CONTROL_DICT: &str = include_str!("../templates/default/system/controlDict");
const CASE: &str = include_str!("../templates/case.yaml");

fn render(template: &str, case_yaml: &str) -> String {
    let tree = ConfigTree::from_yaml(case_yaml).unwrap();
    Template::parse_with(template, &Settings::default().syntax)
        .unwrap()
        .render(&tree)
        .unwrap()
}

fn commands(script: &str) -> Vec<&str> {
    script
        .lines()
        .filter_map(|line| line.strip_prefix("runCommand "))
        .collect()
}

#[test]
fn parallel_allrun() {
    let script = render(ALLRUN, CASE);

    assert!(script.starts_with("#!/bin/bash\n"));
    assert!(script.contains("cd \"${0%/*}\" || exit 1\n"));
    assert_eq!(
        commands(&script),
        vec![
            "createPatch -overwrite",
            "surfaceTransformPoints -scale \"(0.001 0.001 0.001)\" constant/triSurface/pipe.stl constant/triSurface/pipeScaled.stl",
            "topoSet -dict system/topoSetDict.heater",
            "topoSet -dict system/topoSetDict.porousPlug",
            "setFields",
            "createBaffles -overwrite -dict system/createBafflesDict.screen",
            "changeDictionary",
            "potentialFoam -initialiseUBCs -writep -writePhi",
            "decomposePar -force",
            "mpiexec -np 4 simpleFoam -parallel",
        ]
    );
    assert!(script.contains("# Baffle screen on screenFaces\n"));
    assert!(!script.contains("%("));
    assert!(!script.contains("\n\n\n"));
}

#[test]
fn serial_allrun_without_optional_steps() {
    let case = CASE
        .replace("Parallel: true", "Parallel: false")
        .replace("PotentialFoam: true", "PotentialFoam: false")
        .replace("InitialisationZonesPresent: true", "");
    let script = render(ALLRUN, &case);

    let steps = commands(&script);
    assert_eq!(steps.last(), Some(&"simpleFoam"));
    assert!(!steps.contains(&"decomposePar -force"));
    assert!(!steps.contains(&"setFields"));
    assert!(!steps.iter().any(|s| s.starts_with("potentialFoam")));
}

#[test]
fn rendered_steps_log_under_solver_name() {
    let script = render(ALLRUN, CASE);
    let naming = LogNaming::default();

    let logs: Vec<String> = commands(&script)
        .into_iter()
        .map(|line| {
            let step = Step::parse(line).unwrap();
            naming.file_name(&naming.identity(step.argv()))
        })
        .collect();

    assert_eq!(logs.first().map(String::as_str), Some("log.createPatch"));
    assert_eq!(logs.last().map(String::as_str), Some("log.simpleFoam"));
}

#[test]
fn control_dict_lists_monitors() {
    let dict = render(CONTROL_DICT, CASE);

    assert!(dict.contains("application     simpleFoam;\n"));
    assert!(dict.contains("endTime         2000;\n"));
    assert!(dict.contains("    outletProbe\n    {\n"));
    assert!(dict.contains("fields          (p U);\n"));
    assert!(dict.contains("probeLocations  ((0.5 0 0));\n"));
}
