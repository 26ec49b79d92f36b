//! Tests for the build command.

use super::*;
use crate::exit_codes;
use crate::fs::is_executable;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CASE_YAML: &str = r#"
Solver:
  SolverName: simpleFoam
Parallel: true
Cores: 4
"#;

struct Fixture {
    _temp: TempDir,
    templates: PathBuf,
    case: PathBuf,
    config: PathBuf,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("templates");
    let case = temp.path().join("case");
    let config = temp.path().join("case.yaml");

    fs::create_dir_all(templates.join("system")).unwrap();
    fs::write(
        templates.join("Allrun"),
        "#!/bin/bash\n%{%(Parallel%)\n%:True\nmpiexec -np %(Cores%) %(Solver/SolverName%) -parallel\n%:False\n%(Solver/SolverName%)\n%}\n",
    )
    .unwrap();
    fs::write(
        templates.join("system").join("controlDict"),
        "application %(Solver.SolverName%);\n",
    )
    .unwrap();
    fs::write(&config, CASE_YAML).unwrap();

    Fixture {
        _temp: temp,
        templates,
        case,
        config,
    }
}

fn build(f: &Fixture) -> Result<()> {
    cmd_build(
        BuildArgs {
            template_dir: f.templates.clone(),
            case_dir: f.case.clone(),
            config: f.config.clone(),
        },
        &Settings::default(),
    )
}

#[test]
fn test_build_renders_tree() {
    let f = fixture();
    build(&f).unwrap();

    assert_eq!(
        fs::read_to_string(f.case.join("Allrun")).unwrap(),
        "#!/bin/bash\nmpiexec -np 4 simpleFoam -parallel\n"
    );
    assert_eq!(
        fs::read_to_string(f.case.join("system").join("controlDict")).unwrap(),
        "application simpleFoam;\n"
    );
}

#[cfg(unix)]
#[test]
fn test_build_marks_scripts_executable() {
    use std::os::unix::fs::PermissionsExt;

    let f = fixture();
    let helper = f.templates.join("Allclean");
    fs::write(&helper, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&helper, fs::Permissions::from_mode(0o755)).unwrap();

    build(&f).unwrap();

    assert!(is_executable(&f.case.join("Allrun")));
    assert!(is_executable(&f.case.join("Allclean")));
    assert!(!is_executable(&f.case.join("system").join("controlDict")));
}

#[test]
fn test_build_failure_writes_nothing() {
    let f = fixture();
    fs::write(f.templates.join("zzz_broken"), "%(NotInTheTree%)\n").unwrap();

    let err = build(&f).unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::RESOLUTION_FAILURE);
    assert!(err.to_string().contains("zzz_broken"));
    assert!(!f.case.join("Allrun").exists());
    assert!(!f.case.join("system").exists());
}

#[test]
fn test_build_parse_failure_has_location() {
    let f = fixture();
    fs::write(f.templates.join("bad"), "line\n%}\n").unwrap();

    let err = build(&f).unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::PARSE_FAILURE);
    assert!(err.to_string().contains(":2:1:"), "got: {}", err);
}

#[test]
fn test_build_missing_template_dir() {
    let f = fixture();
    let err = cmd_build(
        BuildArgs {
            template_dir: f.templates.join("missing"),
            case_dir: f.case.clone(),
            config: f.config.clone(),
        },
        &Settings::default(),
    )
    .unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn test_build_skips_case_dir_inside_templates() {
    let f = fixture();
    let inner_case = f.templates.join("out");
    fs::create_dir_all(&inner_case).unwrap();
    fs::write(inner_case.join("stale"), "%(Missing%)\n").unwrap();

    let files = collect_templates(&f.templates, Some(&inner_case)).unwrap();
    assert!(!files.iter().any(|p| p.starts_with("out")));
}

#[test]
fn test_collect_templates_sorted_relative() {
    let f = fixture();
    let files = collect_templates(&f.templates, None).unwrap();
    assert_eq!(
        files,
        vec![
            PathBuf::from("Allrun"),
            Path::new("system").join("controlDict"),
        ]
    );
}

#[test]
fn test_render_all_flags_configured_outputs() {
    let f = fixture();
    let files = collect_templates(&f.templates, None).unwrap();
    let tree = ConfigTree::load(&f.config).unwrap();

    let planned = render_all(&f.templates, &files, &Settings::default(), &tree).unwrap();

    assert!(planned[0].executable);
    assert!(!planned[1].executable);
}
