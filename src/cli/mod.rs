//! CLI argument parsing for allrun.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Allrun: render case scripts from directive templates and run their steps
/// with per-step logs.
///
/// Templates use `%(path%)` for substitution and `%{%(path%) ... %}` blocks
/// for conditionals and loops over a YAML or JSON configuration tree.
#[derive(Parser, Debug)]
#[command(name = "allrun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (default: ./allrun.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Diagnostic log level or filter directive (overridden by RUST_LOG).
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Increase diagnostic verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for allrun.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one template against a configuration tree.
    ///
    /// Writes to stdout, or atomically to `--output`.
    Render(RenderArgs),

    /// Render a whole template directory into a case directory.
    ///
    /// Every file is rendered before anything is written, so a failure
    /// leaves the case directory untouched.
    Build(BuildArgs),

    /// Parse a template and report its directives without rendering.
    Check(CheckArgs),

    /// Run one command with its output logged to `log.<name>`.
    ///
    /// Exits with the command's own status.
    Exec(ExecArgs),

    /// Run a steps file, one command per line, stopping at the first failure.
    Run(RunArgs),
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Template file to render.
    pub template: PathBuf,

    /// Configuration tree (YAML, or JSON with a .json extension).
    #[arg(short, long, value_name = "TREE")]
    pub config: PathBuf,

    /// Output file. Prints to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `build` command.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Directory of templates.
    pub template_dir: PathBuf,

    /// Case directory to write into (created if missing).
    pub case_dir: PathBuf,

    /// Configuration tree (YAML, or JSON with a .json extension).
    #[arg(short, long, value_name = "TREE")]
    pub config: PathBuf,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Template file to check.
    pub template: PathBuf,
}

/// Arguments for the `exec` command.
#[derive(Parser, Debug)]
pub struct ExecArgs {
    /// Case directory the command runs in and logs to.
    #[arg(short = 'C', long, default_value = ".", value_name = "DIR")]
    pub case_dir: PathBuf,

    /// Command and its arguments.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Steps file: one command per line, `#` comments allowed.
    pub steps_file: PathBuf,

    /// Case directory the steps run in and log to.
    #[arg(short = 'C', long, default_value = ".", value_name = "DIR")]
    pub case_dir: PathBuf,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_render_to_stdout() {
        let cli = Cli::try_parse_from(["allrun", "render", "Allrun.tmpl", "--config", "case.yaml"])
            .unwrap();
        if let Command::Render(args) = cli.command {
            assert_eq!(args.template, PathBuf::from("Allrun.tmpl"));
            assert_eq!(args.config, PathBuf::from("case.yaml"));
            assert!(args.output.is_none());
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn parse_render_with_output() {
        let cli = Cli::try_parse_from([
            "allrun",
            "render",
            "Allrun.tmpl",
            "-c",
            "case.json",
            "-o",
            "case/Allrun",
        ])
        .unwrap();
        if let Command::Render(args) = cli.command {
            assert_eq!(args.output, Some(PathBuf::from("case/Allrun")));
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn parse_render_requires_config() {
        assert!(Cli::try_parse_from(["allrun", "render", "Allrun.tmpl"]).is_err());
    }

    #[test]
    fn parse_build() {
        let cli =
            Cli::try_parse_from(["allrun", "build", "templates", "case", "--config", "case.yaml"])
                .unwrap();
        if let Command::Build(args) = cli.command {
            assert_eq!(args.template_dir, PathBuf::from("templates"));
            assert_eq!(args.case_dir, PathBuf::from("case"));
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["allrun", "check", "Allrun.tmpl"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn parse_exec_keeps_hyphen_args() {
        let cli = Cli::try_parse_from([
            "allrun",
            "exec",
            "-C",
            "case",
            "--",
            "mpiexec",
            "-np",
            "4",
            "simpleFoam",
            "-parallel",
        ])
        .unwrap();
        if let Command::Exec(args) = cli.command {
            assert_eq!(args.case_dir, PathBuf::from("case"));
            assert_eq!(
                args.command,
                vec!["mpiexec", "-np", "4", "simpleFoam", "-parallel"]
            );
        } else {
            panic!("Expected Exec command");
        }
    }

    #[test]
    fn parse_exec_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["allrun", "exec", "blockMesh"]).unwrap();
        if let Command::Exec(args) = cli.command {
            assert_eq!(args.case_dir, PathBuf::from("."));
            assert_eq!(args.command, vec!["blockMesh"]);
        } else {
            panic!("Expected Exec command");
        }
    }

    #[test]
    fn parse_exec_requires_command() {
        assert!(Cli::try_parse_from(["allrun", "exec"]).is_err());
    }

    #[test]
    fn parse_run() {
        let cli = Cli::try_parse_from(["allrun", "run", "steps.txt", "-C", "case"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.steps_file, PathBuf::from("steps.txt"));
            assert_eq!(args.case_dir, PathBuf::from("case"));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "allrun",
            "check",
            "Allrun.tmpl",
            "-vv",
            "--settings",
            "custom.yaml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.settings, Some(PathBuf::from("custom.yaml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn parse_unknown_command_fails() {
        assert!(Cli::try_parse_from(["allrun", "unknown"]).is_err());
    }
}
