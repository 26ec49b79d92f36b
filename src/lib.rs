//! Allrun: directive templates for simulation case scripts.
//!
//! The crate has two halves:
//!
//! - [`template`] renders text containing `%(path%)` substitutions and
//!   `%{ ... %}` conditional/iterating blocks against a [`tree::ConfigTree`].
//! - [`runner`] executes the steps of a rendered case script, capturing each
//!   step's output in `log.<program>` and stopping at the first failure.
//!
//! The `allrun` binary wires both to a CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod logging;
pub mod runner;
pub mod template;
pub mod tree;

#[cfg(test)]
mod sample_tests;
