//! # epl
//!
//! epl is an interpreter for EPL, a small line-oriented scripting language
//! for teaching. Every line is classified by its leading keyword and its
//! expression fragments are evaluated against one global set of variables.
//! Scripts can `write` values, bind them with `is`, `read` input and `use`
//! other scripts or installed library modules.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{fs, path::Path};

use tracing::info;

use crate::{
    config::Config,
    interpreter::{console::StdConsole, evaluator::core::Interpreter},
};

/// Defines the structure of parsed expression fragments.
///
/// This module declares the `Expr` enum and the operator types that the
/// parser builds and the evaluator walks.
pub mod ast;
/// Locations of the interpreter's files on disk.
///
/// Resolves the interpreter home and derives the library directory, the
/// verbosity flag, the log files and the module registry from it.
pub mod config;
/// Provides unified error types for evaluation and package management.
///
/// This module defines all errors that can be raised while running EPL code
/// or managing modules, with the file, line and language-level error kind
/// needed to report them.
///
/// # Responsibilities
/// - Defines error enums for every failure mode.
/// - Attaches the file and line being executed.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the execution of EPL source.
///
/// This module ties together line classification, lexing, parsing,
/// evaluation, values and module loading to provide a complete runtime.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides entry points for executing lines and whole sources.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// A `tracing` subscriber driven by the persisted verbosity flag.
pub mod logging;
/// Installing and removing library modules.
///
/// Defines the `PackageManager` interface and its git-backed implementation,
/// package specifications and the installed module registry.
pub mod package;
/// The interactive prompt.
pub mod repl;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely narrow integer types without silent data loss.
/// - Compute powers of ten for decimal scaling.
pub mod util;

/// Runs an EPL script file to completion.
///
/// The file becomes the special `file` reported in errors. Bareword `use`
/// targets resolve under the configured library directory.
///
/// # Errors
/// Returns an error if the file cannot be read or if any line fails; no
/// line after the failing one is executed.
///
/// # Examples
/// ```
/// use std::fs;
///
/// use epl::{config::Config, run_script};
///
/// let home = tempfile::tempdir().unwrap();
/// let script = home.path().join("main.epl");
///
/// fs::write(&script, "x is 2 + 2\n! x is now 4").unwrap();
/// assert!(run_script(&script, &Config::new(home.path())).is_ok());
///
/// fs::write(&script, "y is x + 1").unwrap(); // 'x' is not defined
/// let error = run_script(&script, &Config::new(home.path())).unwrap_err();
/// assert!(error.to_string().contains("line 1: SyntaxError"));
/// ```
pub fn run_script(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let Ok(source) = fs::read_to_string(path) else {
        return Err(format!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                           path.display()).into());
    };

    info!("Running {}", path.display());
    let mut interpreter = Interpreter::new(Box::new(StdConsole), config.libraries_dir());
    interpreter.set_file(path.display().to_string());
    interpreter.run_source(&source)?;
    Ok(())
}

/// Starts an interactive session on the standard streams.
///
/// # Errors
/// Returns the error that ended the session, if any.
pub fn run_repl(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut interpreter = Interpreter::new(Box::new(StdConsole), config.libraries_dir());
    repl::run(&mut interpreter)?;
    Ok(())
}
