//! CLI module for assertgen.
//!
//! ## Commands
//!
//! - `generate` - Parse the assertion source and write the three generated files
//! - `check` - Verify the generated files are up to date without writing
//! - `emit` - Print a single generated file to stdout
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::emit::Target;
use crate::version::ASSERTGEN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Regenerate assertion wrapper modules from a hand-written source file
#[derive(Parser, Debug)]
#[command(name = "assertgen")]
#[command(version = ASSERTGEN_VERSION)]
#[command(about = "Regenerate assertion wrapper modules", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse the assertion source and write the three generated files
    Generate {
        /// Hand-written assertion source file
        #[arg(long, value_name = "FILE", default_value = "src/assert/assertions.rs")]
        source: PathBuf,
        /// Directory holding the assert/ and require/ modules
        /// (default: the source file's grandparent)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Name of the test-context type threaded through assertions
        #[arg(long, value_name = "NAME", default_value = "TestContext")]
        context_type: String,
    },

    /// Verify the generated files are up to date without writing
    Check {
        /// Hand-written assertion source file
        #[arg(long, value_name = "FILE", default_value = "src/assert/assertions.rs")]
        source: PathBuf,
        /// Directory holding the assert/ and require/ modules
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Name of the test-context type threaded through assertions
        #[arg(long, value_name = "NAME", default_value = "TestContext")]
        context_type: String,
    },

    /// Print a single generated file to stdout (debug)
    Emit {
        /// Hand-written assertion source file
        #[arg(long, value_name = "FILE", default_value = "src/assert/assertions.rs")]
        source: PathBuf,
        /// Which generated file to print
        #[arg(long, value_enum, default_value = "assert-forward")]
        target: EmitTarget,
        /// Name of the test-context type threaded through assertions
        #[arg(long, value_name = "NAME", default_value = "TestContext")]
        context_type: String,
    },
}

/// CLI spelling of [`Target`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitTarget {
    AssertForward,
    Require,
    RequireForward,
}

impl From<EmitTarget> for Target {
    fn from(value: EmitTarget) -> Target {
        match value {
            EmitTarget::AssertForward => Target::AssertForward,
            EmitTarget::Require => Target::Require,
            EmitTarget::RequireForward => Target::RequireForward,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            source,
            out_dir,
            context_type,
        } => commands::generate(&source, out_dir.as_deref(), &context_type),
        Command::Check {
            source,
            out_dir,
            context_type,
        } => commands::check(&source, out_dir.as_deref(), &context_type),
        Command::Emit {
            source,
            target,
            context_type,
        } => commands::emit(&source, target.into(), &context_type),
    }
}

// ============================================================================
// Tests
// ============================================================================
