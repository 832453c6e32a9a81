//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::emit::{Emitter, Target};
use crate::extract::{ExtractOptions, extract_assertions};
use crate::output::{FileStatus, OutputPlan, check_outputs, plan_outputs, write_outputs};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (10 MB)
///
/// Assertion modules are hand-written; anything larger is almost certainly
/// the wrong file and would only waste memory during parsing.
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// `generate`: parse, render, and write the three files.
pub fn generate(source: &Path, out_dir: Option<&Path>, context_type: &str) -> CliResult<ExitCode> {
    let plan = build_plan(source, out_dir, context_type)?;
    write_outputs(&plan)
        .map_err(|e| CliError::failure(format!("Error writing generated files: {}", e)))?;
    for file in &plan.files {
        tracing::info!(path = %file.path.display(), "wrote generated file");
    }
    Ok(ExitCode::SUCCESS)
}

/// `check`: render and compare against disk; fail listing stale files.
pub fn check(source: &Path, out_dir: Option<&Path>, context_type: &str) -> CliResult<ExitCode> {
    let plan = build_plan(source, out_dir, context_type)?;
    let report = check_outputs(&plan)
        .map_err(|e| CliError::failure(format!("Error reading generated files: {}", e)))?;

    if report.is_clean() {
        tracing::info!("generated files are up to date");
        return Ok(ExitCode::SUCCESS);
    }

    let mut message = String::new();
    for (path, status) in &report.entries {
        match status {
            FileStatus::Stale => {
                let _ = writeln!(message, "stale: {}", path.display());
            }
            FileStatus::Missing => {
                let _ = writeln!(message, "missing: {}", path.display());
            }
            FileStatus::UpToDate => {}
        }
    }
    message.push_str("Run `assertgen generate` to refresh.");
    Err(CliError::failure(message))
}

/// `emit`: print a single rendered file to stdout.
pub fn emit(source: &Path, target: Target, context_type: &str) -> CliResult<ExitCode> {
    let (assertions, options) = extract_from(source, context_type)?;
    let emitter = Emitter::new(&assertions, &options);
    let rendered = emitter
        .emit(target)
        .map_err(|e| CliError::failure(format!("Code generation error: {}", e)))?;
    print!("{}", rendered);
    Ok(ExitCode::SUCCESS)
}

/// Shared setup: read, extract, render all targets against the output
/// directory.
fn build_plan(
    source: &Path,
    out_dir: Option<&Path>,
    context_type: &str,
) -> CliResult<OutputPlan> {
    let (assertions, options) = extract_from(source, context_type)?;
    let emitter = Emitter::new(&assertions, &options);
    let out = out_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_out_dir(source));
    plan_outputs(&out, &emitter)
        .map_err(|e| CliError::failure(format!("Code generation error: {}", e)))
}

fn extract_from(
    source: &Path,
    context_type: &str,
) -> CliResult<(Vec<crate::extract::AssertionFn>, ExtractOptions)> {
    let source_text = read_source(source)?;
    let options = ExtractOptions {
        context_type: context_type.to_string(),
        ..ExtractOptions::default()
    };
    let assertions = extract_assertions(&source_text, &options)
        .map_err(|e| CliError::failure(format!("{}: {}", source.display(), e)))?;
    if assertions.is_empty() {
        return Err(CliError::failure(format!(
            "No assertion functions found in '{}' (looked for pub fns taking `{}` first)",
            source.display(),
            context_type
        )));
    }
    tracing::debug!(count = assertions.len(), "extracted assertion functions");
    Ok((assertions, options))
}

/// Read the assertion source, rejecting oversized files up front.
fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Error reading '{}': {}", path.display(), e)))?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {})",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }
    fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading '{}': {}", path.display(), e)))
}

/// The default output directory is the one holding the assert module, i.e.
/// the source file's grandparent: `src/assert/assertions.rs` generates into
/// `src/assert/` and `src/require/`.
fn default_out_dir(source: &Path) -> PathBuf {
    source
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
