//! Render the three generated files from extracted assertion records.
//!
//! This module defines [`Emitter`] and wires together the focused submodules
//! that implement record → Rust emission. The heavy lifting lives in those
//! submodules; `mod.rs` holds the shared state and the common render step.
//!
//! ## Notes
//!
//! - Every output is built as a `proc_macro2` token stream with `quote!`,
//!   parsed back into a `syn` syntax tree, and formatted via `prettyplease`.
//!   An output that fails that round trip is never written to disk.
//! - Emission is codegen-only: it does not read or write files.
//!
//! ## See also
//!
//! - [`forward`]: the `Assertions`/`Requirements` wrapper types
//! - [`require`]: the fail-fast module
//! - [`docs`]: doc-comment rewriting shared by both

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod docs;
mod forward;
mod require;

use proc_macro2::TokenStream;
use thiserror::Error;

use crate::extract::{AssertionFn, ExtractOptions};
use crate::version::ASSERTGEN_VERSION;

/// Error during emission.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("syn parse error: {0}")]
    SynParse(String),

    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// One of the three generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// `assert/forward.rs` — the `Assertions` wrapper type.
    AssertForward,
    /// `require/mod.rs` — the fail-fast wrapper module.
    Require,
    /// `require/forward.rs` — the `Requirements` wrapper type.
    RequireForward,
}

impl Target {
    /// All targets, in the order they are written.
    pub const ALL: [Target; 3] = [Target::AssertForward, Target::Require, Target::RequireForward];

    /// Output path relative to the directory holding the `assert` and
    /// `require` modules.
    pub fn relative_path(self) -> &'static str {
        match self {
            Target::AssertForward => "assert/forward.rs",
            Target::Require => "require/mod.rs",
            Target::RequireForward => "require/forward.rs",
        }
    }
}

/// Renders generated files from the extracted records.
///
/// Borrows the records and options; rendering is deterministic for a given
/// input, so callers may emit the same target repeatedly.
pub struct Emitter<'a> {
    assertions: &'a [AssertionFn],
    options: &'a ExtractOptions,
}

impl<'a> Emitter<'a> {
    pub fn new(assertions: &'a [AssertionFn], options: &'a ExtractOptions) -> Self {
        Self { assertions, options }
    }

    /// Render a single target to formatted Rust source.
    pub fn emit(&self, target: Target) -> Result<String, EmitError> {
        match target {
            Target::AssertForward => self.emit_assert_forward(),
            Target::Require => self.emit_require_module(),
            Target::RequireForward => self.emit_require_forward(),
        }
    }

    /// The test-context type identifier.
    ///
    /// The name comes from the CLI, so it is validated here rather than
    /// trusted to be a legal identifier.
    fn context_ident(&self) -> Result<syn::Ident, EmitError> {
        syn::parse_str(&self.options.context_type).map_err(|_| {
            EmitError::Unsupported(format!(
                "`{}` is not a valid context type name",
                self.options.context_type
            ))
        })
    }

    /// Shared render step: parse the tokens back into a file, format with
    /// `prettyplease`, and prepend the generated-file header.
    fn render(&self, tokens: TokenStream) -> Result<String, EmitError> {
        let tree: syn::File =
            syn::parse2(tokens).map_err(|e| EmitError::SynParse(e.to_string()))?;
        let formatted = prettyplease::unparse(&tree);
        Ok(format!(
            "// Generated by assertgen v{}. Do not edit by hand.\n// Regenerate with `assertgen generate`.\n\n{}",
            ASSERTGEN_VERSION, formatted
        ))
    }
}
