#![forbid(unsafe_code)]
//! Assertion wrapper generator
//!
//! `assertgen` reads a hand-written module of test-assertion functions,
//! introspects the exported signatures and doc comments with `syn`, and
//! regenerates three derivative files:
//!
//! - `assert/forward.rs` — the `Assertions` type, forwarding methods over
//!   the assertion functions so the test context is stored once,
//! - `require/mod.rs` — fail-fast wrappers that abort the running test when
//!   an assertion returns `false`,
//! - `require/forward.rs` — the `Requirements` type, forwarding methods over
//!   the fail-fast wrappers.
//!
//! The pipeline is a single pass: [`extract`] builds a flat record per
//! selected function, [`emit`] renders each output through `quote!`,
//! re-parses it with `syn`, and formats it with `prettyplease`, and
//! [`output`] writes the files (or diffs them in check mode).
//!
//! ## Panic Policy
//!
//! Production code returns `Result` and propagates with `?`. The `cli` and
//! `emit` modules enforce `#![deny(clippy::unwrap_used)]`. `.unwrap()` and
//! `.expect()` are acceptable in test code.

pub mod cli;
pub mod emit;
pub mod extract;
pub mod output;
pub mod version;

pub use emit::{EmitError, Emitter, Target};
pub use extract::{AssertionFn, ExtractError, ExtractOptions, Param, extract_assertions};
pub use output::{
    CheckReport, FileStatus, GeneratedFile, OutputPlan, check_outputs, plan_outputs, write_outputs,
};
