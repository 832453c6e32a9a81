//! Write the generated files, or diff them against disk in check mode.
//!
//! An [`OutputPlan`] pairs every rendered file with its final path. Planning
//! is separate from writing so the `check` command can render once and
//! compare without touching the tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::emit::{EmitError, Emitter, Target};

/// One rendered file and where it goes.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// All three rendered files, in write order.
#[derive(Debug, Clone)]
pub struct OutputPlan {
    pub files: Vec<GeneratedFile>,
}

/// Render every target against `out_dir`, the directory that holds the
/// `assert` and `require` modules.
pub fn plan_outputs(out_dir: &Path, emitter: &Emitter<'_>) -> Result<OutputPlan, EmitError> {
    let mut files = Vec::new();
    for target in Target::ALL {
        files.push(GeneratedFile {
            path: out_dir.join(target.relative_path()),
            content: emitter.emit(target)?,
        });
    }
    Ok(OutputPlan { files })
}

/// Write every planned file, creating parent directories as needed.
pub fn write_outputs(plan: &OutputPlan) -> io::Result<()> {
    for file in &plan.files {
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file.path, &file.content)?;
    }
    Ok(())
}

/// Freshness of one on-disk file relative to the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    UpToDate,
    Stale,
    Missing,
}

/// Per-file freshness results from [`check_outputs`].
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub entries: Vec<(PathBuf, FileStatus)>,
}

impl CheckReport {
    /// True when every generated file on disk matches the plan.
    pub fn is_clean(&self) -> bool {
        self.entries
            .iter()
            .all(|(_, status)| *status == FileStatus::UpToDate)
    }
}

/// Compare the plan against disk without writing anything.
pub fn check_outputs(plan: &OutputPlan) -> io::Result<CheckReport> {
    let mut entries = Vec::new();
    for file in &plan.files {
        let status = match fs::read_to_string(&file.path) {
            Ok(existing) if existing == file.content => FileStatus::UpToDate,
            Ok(_) => FileStatus::Stale,
            Err(e) if e.kind() == io::ErrorKind::NotFound => FileStatus::Missing,
            Err(e) => return Err(e),
        };
        entries.push((file.path.clone(), status));
    }
    Ok(CheckReport { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_in(dir: &Path) -> OutputPlan {
        OutputPlan {
            files: vec![
                GeneratedFile {
                    path: dir.join("assert/forward.rs"),
                    content: "// one\n".to_string(),
                },
                GeneratedFile {
                    path: dir.join("require/mod.rs"),
                    content: "// two\n".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_write_creates_directories_and_files() {
        let temp_dir = std::env::temp_dir().join("assertgen_test_write");
        let _ = fs::remove_dir_all(&temp_dir); // Clean up any previous test

        let plan = plan_in(&temp_dir);
        write_outputs(&plan).unwrap();

        let written = fs::read_to_string(temp_dir.join("assert/forward.rs")).unwrap();
        assert_eq!(written, "// one\n");
        assert!(temp_dir.join("require/mod.rs").exists());

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_check_reports_missing_stale_and_up_to_date() {
        let temp_dir = std::env::temp_dir().join("assertgen_test_check");
        let _ = fs::remove_dir_all(&temp_dir);

        let plan = plan_in(&temp_dir);

        // Nothing written yet: everything missing.
        let report = check_outputs(&plan).unwrap();
        assert!(!report.is_clean());
        assert!(
            report
                .entries
                .iter()
                .all(|(_, status)| *status == FileStatus::Missing)
        );

        // Freshly written: clean.
        write_outputs(&plan).unwrap();
        let report = check_outputs(&plan).unwrap();
        assert!(report.is_clean());

        // Edit one file by hand: stale.
        fs::write(temp_dir.join("assert/forward.rs"), "// edited\n").unwrap();
        let report = check_outputs(&plan).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.entries[0].1, FileStatus::Stale);
        assert_eq!(report.entries[1].1, FileStatus::UpToDate);

        let _ = fs::remove_dir_all(&temp_dir);
    }
}
