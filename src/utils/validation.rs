//! Input checks run before any processing starts.
//!
//! Each check returns `Some(message)` describing the problem, or `None` when
//! the input is usable. Callers gather every message and report them at once
//! through [`ValidationError::from_problems`].

use std::path::Path;

use crate::catalog::store::AlleleCatalog;
use crate::parsing::fasta::read_contigs;
use crate::parsing::results::read_call_set;

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{} input problem(s):\n  {}", .0.len(), .0.join("\n  "))]
    Invalid(Vec<String>),
}

impl ValidationError {
    /// `Ok` when `problems` is empty, otherwise one error listing them all
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Invalid` if any problem was found.
    pub fn from_problems(problems: Vec<String>) -> Result<(), Self> {
        if problems.is_empty() {
            Ok(())
        } else {
            Err(Self::Invalid(problems))
        }
    }
}

/// Check that `path` is a readable FASTA file with at least one record.
#[must_use]
pub fn validate_fasta(path: &Path) -> Option<String> {
    if !path.is_file() {
        return Some(format!("{}: not a file", path.display()));
    }
    read_contigs(path)
        .err()
        .map(|e| format!("{}: {e}", path.display()))
}

/// Check that `path` is a well-formed allele catalog.
#[must_use]
pub fn validate_catalog(path: &Path) -> Option<String> {
    AlleleCatalog::load(path).err().map(|e| e.to_string())
}

/// Check that `path` holds a valid genome result set.
#[must_use]
pub fn validate_json(path: &Path) -> Option<String> {
    read_call_set(path).err().map(|e| e.to_string())
}

/// Check that `dir` is a directory containing at least one file accepted by `wanted`.
#[must_use]
pub fn validate_directory(dir: &Path, wanted: impl Fn(&Path) -> bool) -> Option<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => return Some(format!("{}: {e}", dir.display())),
    };

    let found = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .any(|path| path.is_file() && wanted(&path));

    if found {
        None
    } else {
        Some(format!("{}: no matching input files", dir.display()))
    }
}
