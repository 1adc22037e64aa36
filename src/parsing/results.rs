//! Per-genome JSON result store.
//!
//! Each genome's calls live in `<genome>.json`, an object mapping locus name to
//! call. `call` writes these files and `update` rewrites them in place.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::call::GenomeCallSet;

/// Extension of result files
pub const RESULT_EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("Failed to access result file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid result file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read the calls of one genome
///
/// # Errors
///
/// Returns `ResultsError::Io` if the file cannot be read or `ResultsError::Json`
/// if it is not a valid call set.
pub fn read_call_set(path: &Path) -> Result<GenomeCallSet, ResultsError> {
    let content = std::fs::read_to_string(path).map_err(|source| ResultsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ResultsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the calls of one genome as indented JSON
///
/// # Errors
///
/// Returns an I/O error if serialization or writing fails.
pub fn write_call_set_to<W: Write>(mut writer: W, calls: &GenomeCallSet) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, calls)?;
    writeln!(writer)
}

/// Write the calls of one genome to `path`, replacing any previous content
///
/// # Errors
///
/// Returns `ResultsError::Io` if the file cannot be written.
pub fn write_call_set(path: &Path, calls: &GenomeCallSet) -> Result<(), ResultsError> {
    let io_error = |source| ResultsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut buffer = Vec::new();
    write_call_set_to(&mut buffer, calls).map_err(io_error)?;
    std::fs::write(path, buffer).map_err(io_error)
}

/// Result files in `dir`, sorted by path
///
/// # Errors
///
/// Returns `ResultsError::Io` if the directory cannot be read.
pub fn result_files(dir: &Path) -> Result<Vec<PathBuf>, ResultsError> {
    let io_error = |source| ResultsError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == RESULT_EXTENSION) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Genome name of a result file (its stem)
pub fn genome_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}
