//! Pairwise aligner adapters.
//!
//! The aligner is a black box: given a locus query file and a genome subject
//! file it returns zero or more [`AlignmentHit`]s. [`blast::Blastn`] runs NCBI
//! `blastn`; tests substitute canned hits through the [`Aligner`] trait.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::hit::AlignmentHit;
use crate::parsing::ParseError;

pub mod blast;

pub use blast::Blastn;

#[derive(Error, Debug)]
pub enum AlignerError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Unreadable aligner output: {0}")]
    Output(#[from] ParseError),
}

/// Aligns a locus query file against a genome subject file
pub trait Aligner: Sync {
    /// All hits of `query` against `subject`
    ///
    /// # Errors
    ///
    /// Returns an `AlignerError` if the aligner cannot be run, fails, or
    /// produces output that cannot be parsed.
    fn align(&self, query: &Path, subject: &Path) -> Result<Vec<AlignmentHit>, AlignerError>;
}
