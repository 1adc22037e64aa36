//! Parsers for the files exchanged with the outside world.
//!
//! This module provides parsers for:
//!
//! - **Aligner output**: Tab-delimited BLAST rows with a fixed column set
//! - **Genome FASTA files**: Contig sequences keyed by identifier, optionally gzip/bgzip compressed
//! - **Result files**: One JSON object per genome mapping locus name to call
//!
//! ## Aligner columns
//!
//! | Column | Field |
//! |--------|-------|
//! | 1  | query id |
//! | 2  | subject id |
//! | 3  | percent identity |
//! | 4  | alignment length |
//! | 5-6  | query start, end |
//! | 7-8  | subject start, end |
//! | 9  | query length |
//! | 10 | subject length |
//! | 11 | bit score |
//! | 12 | gaps |
//! | 13 | aligned subject sequence |
//! | 14 | aligned query sequence |
//! | 15 | mismatches |

use thiserror::Error;

pub mod blast;
pub mod fasta;
pub mod results;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}
