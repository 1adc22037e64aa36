//! Recovery of full-length alleles from short hits.
//!
//! The aligner can stop an alignment a few bases early when the locus ends
//! with a mismatch. When the hit is not at a contig edge, the missing bases
//! are read straight from the genome: the window covers the whole locus as
//! projected from the hit's query start, and is reverse complemented for
//! reverse-strand hits.

use std::ops::Range;

use thiserror::Error;

use crate::core::call::HitCall;
use crate::core::contig::GenomeContigs;
use crate::core::sequence::{reverse_complement, ungapped};

/// Hits missing more than this many bases are not extended by default
pub const DEFAULT_EXTENSION_THRESHOLD: u64 = 10;

/// Why a short hit could not be extended
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    #[error("{missing} bases missing, more than the threshold of {threshold}")]
    BeyondThreshold { missing: u64, threshold: u64 },

    #[error("aligned sequence is longer than the locus")]
    LongerThanQuery,

    #[error("genome sequence is not available")]
    NoGenome,

    #[error("contig '{0}' not found in genome")]
    MissingContig(String),

    #[error("locus window runs past the end of contig '{0}'")]
    PastContigEnd(String),
}

/// Outcome of an extension attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    /// Sequence covering the whole locus
    FullLength(String),
    Unresolved(Unresolved),
}

/// Extends short hits by reading flanking bases from the genome
#[derive(Debug, Clone, Copy)]
pub struct HitExtender {
    threshold: u64,
}

impl Default for HitExtender {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION_THRESHOLD)
    }
}

impl HitExtender {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Recover the full-length sequence of `hit`.
    ///
    /// A hit that already covers the locus is returned as aligned. The
    /// recovered window is only checked for length, not compared to the query.
    pub fn extend(&self, hit: &HitCall, contigs: Option<&GenomeContigs>) -> Extension {
        let aligned = ungapped(&hit.subject_aln).len() as u64;

        let Some(missing) = hit.query_length.checked_sub(aligned) else {
            return Extension::Unresolved(Unresolved::LongerThanQuery);
        };

        if missing == 0 {
            return Extension::FullLength(hit.subject_aln.clone());
        }

        if missing > self.threshold {
            return Extension::Unresolved(Unresolved::BeyondThreshold {
                missing,
                threshold: self.threshold,
            });
        }

        let Some(contigs) = contigs else {
            return Extension::Unresolved(Unresolved::NoGenome);
        };

        let Some(contig) = contigs.get(&hit.subject_name) else {
            return Extension::Unresolved(Unresolved::MissingContig(hit.subject_name.clone()));
        };

        let window = match locus_window(hit) {
            Some(window) if window.end <= contig.len() => window,
            _ => {
                return Extension::Unresolved(Unresolved::PastContigEnd(hit.subject_name.clone()))
            }
        };

        let bases = String::from_utf8_lossy(&contig[window]).into_owned();

        if hit.reverse_complement {
            Extension::FullLength(reverse_complement(&bases))
        } else {
            Extension::FullLength(bases)
        }
    }
}

/// 0-based, half-open contig window holding the whole locus.
///
/// Returns `None` when the window would start before the contig.
fn locus_window(hit: &HitCall) -> Option<Range<usize>> {
    let query_offset = hit.query_start.checked_sub(1)?;

    let (start, end) = if hit.reverse_complement {
        // Query position 1 sits at the high coordinate
        let end = hit.subject_start.checked_add(query_offset)?;
        (end.checked_sub(hit.query_length)?, end)
    } else {
        let start = hit.subject_start.checked_sub(1)?.checked_sub(query_offset)?;
        (start, start.checked_add(hit.query_length)?)
    };

    Some(usize::try_from(start).ok()?..usize::try_from(end).ok()?)
}
