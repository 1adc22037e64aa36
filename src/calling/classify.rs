//! Per-hit classification.
//!
//! Each predicate looks at one [`AlignmentHit`] in isolation, so hits can be
//! classified without running an aligner.

use crate::core::hit::{AlignmentHit, ClassifiedHit};

/// The hit lies on the opposite strand of the contig.
#[must_use]
pub fn is_reverse_complement(hit: &AlignmentHit) -> bool {
    hit.subject_start > hit.subject_end
}

/// The hit is an exact, ungapped, full-length match to its query.
///
/// Percent identity is compared for exact equality with 100, as reported by
/// the aligner.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_correct(hit: &AlignmentHit) -> bool {
    hit.mismatches == 0
        && hit.percent_identity == 100.0
        && hit.query_length == hit.alignment_length
        && hit.gaps == 0
}

/// The hit is short because it runs into an end of its contig.
///
/// Only alignments shorter than the query can be truncated.
#[must_use]
pub fn is_contig_truncation(hit: &AlignmentHit) -> bool {
    if hit.query_length <= hit.alignment_length {
        return false;
    }

    if is_reverse_complement(hit) {
        hit.subject_start == hit.subject_length || hit.subject_end == 1
    } else {
        hit.subject_length == hit.subject_end || hit.subject_start == 1
    }
}

/// Derive all flags for a hit.
#[must_use]
pub fn classify(hit: AlignmentHit) -> ClassifiedHit {
    ClassifiedHit {
        reverse_complement: is_reverse_complement(&hit),
        correct: is_correct(&hit),
        is_contig_truncation: is_contig_truncation(&hit),
        hit,
    }
}
