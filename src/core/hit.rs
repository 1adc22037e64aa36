use serde::{Deserialize, Serialize};

/// One pairwise alignment between a locus query and a genome contig.
///
/// Coordinates are 1-based and inclusive, as reported by the aligner. For a
/// reverse-strand hit `subject_start > subject_end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentHit {
    pub query_id: String,
    pub subject_id: String,
    pub percent_identity: f64,
    pub alignment_length: u64,
    pub query_start: u64,
    pub query_end: u64,
    pub subject_start: u64,
    pub subject_end: u64,
    /// Full length of the locus query sequence
    pub query_length: u64,
    /// Full length of the subject contig
    pub subject_length: u64,
    pub bit_score: f64,
    pub gaps: u64,
    /// Aligned subject sequence, including gap characters
    pub subject_aln: String,
    /// Aligned query sequence, including gap characters
    pub query_aln: String,
    pub mismatches: u64,
}

/// An [`AlignmentHit`] with its derived flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedHit {
    pub hit: AlignmentHit,
    pub reverse_complement: bool,
    pub correct: bool,
    pub is_contig_truncation: bool,
}

#[cfg(test)]
impl AlignmentHit {
    /// A forward, exact, full-length hit of `sequence` used as a starting point in tests.
    pub fn exact(query_id: &str, subject_id: &str, sequence: &str) -> Self {
        let length = sequence.len() as u64;
        Self {
            query_id: query_id.to_string(),
            subject_id: subject_id.to_string(),
            percent_identity: 100.0,
            alignment_length: length,
            query_start: 1,
            query_end: length,
            subject_start: 1,
            subject_end: length,
            query_length: length,
            subject_length: 10_000,
            bit_score: 2.0 * length as f64,
            gaps: 0,
            subject_aln: sequence.to_string(),
            query_aln: sequence.to_string(),
            mismatches: 0,
        }
    }
}
