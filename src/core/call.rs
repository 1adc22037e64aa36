use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::core::hit::ClassifiedHit;
use crate::core::sequence::marker_from_query_id;

/// Table cell for a locus without any alignment
pub const NO_HIT_CELL: &str = "0";
/// Table cell for a hit running off the end of its contig
pub const CONTIG_TRUNCATION_CELL: &str = "-1";
/// Table cell for a hit without a catalog-backed allele
pub const UNRESOLVED_CELL: &str = "?";

/// Helper function to convert u64 count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Result of calling one locus against one genome
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "LocusCallRecord")]
pub enum LocusCall {
    /// The aligner reported nothing for this locus
    NoHit,
    /// The best alignment found for this locus
    Hit(HitCall),
}

/// Where a call sits in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    NoHit,
    /// Carries a catalog-backed allele identifier
    Resolved,
    /// Short because the contig ends; cannot be recovered
    ContigTruncated,
    /// Shorter than the locus but not at a contig edge
    Short,
    /// Full length but not matching any query exactly
    Novel,
}

/// The selected alignment for a locus, plus its allele designation
#[derive(Debug, Clone, PartialEq)]
pub struct HitCall {
    pub query_name: String,
    pub subject_name: String,
    pub percent_identity: f64,
    /// Fraction of the locus covered by the alignment (1 = full length)
    pub percent_length: f64,
    pub alignment_length: u64,
    pub query_length: u64,
    pub subject_length: u64,
    pub mismatches: u64,
    pub gaps: u64,
    pub query_start: u64,
    pub query_end: u64,
    pub subject_start: u64,
    pub subject_end: u64,
    pub bit_score: f64,
    pub reverse_complement: bool,
    pub is_contig_truncation: bool,
    pub query_aln: String,
    pub subject_aln: String,
    /// Extension was attempted and failed
    pub partial: bool,

    /// Allele identifier; present exactly when the call is a correct marker match
    marker: Option<String>,
}

impl HitCall {
    /// Build the initial call from a selected hit.
    ///
    /// Correct hits take their marker from the query id; nothing else carries a
    /// marker until `update` resolves it against the catalog.
    pub fn from_hit(selected: ClassifiedHit) -> Self {
        let ClassifiedHit {
            hit,
            reverse_complement,
            correct,
            is_contig_truncation,
        } = selected;

        let percent_length = if hit.query_length == 0 {
            0.0
        } else {
            count_to_f64(hit.alignment_length) / count_to_f64(hit.query_length)
        };

        let marker = correct.then(|| marker_from_query_id(&hit.query_id));

        Self {
            query_name: hit.query_id,
            subject_name: hit.subject_id,
            percent_identity: hit.percent_identity,
            percent_length,
            alignment_length: hit.alignment_length,
            query_length: hit.query_length,
            subject_length: hit.subject_length,
            mismatches: hit.mismatches,
            gaps: hit.gaps,
            query_start: hit.query_start,
            query_end: hit.query_end,
            subject_start: hit.subject_start,
            subject_end: hit.subject_end,
            bit_score: hit.bit_score,
            reverse_complement,
            is_contig_truncation,
            query_aln: hit.query_aln,
            subject_aln: hit.subject_aln,
            partial: false,
            marker,
        }
    }

    /// Allele identifier, if this is a correct marker match
    pub fn marker_match(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    pub fn correct_marker_match(&self) -> bool {
        self.marker.is_some()
    }

    pub fn state(&self) -> CallState {
        if self.marker.is_some() {
            CallState::Resolved
        } else if self.is_contig_truncation {
            CallState::ContigTruncated
        } else if self.percent_length < 1.0 {
            CallState::Short
        } else {
            CallState::Novel
        }
    }

    /// Rewrite this call as an exact match to catalog allele `identifier`.
    ///
    /// The query becomes the allele itself, so `query_name` is the identifier
    /// and both aligned sequences are the resolved sequence. Contig-truncated
    /// calls are never resolved and are left untouched.
    pub fn resolve(&mut self, identifier: impl Into<String>, sequence: impl Into<String>) {
        if self.is_contig_truncation {
            return;
        }
        let identifier = identifier.into();
        let sequence = sequence.into();

        self.query_name.clone_from(&identifier);
        self.marker = Some(identifier);
        self.mismatches = 0;
        self.gaps = 0;
        self.percent_identity = 100.0;
        self.percent_length = 1.0;
        self.alignment_length = sequence.len() as u64;
        self.query_aln.clone_from(&sequence);
        self.subject_aln = sequence;
        self.partial = false;
    }
}

impl LocusCall {
    /// Initial call for a locus from the selected hit, if any
    pub fn from_selection(selected: Option<ClassifiedHit>) -> Self {
        match selected {
            Some(hit) => Self::Hit(HitCall::from_hit(hit)),
            None => Self::NoHit,
        }
    }

    pub fn blast_result(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    pub fn hit(&self) -> Option<&HitCall> {
        match self {
            Self::Hit(hit) => Some(hit),
            Self::NoHit => None,
        }
    }

    pub fn hit_mut(&mut self) -> Option<&mut HitCall> {
        match self {
            Self::Hit(hit) => Some(hit),
            Self::NoHit => None,
        }
    }

    pub fn state(&self) -> CallState {
        self.hit().map_or(CallState::NoHit, HitCall::state)
    }

    /// Cell value for this call in a tabulated allele matrix
    pub fn tabulation_cell(&self) -> &str {
        match self {
            Self::NoHit => NO_HIT_CELL,
            Self::Hit(hit) if hit.is_contig_truncation => CONTIG_TRUNCATION_CELL,
            Self::Hit(hit) => hit.marker_match().unwrap_or(UNRESOLVED_CELL),
        }
    }
}

/// All locus calls for one genome, keyed by locus name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenomeCallSet {
    pub calls: BTreeMap<String, LocusCall>,
}

impl GenomeCallSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locus: impl Into<String>, call: LocusCall) {
        self.calls.insert(locus.into(), call);
    }

    pub fn get(&self, locus: &str) -> Option<&LocusCall> {
        self.calls.get(locus)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LocusCall)> {
        self.calls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut LocusCall)> {
        self.calls.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl FromIterator<(String, LocusCall)> for GenomeCallSet {
    fn from_iter<I: IntoIterator<Item = (String, LocusCall)>>(iter: I) -> Self {
        Self {
            calls: iter.into_iter().collect(),
        }
    }
}

// === On-disk record format ===

#[derive(Error, Debug)]
pub enum CallRecordError {
    #[error("Missing field {0} in a call with BlastResult=true")]
    MissingField(&'static str),

    #[error("MarkerMatch must be set exactly when CorrectMarkerMatch is true")]
    InconsistentMarker,

    #[error("A contig-truncated call cannot carry a MarkerMatch")]
    TruncatedWithMarker,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct NoHitRecord {
    blast_result: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct HitRecord<'a> {
    blast_result: bool,
    mismatches: u64,
    query_aln: &'a str,
    subj_aln: &'a str,
    gaps: u64,
    query_name: &'a str,
    subj_name: &'a str,
    percent_identity: f64,
    percent_length: f64,
    query_length: u64,
    subject_length: u64,
    alignment_length: u64,
    subject_start_index: u64,
    subject_end_index: u64,
    query_start_index: u64,
    query_end_index: u64,
    bit_score: f64,
    reverse_complement: bool,
    is_contig_truncation: bool,
    marker_match: Option<&'a str>,
    correct_marker_match: bool,
    partial: bool,
}

impl<'a> From<&'a HitCall> for HitRecord<'a> {
    fn from(hit: &'a HitCall) -> Self {
        Self {
            blast_result: true,
            mismatches: hit.mismatches,
            query_aln: &hit.query_aln,
            subj_aln: &hit.subject_aln,
            gaps: hit.gaps,
            query_name: &hit.query_name,
            subj_name: &hit.subject_name,
            percent_identity: hit.percent_identity,
            percent_length: hit.percent_length,
            query_length: hit.query_length,
            subject_length: hit.subject_length,
            alignment_length: hit.alignment_length,
            subject_start_index: hit.subject_start,
            subject_end_index: hit.subject_end,
            query_start_index: hit.query_start,
            query_end_index: hit.query_end,
            bit_score: hit.bit_score,
            reverse_complement: hit.reverse_complement,
            is_contig_truncation: hit.is_contig_truncation,
            marker_match: hit.marker_match(),
            correct_marker_match: hit.correct_marker_match(),
            partial: hit.partial,
        }
    }
}

impl Serialize for LocusCall {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NoHit => NoHitRecord {
                blast_result: false,
            }
            .serialize(serializer),
            Self::Hit(hit) => HitRecord::from(hit).serialize(serializer),
        }
    }
}

/// Loosely typed view of a stored call; every field but `BlastResult` may be absent
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LocusCallRecord {
    blast_result: bool,
    mismatches: Option<u64>,
    query_aln: Option<String>,
    subj_aln: Option<String>,
    gaps: Option<u64>,
    query_name: Option<String>,
    subj_name: Option<String>,
    percent_identity: Option<f64>,
    percent_length: Option<f64>,
    query_length: Option<u64>,
    subject_length: Option<u64>,
    alignment_length: Option<u64>,
    subject_start_index: Option<u64>,
    subject_end_index: Option<u64>,
    query_start_index: Option<u64>,
    query_end_index: Option<u64>,
    bit_score: Option<f64>,
    reverse_complement: Option<bool>,
    is_contig_truncation: Option<bool>,
    marker_match: Option<String>,
    correct_marker_match: Option<bool>,
    partial: Option<bool>,
}

fn required<T>(value: Option<T>, name: &'static str) -> Result<T, CallRecordError> {
    value.ok_or(CallRecordError::MissingField(name))
}

impl TryFrom<LocusCallRecord> for LocusCall {
    type Error = CallRecordError;

    fn try_from(record: LocusCallRecord) -> Result<Self, Self::Error> {
        if !record.blast_result {
            return Ok(Self::NoHit);
        }

        let correct = required(record.correct_marker_match, "CorrectMarkerMatch")?;
        if correct != record.marker_match.is_some() {
            return Err(CallRecordError::InconsistentMarker);
        }

        let is_contig_truncation = required(record.is_contig_truncation, "IsContigTruncation")?;
        if is_contig_truncation && correct {
            return Err(CallRecordError::TruncatedWithMarker);
        }

        let query_length = required(record.query_length, "QueryLength")?;
        let alignment_length = required(record.alignment_length, "AlignmentLength")?;
        let percent_length = match record.percent_length {
            Some(value) => value,
            None if query_length == 0 => 0.0,
            None => count_to_f64(alignment_length) / count_to_f64(query_length),
        };

        Ok(Self::Hit(HitCall {
            query_name: required(record.query_name, "QueryName")?,
            subject_name: required(record.subj_name, "SubjName")?,
            percent_identity: required(record.percent_identity, "PercentIdentity")?,
            percent_length,
            alignment_length,
            query_length,
            subject_length: required(record.subject_length, "SubjectLength")?,
            mismatches: required(record.mismatches, "Mismatches")?,
            gaps: required(record.gaps, "Gaps")?,
            query_start: required(record.query_start_index, "QueryStartIndex")?,
            query_end: required(record.query_end_index, "QueryEndIndex")?,
            subject_start: required(record.subject_start_index, "SubjectStartIndex")?,
            subject_end: required(record.subject_end_index, "SubjectEndIndex")?,
            bit_score: required(record.bit_score, "BitScore")?,
            reverse_complement: required(record.reverse_complement, "ReverseComplement")?,
            is_contig_truncation,
            query_aln: required(record.query_aln, "QueryAln")?,
            subject_aln: required(record.subj_aln, "SubjAln")?,
            partial: record.partial.unwrap_or(false),
            marker: record.marker_match,
        }))
    }
}
