use crate::calling::classify::classify;
use crate::core::call::LocusCall;
use crate::core::hit::{AlignmentHit, ClassifiedHit};

/// Pick the representative hit for one locus.
///
/// Correct hits win outright; otherwise only hits sharing the top bit score are
/// considered. Among those the longest alignment wins, and remaining ties go to
/// the earliest hit in input order.
#[must_use]
pub fn select_best(hits: Vec<ClassifiedHit>) -> Option<ClassifiedHit> {
    if hits.is_empty() {
        return None;
    }

    let candidates: Vec<ClassifiedHit> = if hits.iter().any(|h| h.correct) {
        hits.into_iter().filter(|h| h.correct).collect()
    } else {
        // Total order, so a non-empty set always has a top score
        let top_score = hits.iter().map(|h| h.hit.bit_score).max_by(f64::total_cmp)?;
        hits.into_iter()
            .filter(|h| h.hit.bit_score.total_cmp(&top_score).is_eq())
            .collect()
    };

    let longest = candidates.iter().map(|h| h.hit.alignment_length).max()?;

    candidates
        .into_iter()
        .find(|h| h.hit.alignment_length == longest)
}

/// Classify every hit for a locus, select the best one and build the initial call.
#[must_use]
pub fn call_locus(hits: Vec<AlignmentHit>) -> LocusCall {
    let classified = hits.into_iter().map(classify).collect();
    LocusCall::from_selection(select_best(classified))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(query_id: &str, bit_score: f64, alignment_length: u64, correct: bool) -> ClassifiedHit {
        let mut hit = AlignmentHit::exact(query_id, "contig_1", "ACGTACGTAC");
        hit.bit_score = bit_score;
        hit.alignment_length = alignment_length;
        ClassifiedHit {
            hit,
            reverse_complement: false,
            correct,
            is_contig_truncation: false,
        }
    }

    #[test]
    fn test_empty_is_no_hit() {
        assert!(select_best(Vec::new()).is_none());
        assert_eq!(call_locus(Vec::new()), LocusCall::NoHit);
    }

    #[test]
    fn test_correct_beats_higher_score() {
        let hits = vec![
            hit("abcZ_1", 500.0, 10, false),
            hit("abcZ_2", 100.0, 10, true),
        ];
        let best = select_best(hits).unwrap();
        assert_eq!(best.hit.query_id, "abcZ_2");
    }

    #[test]
    fn test_highest_bit_score_without_correct() {
        let hits = vec![
            hit("abcZ_1", 90.0, 10, false),
            hit("abcZ_2", 120.0, 9, false),
            hit("abcZ_3", 100.0, 10, false),
        ];
        let best = select_best(hits).unwrap();
        assert_eq!(best.hit.query_id, "abcZ_2");
    }

    #[test]
    fn test_longest_among_tied_scores() {
        let hits = vec![
            hit("abcZ_1", 120.0, 9, false),
            hit("abcZ_2", 120.0, 10, false),
            hit("abcZ_3", 120.0, 10, false),
        ];
        let best = select_best(hits).unwrap();
        assert_eq!(best.hit.query_id, "abcZ_2");
    }

    #[test]
    fn test_unordered_scores_still_select_a_hit() {
        let hits = vec![
            hit("abcZ_1", f64::NAN, 9, false),
            hit("abcZ_2", f64::NAN, 10, false),
        ];
        let best = select_best(hits).unwrap();
        assert_eq!(best.hit.query_id, "abcZ_2");
    }

    #[test]
    fn test_longest_among_correct_hits() {
        let hits = vec![
            hit("abcZ_1", 120.0, 8, true),
            hit("abcZ_2", 100.0, 10, true),
        ];
        let best = select_best(hits).unwrap();
        assert_eq!(best.hit.query_id, "abcZ_2");
    }

    #[test]
    fn test_call_locus_exact_match() {
        let hits = vec![AlignmentHit::exact("abcZ_5", "contig_1", "ACGTACGT")];
        let call = call_locus(hits);
        assert_eq!(call.hit().unwrap().marker_match(), Some("5"));
    }
}
