//! Nucleotide sequence helpers.

/// Gap character used by the aligner in aligned sequences
pub const GAP: char = '-';

/// Complement of a single nucleotide.
///
/// Case is preserved. Anything other than A, C, G, T becomes N.
#[must_use]
pub fn complement(base: char) -> char {
    match base {
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        'C' => 'G',
        'a' => 't',
        't' => 'a',
        'g' => 'c',
        'c' => 'g',
        'n' => 'n',
        _ => 'N',
    }
}

/// Reverse complement of a nucleotide sequence.
///
/// # Examples
///
/// ```
/// use fsac::core::sequence::reverse_complement;
///
/// assert_eq!(reverse_complement("GATTACAN"), "NTGTAATC");
/// ```
#[must_use]
pub fn reverse_complement(sequence: &str) -> String {
    sequence.chars().rev().map(complement).collect()
}

/// Strip gap characters from an aligned sequence.
#[must_use]
pub fn ungapped(aligned: &str) -> String {
    aligned.chars().filter(|&c| c != GAP).collect()
}

/// Allele designation carried in a locus query identifier.
///
/// Every run of non-digit characters that precedes a digit is dropped, so
/// `aroC_12` becomes `12`. Trailing non-digits are kept and an identifier
/// without digits is returned unchanged.
#[must_use]
pub fn marker_from_query_id(query_id: &str) -> String {
    let mut marker = String::with_capacity(query_id.len());
    let mut pending = String::new();

    for c in query_id.chars() {
        if c.is_ascii_digit() {
            pending.clear();
            marker.push(c);
        } else {
            pending.push(c);
        }
    }

    marker.push_str(&pending);
    marker
}
