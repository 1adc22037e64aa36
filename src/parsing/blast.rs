use std::str::FromStr;

use crate::core::hit::AlignmentHit;
use crate::parsing::ParseError;

/// Output columns requested from the aligner, in order
pub const OUTPUT_COLUMNS: [&str; 15] = [
    "qseqid", "sseqid", "pident", "length", "qstart", "qend", "sstart", "send", "qlen", "slen",
    "bitscore", "gaps", "sseq", "qseq", "mismatch",
];

/// Parse tab-delimited aligner rows into hits
///
/// Empty lines and `#` comment lines are skipped. No rows means no hits.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row does not have exactly the
/// expected columns or a numeric column cannot be parsed.
pub fn parse_blast_tabular(text: &str) -> Result<Vec<AlignmentHit>, ParseError> {
    let mut hits = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.len() != OUTPUT_COLUMNS.len() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected {}",
                fields.len(),
                OUTPUT_COLUMNS.len()
            )));
        }

        let column = Column {
            fields: &fields,
            line_num,
        };

        hits.push(AlignmentHit {
            query_id: fields[0].to_string(),
            subject_id: fields[1].to_string(),
            percent_identity: column.parse_finite(2)?,
            alignment_length: column.parse(3)?,
            query_start: column.parse(4)?,
            query_end: column.parse(5)?,
            subject_start: column.parse(6)?,
            subject_end: column.parse(7)?,
            query_length: column.parse(8)?,
            subject_length: column.parse(9)?,
            bit_score: column.parse_finite(10)?,
            gaps: column.parse(11)?,
            subject_aln: fields[12].to_string(),
            query_aln: fields[13].to_string(),
            mismatches: column.parse(14)?,
        });
    }

    Ok(hits)
}

struct Column<'a> {
    fields: &'a [&'a str],
    line_num: usize,
}

impl Column<'_> {
    fn parse<T: FromStr>(&self, index: usize) -> Result<T, ParseError> {
        self.fields[index].parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid {} on line {}: '{}'",
                OUTPUT_COLUMNS[index], self.line_num, self.fields[index]
            ))
        })
    }

    /// Scores must be ordinary numbers; `nan` and `inf` are rejected
    fn parse_finite(&self, index: usize) -> Result<f64, ParseError> {
        let value: f64 = self.parse(index)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ParseError::InvalidFormat(format!(
                "Non-finite {} on line {}: '{}'",
                OUTPUT_COLUMNS[index], self.line_num, self.fields[index]
            )))
        }
    }
}
