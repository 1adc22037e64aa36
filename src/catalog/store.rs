use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

use noodles::fasta;
use thiserror::Error;
use tracing::info;

/// FASTA record marker
pub const RECORD_MARKER: char = '>';

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to access allele catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed allele catalog {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Allele identifier '{identifier}' in {path} is not a non-negative integer")]
    InvalidIdentifier { path: PathBuf, identifier: String },

    #[error("Allele identifier '{identifier}' in {path} exceeds the largest supported identifier {}", u64::MAX)]
    IdentifierTooLarge { path: PathBuf, identifier: String },

    #[error("Allele catalog {path} has no identifier left after {}", u64::MAX)]
    IdentifierOverflow { path: PathBuf },

    #[error("Allele catalog {path} lists one sequence as both '{first}' and '{second}'")]
    DuplicateSequence {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("Allele catalog {path} uses identifier '{identifier}' for two different sequences")]
    DuplicateIdentifier { path: PathBuf, identifier: String },

    #[error("No allele catalog found for locus '{0}'")]
    UnknownLocus(String),
}

/// Known alleles of one locus, fronting an append-only FASTA file.
///
/// Sequences are stored ungapped. Identifiers are decimal integers; new
/// alleles get one more than the largest identifier in the catalog.
#[derive(Debug)]
pub struct AlleleCatalog {
    path: PathBuf,

    /// Index: sequence -> identifier as written in the file
    sequence_to_id: HashMap<String, String>,

    /// Index: numeric identifier -> sequence
    id_to_sequence: HashMap<u64, String>,

    max_id: Option<u64>,

    /// Whether an append can start directly with a header line
    ends_with_newline: bool,
}

impl AlleleCatalog {
    /// Load the catalog backed by the FASTA file at `path`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or a data error if
    /// the records are corrupt.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_fasta_text(path, &text)
    }

    /// Parse catalog records from FASTA text, associating them with `path`
    ///
    /// The identifier is the header name up to the first whitespace. Sequence
    /// lines are concatenated until the next header or the end of the text, so
    /// the last record needs no terminator.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Malformed` for text that is not FASTA (such as a
    /// sequence before the first header), `CatalogError::InvalidIdentifier` or
    /// `CatalogError::IdentifierTooLarge` for unusable identifiers, and
    /// `CatalogError::DuplicateSequence` / `CatalogError::DuplicateIdentifier`
    /// when a sequence or identifier appears under two different partners.
    pub fn from_fasta_text(path: &Path, text: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            path: path.to_path_buf(),
            sequence_to_id: HashMap::new(),
            id_to_sequence: HashMap::new(),
            max_id: None,
            ends_with_newline: text.is_empty() || text.ends_with('\n'),
        };

        let mut reader = fasta::io::Reader::new(text.as_bytes());

        for result in reader.records() {
            let record = result.map_err(|source| CatalogError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

            let identifier = String::from_utf8_lossy(record.name()).into_owned();
            let sequence = String::from_utf8_lossy(record.sequence().as_ref()).into_owned();

            catalog.insert_record(identifier, sequence)?;
        }

        Ok(catalog)
    }

    fn insert_record(&mut self, identifier: String, sequence: String) -> Result<(), CatalogError> {
        let numeric: u64 = identifier.parse().map_err(|e: std::num::ParseIntError| {
            let path = self.path.clone();
            let identifier = identifier.clone();
            match e.kind() {
                IntErrorKind::PosOverflow => CatalogError::IdentifierTooLarge { path, identifier },
                _ => CatalogError::InvalidIdentifier { path, identifier },
            }
        })?;

        if let Some(existing) = self.sequence_to_id.get(&sequence) {
            if existing.parse::<u64>().ok() == Some(numeric) {
                // Same record written twice
                return Ok(());
            }
            return Err(CatalogError::DuplicateSequence {
                path: self.path.clone(),
                first: existing.clone(),
                second: identifier,
            });
        }

        if self.id_to_sequence.contains_key(&numeric) {
            return Err(CatalogError::DuplicateIdentifier {
                path: self.path.clone(),
                identifier,
            });
        }

        self.max_id = self.max_id.max(Some(numeric));
        self.id_to_sequence.insert(numeric, sequence.clone());
        self.sequence_to_id.insert(sequence, identifier);
        Ok(())
    }

    /// Identifier of a known sequence
    pub fn lookup(&self, sequence: &str) -> Option<&str> {
        self.sequence_to_id.get(sequence).map(String::as_str)
    }

    /// Identifier for `sequence`, adding it to the catalog if it is new.
    ///
    /// Known sequences return their identifier and leave the file untouched.
    /// A new sequence is appended to the backing file as a two-line record.
    ///
    /// Computing the next identifier and appending are not atomic: callers
    /// sharing a locus catalog must hold that locus's
    /// [`CatalogLock`](crate::catalog::lock::CatalogLock) across load and assign.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::IdentifierOverflow` if the largest identifier is
    /// already `u64::MAX`, or `CatalogError::Io` if the record cannot be appended.
    pub fn assign(&mut self, sequence: &str) -> Result<String, CatalogError> {
        if let Some(identifier) = self.lookup(sequence) {
            return Ok(identifier.to_string());
        }

        let next = match self.max_id {
            None => 1,
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| CatalogError::IdentifierOverflow {
                    path: self.path.clone(),
                })?,
        };
        let identifier = next.to_string();

        self.append_record(&identifier, sequence)?;

        self.max_id = Some(next);
        self.id_to_sequence.insert(next, sequence.to_string());
        self.sequence_to_id
            .insert(sequence.to_string(), identifier.clone());

        info!(
            "Added allele {} to {} ({} bp)",
            identifier,
            self.path.display(),
            sequence.len()
        );

        Ok(identifier)
    }

    fn append_record(&mut self, identifier: &str, sequence: &str) -> Result<(), CatalogError> {
        let io_error = |source| CatalogError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(io_error)?;

        let separator = if self.ends_with_newline { "" } else { "\n" };
        write!(file, "{separator}{RECORD_MARKER}{identifier}\n{sequence}\n").map_err(io_error)?;

        self.ends_with_newline = true;
        Ok(())
    }

    /// Largest identifier in the catalog
    pub fn max_identifier(&self) -> Option<u64> {
        self.max_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of alleles in catalog
    pub fn len(&self) -> usize {
        self.sequence_to_id.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.sequence_to_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn catalog_file(content: &str) -> NamedTempFile {
        let mut temp = NamedTempFile::with_suffix(".fasta").unwrap();
        temp.write_all(content.as_bytes()).unwrap();
        temp.flush().unwrap();
        temp
    }

    #[test]
    fn test_load_multiline_records() {
        let temp = catalog_file(">1\nACGT\nACGT\n>2\nGGGG\n\n>3\nTTTT\nCC");
        let catalog = AlleleCatalog::load(temp.path()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.lookup("ACGTACGT"), Some("1"));
        assert_eq!(catalog.lookup("GGGG"), Some("2"));
        // Final record has no trailing header or newline
        assert_eq!(catalog.lookup("TTTTCC"), Some("3"));
        assert_eq!(catalog.max_identifier(), Some(3));
    }

    #[test]
    fn test_assign_next_identifier() {
        let temp = catalog_file(">1\nACGT\n>7\nGGGG\n>3\nTTTT\n");
        let mut catalog = AlleleCatalog::load(temp.path()).unwrap();

        let id = catalog.assign("CCCC").unwrap();
        assert_eq!(id, "8");
        assert_eq!(catalog.lookup("CCCC"), Some("8"));

        let content = std::fs::read_to_string(temp.path()).unwrap();
        assert!(content.ends_with(">8\nCCCC\n"));

        let reloaded = AlleleCatalog::load(temp.path()).unwrap();
        assert_eq!(reloaded.lookup("CCCC"), Some("8"));
    }

    #[test]
    fn test_assign_past_largest_identifier_is_error() {
        let content = format!(">{}\nACGT\n", u64::MAX);
        let temp = catalog_file(&content);
        let mut catalog = AlleleCatalog::load(temp.path()).unwrap();

        assert!(matches!(
            catalog.assign("GGGG"),
            Err(CatalogError::IdentifierOverflow { .. })
        ));
        assert_eq!(catalog.lookup("GGGG"), None);
        assert_eq!(std::fs::read_to_string(temp.path()).unwrap(), content);

        // Known sequences still resolve
        assert_eq!(catalog.assign("ACGT").unwrap(), u64::MAX.to_string());
    }

    #[test]
    fn test_oversized_identifier_is_reported() {
        let temp = catalog_file(">123456789012345678901234567890\nACGT\n");
        let result = AlleleCatalog::load(temp.path());
        assert!(matches!(
            result,
            Err(CatalogError::IdentifierTooLarge { identifier, .. })
                if identifier == "123456789012345678901234567890"
        ));
    }

    #[test]
    fn test_assign_is_idempotent() {
        let temp = catalog_file(">1\nACGT\n");
        let mut catalog = AlleleCatalog::load(temp.path()).unwrap();

        let first = catalog.assign("GGGG").unwrap();
        let size_after_first = std::fs::metadata(temp.path()).unwrap().len();
        let second = catalog.assign("GGGG").unwrap();

        assert_eq!(first, "2");
        assert_eq!(first, second);
        assert_eq!(
            std::fs::metadata(temp.path()).unwrap().len(),
            size_after_first
        );
        assert_eq!(catalog.assign("ACGT").unwrap(), "1");
    }

    #[test]
    fn test_append_without_trailing_newline() {
        let temp = catalog_file(">1\nACGT");
        let mut catalog = AlleleCatalog::load(temp.path()).unwrap();
        catalog.assign("GGGG").unwrap();

        let content = std::fs::read_to_string(temp.path()).unwrap();
        assert_eq!(content, ">1\nACGT\n>2\nGGGG\n");
    }

    #[test]
    fn test_empty_catalog_starts_at_one() {
        let temp = catalog_file("");
        let mut catalog = AlleleCatalog::load(temp.path()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.assign("ACGT").unwrap(), "1");
    }

    #[test]
    fn test_identifiers_compare_numerically() {
        let temp = catalog_file(">9\nAAAA\n>10\nCCCC\n>010\nCCCC\n");
        let mut catalog = AlleleCatalog::load(temp.path()).unwrap();
        assert_eq!(catalog.assign("GGGG").unwrap(), "11");
    }

    #[test]
    fn test_non_integer_identifier_is_corrupt() {
        let temp = catalog_file(">1\nACGT\n>abc_2\nGGGG\n");
        let result = AlleleCatalog::load(temp.path());
        assert!(matches!(
            result,
            Err(CatalogError::InvalidIdentifier { identifier, .. }) if identifier == "abc_2"
        ));
    }

    #[test]
    fn test_sequence_under_two_identifiers_is_corrupt() {
        let temp = catalog_file(">1\nACGT\n>2\nACGT\n");
        let result = AlleleCatalog::load(temp.path());
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateSequence { first, second, .. }) if first == "1" && second == "2"
        ));
    }

    #[test]
    fn test_identifier_for_two_sequences_is_corrupt() {
        let temp = catalog_file(">1\nACGT\n>1\nGGGG\n");
        let result = AlleleCatalog::load(temp.path());
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn test_sequence_before_header() {
        let temp = catalog_file("ACGT\n>1\nACGT\n");
        let result = AlleleCatalog::load(temp.path());
        assert!(matches!(result, Err(CatalogError::Malformed { .. })));
    }

    #[test]
    fn test_header_description_is_not_identifier() {
        let temp = catalog_file(">4 submitted 2019\r\nACGT\r\n");
        let catalog = AlleleCatalog::load(temp.path()).unwrap();
        assert_eq!(catalog.lookup("ACGT"), Some("4"));
    }
}
