//! Reader for genome FASTA files using noodles.
//!
//! Extracts contig identifiers and sequences from FASTA files.
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use noodles::fasta;

use crate::core::contig::GenomeContigs;
use crate::parsing::ParseError;

const FASTA_EXTENSIONS: [&str; 3] = ["fa", "fasta", "fna"];
const COMPRESSION_EXTENSIONS: [&str; 2] = ["gz", "bgz"];

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    // Check for uncompressed FASTA
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// File name with compression and FASTA extensions removed.
///
/// `genomes/SRR123.fasta.gz` becomes `SRR123`.
pub fn fasta_stem(path: &Path) -> Option<String> {
    let mut name = path.file_name()?.to_str()?.to_string();

    for extensions in [&COMPRESSION_EXTENSIONS[..], &FASTA_EXTENSIONS[..]] {
        if let Some((stem, ext)) = name.rsplit_once('.') {
            if extensions.contains(&ext.to_lowercase().as_str()) {
                name = stem.to_string();
            }
        }
    }

    (!name.is_empty()).then_some(name)
}

/// Find the FASTA file in `dir` whose stem is `name`
///
/// # Errors
///
/// Returns `ParseError::Io` if the directory cannot be read.
pub fn find_fasta(dir: &Path, name: &str) -> Result<Option<PathBuf>, ParseError> {
    let mut matches: Vec<PathBuf> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_fasta_file(&path) && fasta_stem(&path).as_deref() == Some(name) {
            matches.push(path);
        }
    }

    // Deterministic pick when both plain and compressed copies exist
    matches.sort();
    Ok(matches.into_iter().next())
}

/// Read every contig of a genome FASTA file.
///
/// Contigs are keyed by the header token up to the first whitespace.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::InvalidFormat` if no contigs are found.
pub fn read_contigs(path: &Path) -> Result<GenomeContigs, ParseError> {
    let file = std::fs::File::open(path)?;

    if is_gzipped(path) {
        let decoder = MultiGzDecoder::new(file);
        let mut reader = fasta::io::Reader::new(BufReader::new(decoder));
        read_contigs_from(&mut reader)
    } else {
        let mut reader = fasta::io::Reader::new(BufReader::new(file));
        read_contigs_from(&mut reader)
    }
}

/// Read contigs from a noodles FASTA reader
fn read_contigs_from<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<GenomeContigs, ParseError> {
    let mut contigs = GenomeContigs::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        let sequence = record.sequence().as_ref().to_vec();

        contigs.insert(name, sequence);
    }

    if contigs.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(contigs)
}
