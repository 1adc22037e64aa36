use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::core::call::GenomeCallSet;
use crate::parsing::results::{genome_name, read_call_set, result_files, ResultsError};

pub const DEFAULT_DELIMITER: char = '\t';

/// Allele calls of many genomes, one row per genome.
///
/// Columns are the sorted union of locus names over all genomes. Each cell is
/// the call's tabulation value: the allele identifier, `0` for no hit, `-1`
/// for a contig truncation or `?` when unresolved. A locus missing from a
/// genome's results leaves its cell empty.
#[derive(Debug, Default)]
pub struct CallTable {
    rows: Vec<(String, GenomeCallSet)>,
}

impl CallTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every result file of `dir`, ordered by genome name
    ///
    /// # Errors
    ///
    /// Returns a `ResultsError` if the directory or any result file cannot be read.
    pub fn from_dir(dir: &Path) -> Result<Self, ResultsError> {
        let mut table = Self::new();
        for path in result_files(dir)? {
            let name = genome_name(&path);
            debug!("Tabulating {name}");
            table.push(name, read_call_set(&path)?);
        }
        table.rows.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(table)
    }

    /// Add a genome's calls as the last row
    pub fn push(&mut self, genome: impl Into<String>, calls: GenomeCallSet) {
        self.rows.push((genome.into(), calls));
    }

    /// Sorted union of the loci of every row
    pub fn loci(&self) -> Vec<&str> {
        let loci: BTreeSet<&str> = self
            .rows
            .iter()
            .flat_map(|(_, calls)| calls.iter().map(|(locus, _)| locus.as_str()))
            .collect();
        loci.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the header and one line per genome
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn write<W: Write>(&self, mut writer: W, delimiter: char) -> std::io::Result<()> {
        let loci = self.loci();
        let separator = delimiter.to_string();

        let mut header = vec![""];
        header.extend(loci.iter().copied());
        writeln!(writer, "{}", header.join(&separator))?;

        for (genome, calls) in &self.rows {
            let mut line = vec![genome.as_str()];
            line.extend(
                loci.iter()
                    .map(|locus| calls.get(locus).map_or("", |call| call.tabulation_cell())),
            );
            writeln!(writer, "{}", line.join(&separator))?;
        }

        writer.flush()
    }
}
