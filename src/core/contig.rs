use std::collections::HashMap;

use tracing::debug;

/// Contig sequences of one genome, keyed by contig identifier.
///
/// The identifier is the FASTA header token up to the first whitespace, which
/// is also what the aligner reports as the subject id.
#[derive(Debug, Clone, Default)]
pub struct GenomeContigs {
    sequences: HashMap<String, Vec<u8>>,
}

impl GenomeContigs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contig. The first contig seen under a given identifier wins.
    pub fn insert(&mut self, name: impl Into<String>, sequence: Vec<u8>) {
        let name = name.into();
        if self.sequences.contains_key(&name) {
            debug!("Ignoring repeated contig identifier '{name}'");
            return;
        }
        self.sequences.insert(name, sequence);
    }

    /// Sequence of the contig with this identifier
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.sequences.get(name).map(Vec::as_slice)
    }

    /// Length of the contig with this identifier
    pub fn length(&self, name: &str) -> Option<u64> {
        self.get(name).map(|s| s.len() as u64)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
