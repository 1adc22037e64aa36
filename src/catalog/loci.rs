use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::store::CatalogError;
use crate::parsing::fasta::{fasta_stem, is_fasta_file, is_gzipped};

/// The loci of a typing scheme: one FASTA file per locus in a directory.
///
/// Each file is both the aligner query for its locus and that locus's allele
/// catalog, so compressed files are not accepted.
#[derive(Debug, Clone, Default)]
pub struct LocusSet {
    loci: BTreeMap<String, PathBuf>,
}

impl LocusSet {
    /// Discover locus files in `dir`, keyed by file stem
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the directory cannot be read.
    pub fn discover(dir: &Path) -> Result<Self, CatalogError> {
        let io_error = |source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut loci = BTreeMap::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if !path.is_file() || !is_fasta_file(&path) || is_gzipped(&path) {
                continue;
            }
            if let Some(name) = fasta_stem(&path) {
                loci.insert(name, path);
            }
        }

        Ok(Self { loci })
    }

    /// Catalog file of `locus`
    pub fn path(&self, locus: &str) -> Option<&Path> {
        self.loci.get(locus).map(PathBuf::as_path)
    }

    /// Catalog file of `locus`, or an error naming the locus
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownLocus` if the locus has no file.
    pub fn require(&self, locus: &str) -> Result<&Path, CatalogError> {
        self.path(locus)
            .ok_or_else(|| CatalogError::UnknownLocus(locus.to_string()))
    }

    /// Locus names and files, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.loci.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_loci() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("aroC.fasta"), ">1\nACGT\n").unwrap();
        std::fs::write(dir.path().join("dnaN.fa"), ">1\nGGGG\n").unwrap();
        std::fs::write(dir.path().join("hemD.fasta.gz"), "").unwrap();
        std::fs::write(dir.path().join("README.md"), "loci").unwrap();

        let loci = LocusSet::discover(dir.path()).unwrap();
        let names: Vec<&str> = loci.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["aroC", "dnaN"]);
        assert_eq!(loci.path("dnaN"), Some(dir.path().join("dnaN.fa").as_path()));
        assert!(loci.require("hemD").is_err());
    }
}
