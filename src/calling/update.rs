use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calling::extend::{Extension, HitExtender, DEFAULT_EXTENSION_THRESHOLD};
use crate::catalog::lock::{CatalogLock, LocusLocks};
use crate::catalog::loci::LocusSet;
use crate::catalog::store::{AlleleCatalog, CatalogError};
use crate::core::call::GenomeCallSet;
use crate::core::contig::GenomeContigs;
use crate::core::sequence::ungapped;
use crate::parsing::fasta::{find_fasta, read_contigs};
use crate::parsing::results::{genome_name, read_call_set, result_files, write_call_set, ResultsError};
use crate::parsing::ParseError;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Catalog of locus '{locus}': {source}")]
    Catalog {
        locus: String,
        #[source]
        source: CatalogError,
    },

    #[error(transparent)]
    Results(#[from] ResultsError),

    #[error("Failed to search genome directory {path}: {source}")]
    GenomeDir {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Configuration for catalog updates
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Short hits missing at most this many bases are extended
    pub threshold: u64,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_EXTENSION_THRESHOLD,
        }
    }
}

/// Counts of what an update changed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Calls that received a catalog identifier
    pub resolved: usize,
    /// Of those, calls whose sequence was added to the catalog
    pub novel_alleles: usize,
    /// Calls left unresolved because extension failed
    pub partial: usize,
}

impl UpdateSummary {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            resolved: self.resolved + other.resolved,
            novel_alleles: self.novel_alleles + other.novel_alleles,
            partial: self.partial + other.partial,
        }
    }
}

/// Genome contigs, read from disk the first time an extension needs them
#[derive(Debug)]
pub struct LazyGenome {
    path: Option<PathBuf>,
    contigs: Option<Option<GenomeContigs>>,
}

impl LazyGenome {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            contigs: None,
        }
    }

    /// A genome whose contigs are already in memory
    pub fn loaded(contigs: GenomeContigs) -> Self {
        Self {
            path: None,
            contigs: Some(Some(contigs)),
        }
    }

    /// Contigs of the genome, or `None` if it has no readable FASTA
    pub fn contigs(&mut self) -> Option<&GenomeContigs> {
        if self.contigs.is_none() {
            let loaded = match &self.path {
                None => {
                    warn!("No genome FASTA available; short hits cannot be extended");
                    None
                }
                Some(path) => match read_contigs(path) {
                    Ok(contigs) => Some(contigs),
                    Err(e) => {
                        warn!("Cannot read genome {}: {e}", path.display());
                        None
                    }
                },
            };
            self.contigs = Some(loaded);
        }

        self.contigs.as_ref().and_then(Option::as_ref)
    }
}

/// Resolve the unresolved calls of one genome against the locus catalogs.
///
/// Calls with a hit that are neither correct nor contig truncated are
/// candidates. Short ones are extended first; if that fails they are flagged
/// partial and left alone. Every other candidate's ungapped sequence is
/// assigned a catalog identifier, adding it to the catalog when new, and the
/// call is rewritten as an exact match to that allele.
///
/// # Errors
///
/// Returns `UpdateError::Catalog` if a locus has no catalog or its catalog is
/// corrupt or cannot be written; processing stops at that locus.
pub fn update_call_set<L: CatalogLock>(
    calls: &mut GenomeCallSet,
    loci: &LocusSet,
    genome: &mut LazyGenome,
    config: &UpdateConfig,
    lock: &L,
) -> Result<UpdateSummary, UpdateError> {
    let extender = HitExtender::new(config.threshold);
    let mut summary = UpdateSummary::default();

    for (locus, call) in calls.iter_mut() {
        let Some(hit) = call.hit_mut() else {
            continue;
        };
        if hit.correct_marker_match() || hit.is_contig_truncation {
            continue;
        }

        let sequence = if hit.percent_length < 1.0 {
            match extender.extend(hit, genome.contigs()) {
                Extension::FullLength(extended) => ungapped(&extended),
                Extension::Unresolved(reason) => {
                    debug!("{locus}: leaving {} unresolved, {reason}", hit.query_name);
                    hit.partial = true;
                    summary.partial += 1;
                    continue;
                }
            }
        } else {
            ungapped(&hit.subject_aln)
        };

        let catalog_error = |source| UpdateError::Catalog {
            locus: locus.clone(),
            source,
        };

        let catalog_path = loci.require(locus).map_err(catalog_error)?;

        let (identifier, novel) = lock
            .serialize(locus, || -> Result<(String, bool), CatalogError> {
                let mut catalog = AlleleCatalog::load(catalog_path)?;
                let novel = catalog.lookup(&sequence).is_none();
                Ok((catalog.assign(&sequence)?, novel))
            })
            .map_err(catalog_error)?;

        debug!("{locus}: resolved {} as allele {identifier}", hit.query_name);
        hit.resolve(identifier, sequence);

        summary.resolved += 1;
        if novel {
            summary.novel_alleles += 1;
        }
    }

    Ok(summary)
}

/// Update one result file in place, using the genome FASTA of the same name in `genome_dir`.
///
/// # Errors
///
/// Returns an `UpdateError` if the result file cannot be read or written, the
/// genome directory cannot be searched, or a catalog update fails.
pub fn update_result_file<L: CatalogLock>(
    path: &Path,
    loci: &LocusSet,
    genome_dir: &Path,
    config: &UpdateConfig,
    lock: &L,
) -> Result<UpdateSummary, UpdateError> {
    let name = genome_name(path);
    let mut calls = read_call_set(path)?;

    let genome_path = find_fasta(genome_dir, &name).map_err(|source| UpdateError::GenomeDir {
        path: genome_dir.to_path_buf(),
        source,
    })?;
    if genome_path.is_none() {
        debug!("{name}: no genome FASTA in {}", genome_dir.display());
    }

    let mut genome = LazyGenome::new(genome_path);
    let summary = update_call_set(&mut calls, loci, &mut genome, config, lock)?;

    write_call_set(path, &calls)?;

    info!(
        "{name}: {} resolved ({} new alleles), {} partial",
        summary.resolved, summary.novel_alleles, summary.partial
    );
    Ok(summary)
}

/// Update every result file in `json_dir`.
///
/// Files are processed in parallel on the current rayon pool; catalog
/// assignments are serialized per locus.
///
/// # Errors
///
/// Returns the first `UpdateError` encountered.
pub fn update_directory(
    json_dir: &Path,
    loci: &LocusSet,
    genome_dir: &Path,
    config: &UpdateConfig,
) -> Result<UpdateSummary, UpdateError> {
    let files = result_files(json_dir)?;
    let locks = LocusLocks::new();

    info!("Updating {} result files", files.len());

    let summary = files
        .par_iter()
        .map(|path| update_result_file(path, loci, genome_dir, config, &locks))
        .collect::<Result<Vec<_>, UpdateError>>()?
        .into_iter()
        .fold(UpdateSummary::default(), UpdateSummary::merge);

    Ok(summary)
}
