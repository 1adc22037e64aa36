use std::path::Path;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::aligner::{Aligner, AlignerError};
use crate::calling::select::call_locus;
use crate::catalog::loci::LocusSet;
use crate::core::call::{CallState, GenomeCallSet};

#[derive(Error, Debug)]
pub enum CallError {
    #[error("Alignment of locus '{locus}' failed: {source}")]
    Aligner {
        locus: String,
        #[source]
        source: AlignerError,
    },
}

/// Call every locus of `loci` against one genome.
///
/// Loci are aligned in parallel on the current rayon pool. No catalog is read
/// or written; only correct hits receive a marker at this stage.
///
/// # Errors
///
/// Returns `CallError::Aligner` for the first locus whose alignment fails.
pub fn call_genome<A: Aligner>(
    aligner: &A,
    genome: &Path,
    loci: &LocusSet,
) -> Result<GenomeCallSet, CallError> {
    info!("Calling {} loci in {}", loci.len(), genome.display());

    let calls: GenomeCallSet = loci
        .iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(locus, query)| {
            let hits = aligner
                .align(query, genome)
                .map_err(|source| CallError::Aligner {
                    locus: locus.to_string(),
                    source,
                })?;

            let call = call_locus(hits);
            debug!("{locus}: {:?}", call.state());
            Ok((locus.to_string(), call))
        })
        .collect::<Result<Vec<_>, CallError>>()?
        .into_iter()
        .collect();

    log_states(&calls);
    Ok(calls)
}

fn log_states(calls: &GenomeCallSet) {
    let count = |state: CallState| calls.iter().filter(|(_, c)| c.state() == state).count();
    info!(
        "{} resolved, {} novel, {} short, {} contig truncated, {} missing",
        count(CallState::Resolved),
        count(CallState::Novel),
        count(CallState::Short),
        count(CallState::ContigTruncated),
        count(CallState::NoHit),
    );
}
