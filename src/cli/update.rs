use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::calling::extend::DEFAULT_EXTENSION_THRESHOLD;
use crate::calling::update::{update_directory, UpdateConfig};
use crate::catalog::loci::LocusSet;
use crate::parsing::fasta::is_fasta_file;
use crate::parsing::results::{result_files, RESULT_EXTENSION};
use crate::utils::validation::{
    validate_catalog, validate_directory, validate_fasta, validate_json, ValidationError,
};

#[derive(Args)]
pub struct UpdateArgs {
    /// Directory of locus allele FASTA files, appended to in place
    #[arg(short, long)]
    pub alleles: PathBuf,

    /// Directory of result JSON files, rewritten in place
    #[arg(short, long)]
    pub json_dir: PathBuf,

    /// Directory of genome FASTA files named after the result files
    #[arg(short, long)]
    pub genome_dir: PathBuf,

    /// Largest number of missing bases a short hit may be extended by
    #[arg(short, long, default_value_t = DEFAULT_EXTENSION_THRESHOLD)]
    pub threshold: u64,
}

pub fn run(args: UpdateArgs, threads: u16) -> anyhow::Result<()> {
    validate(&args)?;

    let loci = LocusSet::discover(&args.alleles)?;
    let config = UpdateConfig {
        threshold: args.threshold,
    };

    let summary = super::with_thread_pool(threads, || {
        Ok(update_directory(
            &args.json_dir,
            &loci,
            &args.genome_dir,
            &config,
        )?)
    })?;

    info!(
        "Update complete: {} calls resolved, {} new alleles, {} left partial",
        summary.resolved, summary.novel_alleles, summary.partial
    );
    Ok(())
}

fn validate(args: &UpdateArgs) -> Result<(), ValidationError> {
    let mut problems = Vec::new();

    match validate_directory(&args.alleles, is_fasta_file) {
        Some(problem) => problems.push(problem),
        None => {
            if let Ok(loci) = LocusSet::discover(&args.alleles) {
                problems.extend(loci.iter().filter_map(|(_, path)| validate_catalog(path)));
            }
        }
    }

    let is_result = |path: &std::path::Path| path.extension().is_some_and(|e| e == RESULT_EXTENSION);
    match validate_directory(&args.json_dir, is_result) {
        Some(problem) => problems.push(problem),
        None => {
            if let Ok(files) = result_files(&args.json_dir) {
                problems.extend(files.iter().filter_map(|path| validate_json(path)));
            }
        }
    }

    match std::fs::read_dir(&args.genome_dir) {
        Ok(entries) => problems.extend(
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.is_file() && is_fasta_file(path))
                .filter_map(|path| validate_fasta(&path)),
        ),
        Err(e) => problems.push(format!("{}: {e}", args.genome_dir.display())),
    }

    ValidationError::from_problems(problems)
}
