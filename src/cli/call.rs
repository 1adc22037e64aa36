use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::aligner::blast::{Blastn, DEFAULT_BLASTN};
use crate::calling::genome::call_genome;
use crate::catalog::loci::LocusSet;
use crate::cli::output_file;
use crate::parsing::fasta::is_fasta_file;
use crate::parsing::results::{write_call_set, write_call_set_to};
use crate::utils::validation::{
    validate_catalog, validate_directory, validate_fasta, ValidationError,
};

#[derive(Args)]
pub struct CallArgs {
    /// Genome FASTA file (optionally gzip/bgzip compressed)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory of locus allele FASTA files
    #[arg(short, long)]
    pub alleles: PathBuf,

    /// Output JSON file; '-' or absent writes to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// blastn executable
    #[arg(long, default_value = DEFAULT_BLASTN)]
    pub blastn: PathBuf,
}

pub fn run(args: CallArgs, threads: u16) -> anyhow::Result<()> {
    validate(&args)?;

    let loci = LocusSet::discover(&args.alleles)?;
    let aligner = Blastn::new(&args.blastn);

    let calls =
        super::with_thread_pool(threads, || Ok(call_genome(&aligner, &args.input, &loci)?))?;

    if let Some(path) = output_file(args.output.as_deref()) {
        write_call_set(path, &calls)?;
        info!("Wrote {} calls to {}", calls.len(), path.display());
    } else {
        let mut handle = std::io::stdout().lock();
        write_call_set_to(&mut handle, &calls)?;
        handle.flush()?;
    }

    Ok(())
}

fn validate(args: &CallArgs) -> Result<(), ValidationError> {
    let mut problems: Vec<String> = validate_fasta(&args.input).into_iter().collect();

    match validate_directory(&args.alleles, is_fasta_file) {
        Some(problem) => problems.push(problem),
        None => {
            if let Ok(loci) = LocusSet::discover(&args.alleles) {
                problems.extend(loci.iter().filter_map(|(_, path)| validate_catalog(path)));
            }
        }
    }

    ValidationError::from_problems(problems)
}
