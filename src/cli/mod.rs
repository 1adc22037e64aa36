//! Command-line interface for fsac.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **call**: Align every locus against one genome and write its calls as JSON
//! - **update**: Resolve short and novel calls, growing the allele catalogs
//! - **tabulate**: Summarize a directory of results as an allele table
//!
//! ## Usage
//!
//! ```text
//! # Call one genome
//! fsac call -i genomes/SRR1.fasta -a alleles/ -o results/SRR1.json
//!
//! # Extend short hits and assign new alleles, four genomes at a time
//! fsac --threads 4 update -a alleles/ -j results/ -g genomes/
//!
//! # Allele table, comma separated
//! fsac tabulate -j results/ -o calls.csv -d ,
//! ```

use clap::{Parser, Subcommand};

pub mod call;
pub mod tabulate;
pub mod update;

#[derive(Parser)]
#[command(name = "fsac")]
#[command(version)]
#[command(about = "Call MLST alleles from BLAST hits and grow per-locus allele catalogs")]
#[command(
    long_about = "fsac calls MLST alleles in assembled genomes.\n\n`call` aligns each locus catalog against a genome and records the best hit per locus. `update` extends short hits from the genome contigs and assigns catalog identifiers, appending new alleles. `tabulate` turns a directory of results into a genome by locus table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of worker threads
    #[arg(long, global = true, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: u16,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Call alleles of every locus in one genome
    Call(call::CallArgs),

    /// Resolve unresolved calls against the allele catalogs
    Update(update::UpdateArgs),

    /// Write an allele table from a directory of results
    Tabulate(tabulate::TabulateArgs),
}

/// Run `work` on a rayon pool of `threads` workers
///
/// # Errors
///
/// Returns an error if the pool cannot be built or `work` fails.
pub fn with_thread_pool<T>(
    threads: u16,
    work: impl FnOnce() -> anyhow::Result<T> + Send,
) -> anyhow::Result<T>
where
    T: Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(usize::from(threads))
        .build()?;
    pool.install(work)
}

/// Output file, or `None` for standard output (`-` or absent)
fn output_file(path: Option<&std::path::Path>) -> Option<&std::path::Path> {
    path.filter(|p| p.as_os_str() != "-")
}
