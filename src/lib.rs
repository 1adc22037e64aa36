//! # fsac
//!
//! A library for calling MLST alleles in assembled bacterial genomes.
//!
//! Every locus of a typing scheme has a FASTA catalog of known alleles, each
//! record named by an integer identifier. A genome is typed by aligning each
//! catalog against its contigs with `blastn` and keeping the best hit per
//! locus. Exact, full-length hits name their allele directly. The rest are
//! resolved later by `update`, which extends short hits from the genome
//! contigs and appends sequences not yet in the catalog under the next free
//! identifier.
//!
//! ## Features
//!
//! - **Deterministic hit selection**: Correct hits first, then bit score, then alignment length
//! - **Contig-edge detection**: Loci cut off by the end of a contig are reported, never assigned
//! - **Hit extension**: Short hits are completed from the contigs up to a configurable gap
//! - **Append-only catalogs**: Identifiers never change once assigned
//! - **Concurrent updates**: Genomes are updated in parallel with per-locus catalog locking
//!
//! ## Example
//!
//! ```rust,no_run
//! use fsac::{call_genome, Blastn, LocusSet};
//! use std::path::Path;
//!
//! let loci = LocusSet::discover(Path::new("alleles")).unwrap();
//! let calls = call_genome(&Blastn::default(), Path::new("genomes/SRR1.fasta"), &loci).unwrap();
//!
//! for (locus, call) in calls.iter() {
//!     println!("{locus}: {}", call.tabulation_cell());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`aligner`]: The `Aligner` trait and the `blastn` adapter
//! - [`calling`]: Hit classification, selection, extension and catalog update
//! - [`catalog`]: Per-locus allele catalogs and their locking
//! - [`core`]: Core data types for hits, calls and contigs
//! - [`output`]: Allele tables
//! - [`parsing`]: Parsers for aligner output, FASTA and result files
//! - [`cli`]: Command-line interface implementation

pub mod aligner;
pub mod calling;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use aligner::{Aligner, Blastn};
pub use calling::genome::call_genome;
pub use calling::update::{update_directory, UpdateConfig};
pub use catalog::loci::LocusSet;
pub use catalog::store::AlleleCatalog;
pub use core::call::{GenomeCallSet, HitCall, LocusCall};
pub use core::hit::AlignmentHit;
pub use output::table::CallTable;
