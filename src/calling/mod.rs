//! Allele calling and catalog update.
//!
//! Calling happens in two stages:
//!
//! 1. **call** ([`genome::call_genome`]): every locus is aligned against a
//!    genome, hits are classified ([`classify`]) and the best one is kept
//!    ([`select`]). No catalog is touched.
//! 2. **update** ([`update`]): calls that are neither exact nor truncated at a
//!    contig edge are resolved against the locus catalog. Short hits are first
//!    extended to full query length from the genome contigs ([`extend`]).
//!
//! ## Hit selection
//!
//! Among the hits of one locus, correct hits (exact, full length, no gaps)
//! win; otherwise the hits with the top bit score are candidates. Ties are
//! broken by the longest alignment, then by aligner output order.

pub mod classify;
pub mod extend;
pub mod genome;
pub mod select;
pub mod update;

pub use extend::{Extension, HitExtender, Unresolved, DEFAULT_EXTENSION_THRESHOLD};
pub use genome::{call_genome, CallError};
pub use select::{call_locus, select_best};
pub use update::{
    update_call_set, update_directory, update_result_file, LazyGenome, UpdateConfig, UpdateError,
    UpdateSummary,
};
