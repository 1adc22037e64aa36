//! Core data types for allele calling.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`AlignmentHit`]: One row of aligner output for a locus against a genome
//! - [`ClassifiedHit`]: A hit annotated with orientation, exactness and contig-edge flags
//! - [`LocusCall`]: The persisted per-locus result, either `NoHit` or `Hit(HitCall)`
//! - [`GenomeCallSet`]: All locus calls for one genome
//! - [`GenomeContigs`]: Contig sequences of a genome, addressable by identifier
//!
//! ## Call lifecycle
//!
//! | State            | Produced by | Terminal |
//! |------------------|-------------|----------|
//! | no hit           | call        | yes      |
//! | resolved         | call/update | yes      |
//! | contig truncated | call        | yes      |
//! | short            | call        | no       |
//! | novel            | call        | no       |
//!
//! Short and novel calls become resolved when `update` assigns them a catalog
//! identifier.

pub mod call;
pub mod contig;
pub mod hit;
pub mod sequence;

pub use call::{CallState, GenomeCallSet, HitCall, LocusCall};
pub use contig::GenomeContigs;
pub use hit::{AlignmentHit, ClassifiedHit};
