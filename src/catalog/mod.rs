//! Per-locus allele catalogs.
//!
//! Every locus has a FASTA file whose records map an allele identifier to its
//! sequence. The same file is the aligner query for that locus. Catalogs only
//! grow: new full-length sequences are appended with the next integer
//! identifier, and existing records are never rewritten.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fsac::catalog::lock::{CatalogLock, LocusLocks};
//! use fsac::catalog::store::{AlleleCatalog, CatalogError};
//! use std::path::Path;
//!
//! let locks = LocusLocks::new();
//! let identifier = locks.serialize("aroC", || -> Result<String, CatalogError> {
//!     let mut catalog = AlleleCatalog::load(Path::new("alleles/aroC.fasta"))?;
//!     catalog.assign("ATGGCC")
//! }).unwrap();
//! ```

pub mod lock;
pub mod loci;
pub mod store;

pub use lock::{CatalogLock, LocusLocks, Unlocked};
pub use loci::LocusSet;
pub use store::{AlleleCatalog, CatalogError};
