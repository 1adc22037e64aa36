//! Summaries of result stores for downstream tools.
//!
//! [`table::CallTable`] flattens a directory of per-genome results into one
//! delimited table with a row per genome and a column per locus.

pub mod table;

pub use table::{CallTable, DEFAULT_DELIMITER};
