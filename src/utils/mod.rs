//! Shared helpers for the command-line front end.

pub mod validation;
