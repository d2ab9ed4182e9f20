//! strata: hierarchical selection and navigation from the command line.
//!
//! strata loads a flat snapshot of leveled nodes (regions, sites, zones, ...) and lets you
//! replay picker interactions against it: toggling selections, drilling through levels, and
//! filtering columns by search text. The engine lives in `strata-tree`; this crate is the
//! CLI around it.

#![warn(missing_docs)]

pub mod cli;
