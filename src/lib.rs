#![forbid(unsafe_code)]
//! # platetag
//!
//! Builds per-library **tag assignment files** for DNA metabarcoding runs
//! from 96-well plate layout spreadsheets and a tag lookup table.
//!
//! A run reads one tag file mapping `(plate, well)` to a nucleotide tag and
//! one or more library layout exports, assigns the forward/reverse primer
//! pair of the chosen assay from a compiled-in registry, disambiguates
//! repeated sample names with a `_rptN` suffix, and writes one TSV per
//! library with a row for every well of the 4×96 grid (placeholder
//! `not_usedN` rows for wells without a sample).
//!
//! ## Highlights
//! - **Deterministic output**: one documented canonical well order drives
//!   repeat numbering and row emission (see [`well`]).
//! - **Fail before writing**: primer key, tag table and sample names are all
//!   validated before the first output file is created.
//! - **Compiled-in primers**: the assay registry lives in [`primers`]; see
//!   `platetag --list-primers`.
//!
//! ## Example
//! ```no_run
//! use platetag::prep::{run_prep, PrepOpts};
//! let opts = PrepOpts {
//!     tags: "tags.tsv".into(),
//!     libraries: vec!["LibA.layout.tsv".into()],
//!     primer: Some("12s".into()),
//!     outdir: "out".into(),
//!     not_used: vec![],
//!     matrix: None,
//! };
//! run_prep(opts).unwrap();
//! ```

pub mod library;
pub mod output;
pub mod prep;
pub mod primers;
pub mod repeats;
pub mod tags;
pub mod well;

pub use library::Library;
pub use prep::{run_prep, PrepOpts};
pub use primers::{get_primer_set, list_primer_rows, PrimerSet};
pub use tags::TagTable;
pub use well::Well;

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
