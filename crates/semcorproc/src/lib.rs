//! Batch conversion of SemCor-style corpora.
//!
//! The pipeline loads tag files with `semcor-corpus`, resolves lemmas and
//! POS tags against a shared read-only `semcor-lemma` dictionary, flattens
//! each document with [`tokenize`], and hands the result to one of the
//! [`export`] writers. [`context::build_context`] rebuilds the running text
//! around concordance nodes.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod report;
pub mod tokenize;

pub use config::Config;
pub use context::{Boundary, build_context};
pub use error::ExportError;
pub use export::ExportSummary;
pub use tokenize::{DocumentTokens, tokenize};
