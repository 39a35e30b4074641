//! Lemma and part-of-speech resolution for SemCor tokens.
//!
//! The [`LemmaDictionary`] records, for every word form seen in the corpus,
//! the first lemma observed under each POS tag. It is built once with a
//! [`DictionaryBuilder`], persisted as JSON, and then shared read-only with
//! every resolver call.
//!
//! # How it works
//! 1. Tags that carry both `pos` and `lemma` feed the dictionary directly;
//!    closed-class tags without a lemma contribute their lowercased form.
//! 2. [`LemmaDictionary::token_from_tag`] fills in a missing lemma and
//!    records whether the dictionary agreed on it.
//! 3. [`LemmaDictionary::expand`] splits multiword expressions (`take_over`)
//!    and resolves each component on its own, aligning with the parent lemma
//!    when the part counts match.
//!
//! The crate only depends on the [`TaggedNode`](semcor_types::TaggedNode)
//! trait, so any loader can drive it.
//!
//! # Example
//! ```no_run
//! use semcor_lemma::LemmaDictionary;
//! use semcor_types::Status;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dict = LemmaDictionary::load("output/lemma_dictionary.json")?;
//! let (lemma, status) = dict.resolve_lemma("banks", "NN", None);
//! if status == Status::Unsure {
//!     println!("guessing {lemma}");
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see
//! `cargo run -p semcor-lemma --example lookup -- <dictionary.json> <word>`.

mod dictionary;
mod resolve;

pub use dictionary::{DictionaryBuilder, LemmaDictionary, PosLemmas};
