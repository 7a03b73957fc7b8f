//! Partition dependency-parsed corpora with structural predicates.
//!
//! A filter combines a [`depcorpus::BlockCorpus`], a
//! [`predicates::Predicate`], and an [`output::OutputPartitioner`].
//! Every sentence of the corpus is evaluated by the predicate and
//! written to the accept output, or to the reject output when the
//! predicate excludes it. Filters are looked up by name in the
//! [`registry()`].

mod config;
pub use crate::config::FilterOptions;

mod error;
pub use crate::error::Error;

pub mod filter;

mod lexicon;
pub use crate::lexicon::WordList;

pub mod output;

pub mod predicates;

mod progress;

pub mod registry;
pub use crate::registry::{registry, FilterEntry, FilterRegistry};

#[cfg(test)]
mod tests;
