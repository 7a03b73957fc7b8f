//! Batches of annotated sentences, read lazily from CoNLL-U corpora.
//!
//! The [`io`] module contains the batch codec: a reader and writer for
//! CoNLL-U streams in which every annotated document is a `# newdoc`
//! record. [`BlockCorpus`] builds on it to stream all sentences of a
//! corpus in file order while keeping only one block of batches in
//! memory.

mod error;
pub use crate::error::{Error, ParseError};

mod corpus;
pub use crate::corpus::{BlockCorpus, Blocks};

pub mod io;

pub mod wrap;
