use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Corpus filtering error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input corpus could not be read.
    #[error(transparent)]
    Corpus(#[from] depcorpus::Error),

    /// An output file could not be created.
    #[error("cannot create output file {path:?}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error writing filter output.
    #[error("error writing filter output")]
    IO(#[from] io::Error),

    /// A filter with the same name was registered before.
    #[error("filter {name:?} is already registered")]
    DuplicateFilter { name: String },

    /// Filter names must be non-empty and must not contain whitespace.
    #[error("invalid filter name {name:?}")]
    InvalidFilterName { name: String },

    /// No filter is registered under the name.
    #[error("unknown filter {name:?}")]
    UnknownFilter { name: String },

    /// The filter needs a word list, but none was configured.
    #[error("filter {filter:?} requires a word list")]
    MissingWordList { filter: String },

    /// The word list could not be read.
    #[error("cannot read word list {path:?}")]
    WordList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
