use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Corpus reading error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Error in file IO.
    #[error("error reading corpus")]
    IO(#[from] io::Error),

    /// The corpus file could not be opened.
    #[error("cannot open corpus {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// CoNLL-U parsing error.
    #[error("cannot parse line {line}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    /// Blocks must contain at least one batch.
    #[error("block size must be at least 1")]
    InvalidBlockSize,
}

/// CoNLL-U parsing errors.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// The form is missing in the CoNLL-U data.
    #[error("form field is missing")]
    MissingFormField,

    /// The feature field could not be parsed
    #[error("cannot parse feature field: {value:?}")]
    IncorrectFeatureField { value: String },

    /// An integer field could not be parsed as an integer.
    #[error("cannot parse as integer field: {value:?}")]
    ParseIntField { value: String },

    /// The identifier field could not be parsed.
    #[error("cannot parse as identifier field: {value:?}")]
    ParseIdentifierField { value: String },

    /// Token identifiers must be dense and increasing.
    #[error("expected token identifier {expected}, found {found}")]
    UnexpectedIdentifier { expected: usize, found: usize },

    /// Dependency relation without a head.
    #[error("dependency relation without a head: {token:?}")]
    RelationWithoutHead { token: String },
}
