use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::lexicon::WordList;
use crate::output::RenderMode;

/// Options of a single filter run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterOptions {
    /// CoNLL-U corpus to filter.
    pub input: PathBuf,

    /// Output for sentences that are kept.
    pub accept: PathBuf,

    /// Output for excluded sentences. Excluded sentences are discarded
    /// when absent.
    pub reject: Option<PathBuf>,

    /// Number of batches that are read at a time.
    pub block_size: usize,

    /// Word list for lexical predicates.
    pub word_list: Option<PathBuf>,

    pub render: RenderMode,

    /// Show a progress spinner while filtering.
    pub progress: bool,
}

impl FilterOptions {
    pub fn new(input: impl Into<PathBuf>, accept: impl Into<PathBuf>) -> Self {
        FilterOptions {
            input: input.into(),
            accept: accept.into(),
            reject: None,
            block_size: 1,
            word_list: None,
            render: RenderMode::default(),
            progress: false,
        }
    }

    pub fn reject(mut self, reject: impl Into<PathBuf>) -> Self {
        self.reject = Some(reject.into());
        self
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn word_list(mut self, word_list: impl Into<PathBuf>) -> Self {
        self.word_list = Some(word_list.into());
        self
    }

    pub fn render(mut self, render: RenderMode) -> Self {
        self.render = render;
        self
    }

    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Load the word list that `filter` requires.
    pub fn load_word_list(&self, filter: &str) -> Result<WordList, Error> {
        match self.load_optional_word_list()? {
            Some(list) => Ok(list),
            None => Err(Error::MissingWordList {
                filter: filter.to_owned(),
            }),
        }
    }

    /// Load the word list, if one is configured.
    pub fn load_optional_word_list(&self) -> Result<Option<WordList>, Error> {
        self.word_list.as_deref().map(WordList::read).transpose()
    }

    pub(crate) fn reject_path(&self) -> Option<&Path> {
        self.reject.as_deref()
    }
}
