//! Word lists for lexical predicates.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter::FromIterator;
use std::path::Path;

use depgraph::token::Token;

use crate::error::Error;

/// A set of lowercased words or lemmas.
///
/// Word lists are plain-text files with one word per line. Entries are
/// trimmed and lowercased; blank lines are ignored.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Read a word list from a file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let word_list_error = |source| Error::WordList {
            path: path.to_owned(),
            source,
        };

        let file = File::open(path).map_err(word_list_error)?;
        Self::from_reader(BufReader::new(file)).map_err(word_list_error)
    }

    /// Read a word list from a buffered reader.
    pub fn from_reader(read: impl BufRead) -> io::Result<Self> {
        let mut words = HashSet::new();
        for line in read.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.insert(word.to_lowercase());
            }
        }

        Ok(WordList { words })
    }

    /// Returns `true` if the lowercased `word` is in the list.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Returns `true` if the form or the lemma of `token` is in the list.
    pub fn contains_token(&self, token: &Token) -> bool {
        self.contains(token.form()) || token.lemma().map_or(false, |lemma| self.contains(lemma))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S> FromIterator<S> for WordList
where
    S: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let words = iter
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();

        WordList { words }
    }
}
