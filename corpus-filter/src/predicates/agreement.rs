use depgraph::graph::Sentence;
use depgraph::token::{Token, Tokens};

use super::{FromOptions, Predicate, SUBJECT};
use crate::config::FilterOptions;
use crate::error::Error;
use crate::lexicon::WordList;

static DEMONSTRATIVES: &[&str] = &["this", "that", "these", "those"];

fn is_demonstrative(token: &Token) -> bool {
    token.upos() == Some("DET") && DEMONSTRATIVES.contains(&token.form().to_lowercase().as_str())
}

/// Exclude sentences with a subject from the noun list.
pub struct SubjectAgreement {
    nouns: WordList,
}

impl SubjectAgreement {
    pub fn new(nouns: WordList) -> Self {
        SubjectAgreement { nouns }
    }
}

impl Predicate for SubjectAgreement {
    fn exclude(&self, sentence: &Sentence) -> bool {
        sentence
            .dependencies()
            .filter(|triple| triple.in_family(SUBJECT))
            .filter_map(|triple| sentence.token(triple.dependent()))
            .any(|subject| self.nouns.contains_token(subject))
    }
}

impl FromOptions for SubjectAgreement {
    const NAME: &'static str = "sv-agr";
    const DESCRIPTION: &'static str = "subject is a listed noun (subject-verb agreement)";
    const REQUIRES_WORD_LIST: bool = true;

    fn from_options(options: &FilterOptions) -> Result<Self, Error> {
        Ok(SubjectAgreement::new(options.load_word_list(Self::NAME)?))
    }
}

/// Exclude sentences where a demonstrative determiner is not directly
/// followed by a noun.
///
/// A demonstrative that ends the sentence does not count.
pub struct DemonstrativeAdjective;

impl Predicate for DemonstrativeAdjective {
    fn exclude(&self, sentence: &Sentence) -> bool {
        sentence.tokens().any(|(idx, token)| {
            is_demonstrative(token)
                && sentence
                    .next_token(idx)
                    .map_or(false, |next| !next.upos_in(&["NOUN", "PROPN"]))
        })
    }
}

impl FromOptions for DemonstrativeAdjective {
    const NAME: &'static str = "det-adj-noun";
    const DESCRIPTION: &'static str = "demonstrative determiner not directly followed by a noun";

    fn from_options(_options: &FilterOptions) -> Result<Self, Error> {
        Ok(DemonstrativeAdjective)
    }
}

/// Exclude sentences where a demonstrative determiner is directly
/// followed by a noun from the noun list.
pub struct DemonstrativeNoun {
    nouns: WordList,
}

impl DemonstrativeNoun {
    pub fn new(nouns: WordList) -> Self {
        DemonstrativeNoun { nouns }
    }
}

impl Predicate for DemonstrativeNoun {
    fn exclude(&self, sentence: &Sentence) -> bool {
        sentence.tokens().any(|(idx, token)| {
            is_demonstrative(token)
                && sentence.next_token(idx).map_or(false, |next| {
                    next.upos() == Some("NOUN") && self.nouns.contains_token(next)
                })
        })
    }
}

impl FromOptions for DemonstrativeNoun {
    const NAME: &'static str = "det-noun";
    const DESCRIPTION: &'static str = "demonstrative determiner followed by a listed noun";
    const REQUIRES_WORD_LIST: bool = true;

    fn from_options(options: &FilterOptions) -> Result<Self, Error> {
        Ok(DemonstrativeNoun::new(options.load_word_list(Self::NAME)?))
    }
}
