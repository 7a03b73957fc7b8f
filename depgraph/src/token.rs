//! Tokens in the dependency graph.

use std::collections::BTreeMap;
use std::iter::FromIterator;
use std::ops::Deref;

use crate::graph::{Iter, Node, Sentence};

pub const EMPTY_TOKEN: &str = "_";

/// A builder for `Token`s.
///
/// Most fields of a token are optional, so constructing one field by
/// field gets tedious. This builder provides a fluent interface for
/// creating `Token`s.
pub struct TokenBuilder {
    token: Token,
}

impl TokenBuilder {
    /// Create a `Token` builder with all non-form fields set to absent.
    pub fn new(form: impl Into<String>) -> TokenBuilder {
        TokenBuilder {
            token: Token::new(form),
        }
    }

    /// Set the lemma or stem of the word form.
    pub fn lemma(mut self, lemma: impl Into<String>) -> TokenBuilder {
        self.token.lemma = Some(lemma.into());
        self
    }

    /// Set the universal part-of-speech tag.
    pub fn upos(mut self, upos: impl Into<String>) -> TokenBuilder {
        self.token.upos = Some(upos.into());
        self
    }

    /// Set the language-specific part-of-speech tag.
    pub fn xpos(mut self, xpos: impl Into<String>) -> TokenBuilder {
        self.token.xpos = Some(xpos.into());
        self
    }

    /// Set the morphological features of the token.
    pub fn features(mut self, features: Features) -> TokenBuilder {
        self.token.features = features;
        self
    }
}

impl From<Token> for TokenBuilder {
    fn from(token: Token) -> Self {
        TokenBuilder { token }
    }
}

impl From<TokenBuilder> for Token {
    fn from(builder: TokenBuilder) -> Self {
        builder.token
    }
}

/// A token of an annotated sentence.
///
/// The position, head and dependency relation of a token are not stored
/// in the token itself, but in the graph of the `Sentence` that owns it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    form: String,
    lemma: Option<String>,
    upos: Option<String>,
    xpos: Option<String>,
    features: Features,
}

impl Token {
    /// Create a new token where all the non-form fields are absent.
    pub fn new(form: impl Into<String>) -> Token {
        Token {
            form: form.into(),
            lemma: None,
            upos: None,
            xpos: None,
            features: Features::new(),
        }
    }

    /// Get the word form or punctuation symbol.
    pub fn form(&self) -> &str {
        self.form.as_ref()
    }

    /// Get the lemma or stem of the word form.
    pub fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    /// Get the universal part-of-speech tag.
    pub fn upos(&self) -> Option<&str> {
        self.upos.as_deref()
    }

    /// Get the language-specific part-of-speech tag.
    pub fn xpos(&self) -> Option<&str> {
        self.xpos.as_deref()
    }

    /// Get the morphological features of the token.
    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Returns `true` if the token has the feature `key=value`.
    pub fn has_feature(&self, key: &str, value: &str) -> bool {
        self.features.has(key, value)
    }

    /// Returns `true` if the universal part-of-speech tag is one of `tags`.
    pub fn upos_in(&self, tags: &[&str]) -> bool {
        self.upos().map_or(false, |upos| tags.contains(&upos))
    }
}

/// Token features.
///
/// Morphological features of the token as a key-value mapping, such
/// as `Degree=Sup` or `Reflex=Yes`. An empty mapping means that the
/// token has no features.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Features {
    inner: BTreeMap<String, String>,
}

impl Features {
    /// Construct an empty set of features.
    pub fn new() -> Self {
        Features {
            inner: BTreeMap::new(),
        }
    }

    /// Returns `true` if the feature `key` has the value `value`.
    pub fn has(&self, key: &str, value: &str) -> bool {
        self.inner.get(key).map_or(false, |v| v == value)
    }

    /// Unwrap the contained feature map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.inner
    }
}

impl Deref for Features {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<BTreeMap<String, String>> for Features {
    fn from(feature_map: BTreeMap<String, String>) -> Self {
        Features { inner: feature_map }
    }
}

impl<S, T> FromIterator<(S, T)> for Features
where
    S: Into<String>,
    T: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
    {
        let features = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Features { inner: features }
    }
}

/// Get tokens of a sentence.
pub trait Tokens {
    /// Get an iterator over the tokens in a sentence, paired with
    /// their 1-based indices.
    fn tokens(&self) -> TokenIter;
}

impl Tokens for Sentence {
    fn tokens(&self) -> TokenIter {
        TokenIter {
            inner: self.iter(),
            idx: 0,
        }
    }
}

/// Token iterator.
pub struct TokenIter<'a> {
    inner: Iter<'a>,
    idx: usize,
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = (usize, &'a Token);

    fn next(&mut self) -> Option<Self::Item> {
        for node in &mut self.inner {
            let idx = self.idx;
            self.idx += 1;

            if let Node::Token(token) = node {
                return Some((idx, token));
            }
        }

        None
    }
}
