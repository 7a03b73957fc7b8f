use std::borrow::Cow;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;
use std::ops::Deref;

use depgraph::graph::{Node, Sentence};
use depgraph::token::{Features, EMPTY_TOKEN};
use itertools::Itertools;

use crate::error::ParseError;

#[derive(Debug, Eq, PartialEq)]
pub struct ConlluFeatures<'a>(pub Cow<'a, Features>);

impl<'a> ConlluFeatures<'a> {
    pub fn borrowed(features: &'a Features) -> Self {
        ConlluFeatures(Cow::Borrowed(features))
    }

    pub fn into_owned(self) -> Features {
        self.0.into_owned()
    }
}

impl ConlluFeatures<'static> {
    pub fn owned(features: Features) -> Self {
        ConlluFeatures(Cow::Owned(features))
    }

    fn parse_features(feature_string: &str) -> Result<Self, ParseError> {
        let mut features = BTreeMap::new();

        if feature_string == EMPTY_TOKEN {
            return Ok(ConlluFeatures::owned(Features::new()));
        }

        for fv in feature_string.split('|') {
            let idx = fv.find('=').ok_or(ParseError::IncorrectFeatureField {
                value: fv.to_owned(),
            })?;

            features.insert(fv[..idx].to_owned(), fv[idx + 1..].to_owned());
        }

        Ok(ConlluFeatures::owned(features.into()))
    }
}

impl<'a> Deref for ConlluFeatures<'a> {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &**self.0
    }
}

impl<'a> fmt::Display for ConlluFeatures<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "{}", EMPTY_TOKEN)
        } else {
            let features_str = self.0.iter().map(|(k, v)| format!("{}={}", k, v)).join("|");
            write!(f, "{}", features_str)
        }
    }
}

impl TryFrom<&str> for ConlluFeatures<'static> {
    type Error = ParseError;

    fn try_from(feature_string: &str) -> Result<Self, Self::Error> {
        Self::parse_features(feature_string)
    }
}

/// CoNLL-U rendering of a sentence: comments, then one line per token.
pub struct ConlluSentence<'a>(pub &'a Sentence);

impl<'a> fmt::Display for ConlluSentence<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for comment in self.0.comments() {
            writeln!(fmt, "{}", comment)?
        }

        let graph = self.0.dep_graph();

        for i in 1..self.0.len() {
            let token = match self.0[i] {
                Node::Token(ref token) => token,
                Node::Root => unreachable!(),
            };

            let head_triple = graph.head(i);
            let head = head_triple
                .as_ref()
                .map(|t| t.head().to_string())
                .unwrap_or_else(|| EMPTY_TOKEN.to_string());
            let head_rel = head_triple
                .as_ref()
                .and_then(|t| t.relation())
                .unwrap_or(EMPTY_TOKEN);

            writeln!(
                fmt,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t_\t_",
                i,
                token.form(),
                token.lemma().unwrap_or(EMPTY_TOKEN),
                token.upos().unwrap_or(EMPTY_TOKEN),
                token.xpos().unwrap_or(EMPTY_TOKEN),
                ConlluFeatures::borrowed(token.features()),
                head,
                head_rel,
            )?;
        }

        Ok(())
    }
}
