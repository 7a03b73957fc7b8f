use depgraph::graph::{DepTriple, Sentence};
use depgraph::token::{Token, Tokens};

use super::{FromOptions, Predicate};
use crate::config::FilterOptions;
use crate::error::Error;
use crate::lexicon::WordList;

/// Relation families of objects and obliques.
static OBJECTS: &[&str] = &["obj", "iobj", "obl"];

/// Exclude sentences with a superlative or comparative inside an object
/// or oblique.
pub struct SuperlativeQuantifier;

impl Predicate for SuperlativeQuantifier {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();

        sentence
            .tokens()
            .filter(|(_, token)| {
                token.has_feature("Degree", "Sup") || token.has_feature("Degree", "Cmp")
            })
            .filter_map(|(idx, _)| graph.head_chain(idx))
            .any(|chain| {
                chain
                    .iter()
                    .any(|triple| OBJECTS.iter().any(|&family| triple.in_family(family)))
            })
    }
}

impl FromOptions for SuperlativeQuantifier {
    const NAME: &'static str = "superlative-quantifier";
    const DESCRIPTION: &'static str = "superlative or comparative inside an object or oblique";

    fn from_options(_options: &FilterOptions) -> Result<Self, Error> {
        Ok(SuperlativeQuantifier)
    }
}

fn is_negation(token: &Token) -> bool {
    token.has_feature("Polarity", "Neg") || token.has_feature("PronType", "Neg")
}

/// Exclude sentences with a negative polarity item that is licensed by
/// a negation.
///
/// The negation licenses the item when it is co-indexed with the item
/// or with one of its ancestors.
pub struct NegativePolarity {
    items: WordList,
}

impl NegativePolarity {
    pub fn new(items: WordList) -> Self {
        NegativePolarity { items }
    }
}

impl Predicate for NegativePolarity {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();

        let negation_heads = sentence
            .tokens()
            .filter(|(_, token)| is_negation(token))
            .filter_map(|(idx, _)| graph.head(idx))
            .collect::<Vec<_>>();
        if negation_heads.is_empty() {
            return false;
        }

        sentence
            .tokens()
            .filter(|(_, token)| self.items.contains_token(token))
            .filter_map(|(idx, _)| graph.head_chain(idx).map(|chain| (idx, chain)))
            .any(|(item, chain)| {
                chain.iter().map(DepTriple::head).any(|governor| {
                    governor != 0
                        && negation_heads.iter().any(|negation| {
                            negation.dependent() != item && negation.head() == governor
                        })
                })
            })
    }
}

impl FromOptions for NegativePolarity {
    const NAME: &'static str = "npi";
    const DESCRIPTION: &'static str = "negative polarity item licensed by a negation";
    const REQUIRES_WORD_LIST: bool = true;

    fn from_options(options: &FilterOptions) -> Result<Self, Error> {
        Ok(NegativePolarity::new(options.load_word_list(Self::NAME)?))
    }
}
