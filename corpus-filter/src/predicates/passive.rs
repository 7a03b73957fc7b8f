use depgraph::graph::Sentence;
use depgraph::token::Tokens;

use super::{FromOptions, Predicate};
use crate::config::FilterOptions;
use crate::error::Error;
use crate::lexicon::WordList;

/// Relations that mark their governor as passive.
static PASSIVE_RELATIONS: &[&str] = &["aux:pass", "nsubj:pass", "csubj:pass"];

/// Exclude sentences with a passive verb from the verb list.
pub struct Passive {
    verbs: WordList,
}

impl Passive {
    pub fn new(verbs: WordList) -> Self {
        Passive { verbs }
    }
}

impl Predicate for Passive {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();

        sentence
            .tokens()
            .filter(|(_, token)| self.verbs.contains_token(token))
            .any(|(idx, token)| {
                token.has_feature("Voice", "Pass")
                    || graph.dependents(idx).iter().any(|triple| {
                        triple
                            .relation()
                            .map_or(false, |relation| PASSIVE_RELATIONS.contains(&relation))
                    })
            })
    }
}

impl FromOptions for Passive {
    const NAME: &'static str = "passive";
    const DESCRIPTION: &'static str = "passive form of a listed verb";
    const REQUIRES_WORD_LIST: bool = true;

    fn from_options(options: &FilterOptions) -> Result<Self, Error> {
        Ok(Passive::new(options.load_word_list(Self::NAME)?))
    }
}

/// Exclude sentences where a listed verb is the governor of a copula,
/// as in adjectival passives.
pub struct PassiveCopula {
    verbs: WordList,
}

impl PassiveCopula {
    pub fn new(verbs: WordList) -> Self {
        PassiveCopula { verbs }
    }
}

impl Predicate for PassiveCopula {
    fn exclude(&self, sentence: &Sentence) -> bool {
        sentence
            .dependencies()
            .filter(|triple| triple.relation() == Some("cop"))
            .filter_map(|copula| sentence.token(copula.head()))
            .any(|governor| self.verbs.contains_token(governor))
    }
}

impl FromOptions for PassiveCopula {
    const NAME: &'static str = "passive-copula";
    const DESCRIPTION: &'static str = "copula governed by a listed verb";
    const REQUIRES_WORD_LIST: bool = true;

    fn from_options(options: &FilterOptions) -> Result<Self, Error> {
        Ok(PassiveCopula::new(options.load_word_list(Self::NAME)?))
    }
}

#[cfg(test)]
mod tests {
    use depgraph::graph::Sentence;
    use lazy_static::lazy_static;

    use super::{Passive, PassiveCopula};
    use crate::lexicon::WordList;
    use crate::tests::{excludes, sentence};

    lazy_static! {
        static ref VERBS: WordList = vec!["close", "open"].into_iter().collect();
        static ref DOOR_WAS_CLOSED: Sentence = sentence(&[
            ("The", "the", "DET", "_", 2, "det"),
            ("door", "door", "NOUN", "_", 4, "nsubj:pass"),
            ("was", "be", "AUX", "_", 4, "aux:pass"),
            ("closed", "close", "VERB", "VerbForm=Part|Voice=Pass", 0, "root"),
        ]);
        static ref DOOR_WAS_CLOSED_COPULA: Sentence = sentence(&[
            ("The", "the", "DET", "_", 2, "det"),
            ("door", "door", "NOUN", "_", 4, "nsubj"),
            ("was", "be", "AUX", "_", 4, "cop"),
            ("closed", "close", "ADJ", "_", 0, "root"),
        ]);
    }

    #[test]
    fn passive_listed_verb() {
        assert!(excludes(&Passive::new(VERBS.clone()), &DOOR_WAS_CLOSED));
    }

    #[test]
    fn passive_without_voice_feature() {
        let opened = sentence(&[
            ("It", "it", "PRON", "_", 3, "nsubj:pass"),
            ("was", "be", "AUX", "_", 3, "aux:pass"),
            ("opened", "open", "VERB", "_", 0, "root"),
        ]);
        assert!(excludes(&Passive::new(VERBS.clone()), &opened));
    }

    #[test]
    fn passive_unlisted_verb() {
        let eaten = sentence(&[
            ("The", "the", "DET", "_", 2, "det"),
            ("cake", "cake", "NOUN", "_", 4, "nsubj:pass"),
            ("was", "be", "AUX", "_", 4, "aux:pass"),
            ("eaten", "eat", "VERB", "Voice=Pass", 0, "root"),
        ]);
        assert!(!excludes(&Passive::new(VERBS.clone()), &eaten));
    }

    #[test]
    fn active_listed_verb() {
        let closed = sentence(&[
            ("John", "John", "PROPN", "_", 2, "nsubj"),
            ("closed", "close", "VERB", "_", 0, "root"),
            ("the", "the", "DET", "_", 4, "det"),
            ("door", "door", "NOUN", "_", 2, "obj"),
        ]);
        assert!(!excludes(&Passive::new(VERBS.clone()), &closed));
        assert!(!excludes(&PassiveCopula::new(VERBS.clone()), &closed));
    }

    #[test]
    fn copula_with_listed_governor() {
        let predicate = PassiveCopula::new(VERBS.clone());
        assert!(excludes(&predicate, &DOOR_WAS_CLOSED_COPULA));
        assert!(!excludes(&predicate, &DOOR_WAS_CLOSED));
    }
}
