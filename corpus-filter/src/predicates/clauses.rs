use depgraph::graph::{precedes, DepTriple, Sentence};
use depgraph::token::{Token, Tokens};

use super::{FromOptions, Predicate, SUBJECT};
use crate::config::FilterOptions;
use crate::error::Error;
use crate::lexicon::WordList;

/// Quantifiers that are checked when no word list is configured.
static QUANTIFIERS: &[&str] = &[
    "all", "both", "each", "every", "few", "many", "most", "no", "several", "some",
];

/// Exclude sentences where a nominal modifier of the subject intervenes
/// between the subject and its head.
pub struct SubjectModifier;

impl Predicate for SubjectModifier {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();

        sentence
            .dependencies()
            .filter(|triple| triple.relation() == Some("nmod"))
            .any(|modifier| match graph.head(modifier.head()) {
                Some(subject) if subject.in_family(SUBJECT) => {
                    precedes(subject.dependent(), modifier.dependent())
                        && precedes(modifier.dependent(), subject.head())
                }
                _ => false,
            })
    }
}

impl FromOptions for SubjectModifier {
    const NAME: &'static str = "pp-mod-subj";
    const DESCRIPTION: &'static str = "nominal modifier between the subject and its head";

    fn from_options(_options: &FilterOptions) -> Result<Self, Error> {
        Ok(SubjectModifier)
    }
}

/// Exclude sentences with a relative clause attached to the subject.
///
/// The relative clause may also attach to a nominal modifier of the
/// subject, as in *the man near the house that burned*.
pub struct RelativeClause;

impl Predicate for RelativeClause {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();

        sentence
            .dependencies()
            .filter(|triple| triple.relation() == Some("acl:relcl"))
            .filter_map(|clause| graph.head(clause.head()))
            .any(|governor| {
                governor.in_family(SUBJECT)
                    || (governor.relation() == Some("nmod")
                        && graph
                            .head(governor.head())
                            .map_or(false, |triple| triple.in_family(SUBJECT)))
            })
    }
}

impl FromOptions for RelativeClause {
    const NAME: &'static str = "rel-cl";
    const DESCRIPTION: &'static str = "relative clause modifying the subject";

    fn from_options(_options: &FilterOptions) -> Result<Self, Error> {
        Ok(RelativeClause)
    }
}

/// Exclude existential *there* sentences with a quantified subject.
pub struct ExistentialThere {
    quantifiers: WordList,
}

impl ExistentialThere {
    pub fn new(quantifiers: WordList) -> Self {
        ExistentialThere { quantifiers }
    }

    fn quantified(&self, sentence: &Sentence, subject: &DepTriple<&str>) -> bool {
        let is_quantifier =
            |idx| sentence.token(idx).map_or(false, |token| self.quantifiers.contains_token(token));

        is_quantifier(subject.dependent())
            || sentence
                .dep_graph()
                .dependents(subject.dependent())
                .iter()
                .any(|dep| dep.in_family("det") && is_quantifier(dep.dependent()))
    }
}

impl Default for ExistentialThere {
    fn default() -> Self {
        ExistentialThere::new(QUANTIFIERS.iter().collect())
    }
}

fn is_be(token: &Token) -> bool {
    token.lemma().unwrap_or_else(|| token.form()).eq_ignore_ascii_case("be")
}

impl Predicate for ExistentialThere {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();

        sentence
            .tokens()
            .filter(|(_, token)| token.form().eq_ignore_ascii_case("there"))
            .filter_map(|(idx, _)| graph.head(idx))
            .filter(|expletive| expletive.relation() == Some("expl"))
            .filter(|expletive| sentence.token(expletive.head()).map_or(false, is_be))
            .any(|expletive| {
                graph
                    .siblings(expletive.dependent())
                    .iter()
                    .filter(|sibling| sibling.in_family(SUBJECT))
                    .any(|subject| self.quantified(sentence, subject))
            })
    }
}

impl FromOptions for ExistentialThere {
    const NAME: &'static str = "existential-there";
    const DESCRIPTION: &'static str = "existential there with a quantified subject";

    fn from_options(options: &FilterOptions) -> Result<Self, Error> {
        Ok(options
            .load_optional_word_list()?
            .map(ExistentialThere::new)
            .unwrap_or_default())
    }
}

/// Exclude sentences where an auxiliary or copula precedes its subject.
pub struct SubjectAuxInversion;

impl Predicate for SubjectAuxInversion {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();

        sentence
            .dependencies()
            .filter(|triple| triple.in_family("aux") || triple.relation() == Some("cop"))
            .any(|aux| {
                graph.siblings(aux.dependent()).iter().any(|sibling| {
                    sibling.in_family(SUBJECT) && precedes(aux.dependent(), sibling.dependent())
                })
            })
    }
}

impl FromOptions for SubjectAuxInversion {
    const NAME: &'static str = "subj-aux-inversion";
    const DESCRIPTION: &'static str = "auxiliary or copula before its subject";

    fn from_options(_options: &FilterOptions) -> Result<Self, Error> {
        Ok(SubjectAuxInversion)
    }
}
