//! Reflexive binding across clause boundaries.

use depgraph::graph::{precedes, DepGraph, DepTriple, Sentence};
use depgraph::token::Tokens;

use super::{FromOptions, Predicate, SUBJECT};
use crate::config::FilterOptions;
use crate::error::Error;

/// Clausal complements that start a new binding domain.
static CLAUSE_BOUNDARIES: &[&str] = &["ccomp", "xcomp", "advcl"];

fn crosses_clause(triple: &DepTriple<&str>, boundaries: &[&str]) -> bool {
    boundaries.iter().any(|&family| triple.in_family(family))
}

fn reflexives(sentence: &Sentence) -> impl Iterator<Item = usize> + '_ {
    sentence
        .tokens()
        .filter(|(_, token)| token.has_feature("Reflex", "Yes"))
        .map(|(idx, _)| idx)
}

/// Find a subject outside the clause of `reflexive`.
///
/// Ascends from the reflexive to the first clause boundary and returns a
/// subject of the governor above it that precedes the reflexive and is
/// not co-indexed with it.
fn outside_subject<'a>(graph: DepGraph<'a>, reflexive: usize) -> Option<DepTriple<&'a str>> {
    let boundary = graph
        .head_chain(reflexive)?
        .into_iter()
        .find(|triple| crosses_clause(triple, CLAUSE_BOUNDARIES))?;

    graph.dependents(boundary.head()).into_iter().find(|triple| {
        triple.in_family(SUBJECT)
            && precedes(triple.dependent(), reflexive)
            && !graph.co_indexed(triple.dependent(), reflexive)
    })
}

/// Exclude sentences where a relative clause on the subject intervenes
/// between the subject and a co-indexed reflexive.
pub struct BindingCCommand;

impl Predicate for BindingCCommand {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();

        reflexives(sentence).any(|reflexive| {
            sentence
                .dependencies()
                .filter(|triple| triple.in_family(SUBJECT))
                .map(|subject| subject.dependent())
                .filter(|&subject| {
                    precedes(subject, reflexive) && graph.co_indexed(subject, reflexive)
                })
                .any(|subject| {
                    sentence.window(subject, reflexive).any(|triple| {
                        triple.relation() == Some("acl:relcl") && triple.head() == subject
                    })
                })
        })
    }
}

impl FromOptions for BindingCCommand {
    const NAME: &'static str = "binding-c-command";
    const DESCRIPTION: &'static str = "reflexive bound by a subject across its relative clause";

    fn from_options(_options: &FilterOptions) -> Result<Self, Error> {
        Ok(BindingCCommand)
    }
}

/// Exclude sentences with a reflexive in an embedded clause that is
/// preceded by a subject of the embedding clause.
pub struct BindingDomain;

impl Predicate for BindingDomain {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();
        reflexives(sentence).any(|reflexive| outside_subject(graph, reflexive).is_some())
    }
}

impl FromOptions for BindingDomain {
    const NAME: &'static str = "binding-domain";
    const DESCRIPTION: &'static str = "reflexive in a clause embedded under a preceding subject";

    fn from_options(_options: &FilterOptions) -> Result<Self, Error> {
        Ok(BindingDomain)
    }
}

/// Like [`BindingDomain`], but the embedded clause must be introduced by
/// a complementizer between the subject and the reflexive.
pub struct BindingComplementizer;

impl Predicate for BindingComplementizer {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();

        reflexives(sentence).any(|reflexive| match outside_subject(graph, reflexive) {
            Some(subject) => sentence
                .window(subject.dependent(), reflexive)
                .any(|triple| triple.in_family("mark")),
            None => false,
        })
    }
}

impl FromOptions for BindingComplementizer {
    const NAME: &'static str = "binding-complementizer";
    const DESCRIPTION: &'static str = "reflexive in a complementizer clause under a preceding subject";

    fn from_options(_options: &FilterOptions) -> Result<Self, Error> {
        Ok(BindingComplementizer)
    }
}

/// Exclude sentences where a reflexive is the subject of an embedded
/// clause whose governor has a preceding subject.
pub struct BindingCase;

impl Predicate for BindingCase {
    fn exclude(&self, sentence: &Sentence) -> bool {
        let graph = sentence.dep_graph();

        reflexives(sentence).any(|reflexive| {
            let chain = match graph.head_chain(reflexive) {
                Some(chain) => chain,
                None => return false,
            };

            match chain.as_slice() {
                [own, clause, ..]
                    if own.in_family(SUBJECT) && crosses_clause(clause, &["ccomp", "xcomp"]) =>
                {
                    graph.dependents(clause.head()).iter().any(|triple| {
                        triple.in_family(SUBJECT) && precedes(triple.dependent(), reflexive)
                    })
                }
                _ => false,
            }
        })
    }
}

impl FromOptions for BindingCase {
    const NAME: &'static str = "binding-case";
    const DESCRIPTION: &'static str = "reflexive as the subject of an embedded clause";

    fn from_options(_options: &FilterOptions) -> Result<Self, Error> {
        Ok(BindingCase)
    }
}
