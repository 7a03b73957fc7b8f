use std::convert::TryFrom;

use depcorpus::wrap::ConlluFeatures;
use depgraph::graph::{DepTriple, Sentence};
use depgraph::token::TokenBuilder;
use itertools::Itertools;
use lazy_static::lazy_static;

use crate::predicates::Predicate;

/// Token row: form, lemma, universal tag, features, head, relation.
pub type Row<'a> = (&'a str, &'a str, &'a str, &'a str, usize, &'a str);

/// Build a sentence from token rows, numbered from 1.
pub fn sentence(rows: &[Row]) -> Sentence {
    let mut sentence = Sentence::new();
    sentence.set_text(rows.iter().map(|row| row.0).join(" "));

    for &(form, lemma, upos, features, _, _) in rows {
        let features = ConlluFeatures::try_from(features).unwrap().into_owned();
        sentence.push(
            TokenBuilder::new(form)
                .lemma(lemma)
                .upos(upos)
                .features(features)
                .into(),
        );
    }

    for (idx, &(_, _, _, _, head, relation)) in rows.iter().enumerate() {
        sentence
            .dep_graph_mut()
            .add_deprel(DepTriple::new(head, Some(relation), idx + 1))
            .unwrap();
    }

    sentence
}

/// Evaluate a predicate twice, checking that it gives the same answer.
pub fn excludes(predicate: &impl Predicate, sentence: &Sentence) -> bool {
    let first = predicate.exclude(sentence);
    assert_eq!(
        first,
        predicate.exclude(sentence),
        "predicate is not stable on {:?}",
        sentence.text()
    );
    first
}

lazy_static! {
    /// A small corpus with one sentence that `pp-mod-subj` excludes.
    pub static ref TEST_SENTENCES: Vec<Sentence> = vec![
        sentence(&[
            ("The", "the", "DET", "_", 2, "det"),
            ("man", "man", "NOUN", "Number=Sing", 5, "nsubj"),
            ("near", "near", "ADP", "_", 4, "case"),
            ("Paris", "Paris", "PROPN", "_", 2, "nmod"),
            ("left", "leave", "VERB", "Tense=Past", 0, "root"),
        ]),
        sentence(&[
            ("Dogs", "dog", "NOUN", "Number=Plur", 2, "nsubj"),
            ("bark", "bark", "VERB", "_", 0, "root"),
        ]),
        sentence(&[
            ("The", "the", "DET", "_", 2, "det"),
            ("cat", "cat", "NOUN", "Number=Sing", 3, "nsubj"),
            ("slept", "sleep", "VERB", "Tense=Past", 0, "root"),
        ]),
    ];
}
