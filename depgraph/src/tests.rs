use std::iter::FromIterator;

use lazy_static::lazy_static;
use maplit::btreemap;

use crate::graph::{Comment, DepTriple, Sentence};
use crate::token::{Features, Token, TokenBuilder};

lazy_static! {
    pub static ref TEST_SENTENCES: Vec<Sentence> = {
        let mut sentences = Vec::new();

        let mut s1 = Sentence::new();
        s1.comments_mut().push(Comment::AttrVal {
            attr: "sent_id".to_string(),
            val: "1".to_string(),
        });
        s1.set_text("The man near Paris left.");
        s1.push(TokenBuilder::new("The").lemma("the").upos("DET").into());
        s1.push(
            TokenBuilder::new("man")
                .lemma("man")
                .upos("NOUN")
                .features(Features::from_iter(btreemap! { "Number" => "Sing" }))
                .into(),
        );
        s1.push(TokenBuilder::new("near").lemma("near").upos("ADP").into());
        s1.push(TokenBuilder::new("Paris").lemma("Paris").upos("PROPN").into());
        s1.push(TokenBuilder::new("left").lemma("leave").upos("VERB").into());
        s1.push(TokenBuilder::new(".").lemma(".").upos("PUNCT").into());

        for (head, rel, dependent) in &[
            (2, "det", 1),
            (5, "nsubj", 2),
            (4, "case", 3),
            (2, "nmod", 4),
            (0, "root", 5),
            (5, "punct", 6),
        ] {
            s1.dep_graph_mut()
                .add_deprel(DepTriple::new(*head, Some(*rel), *dependent))
                .unwrap();
        }

        sentences.push(s1);

        let mut s2 = Sentence::new();
        s2.push(TokenBuilder::new("Dogs").lemma("dog").upos("NOUN").into());
        s2.push(TokenBuilder::new("bark").lemma("bark").upos("VERB").into());
        s2.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("nsubj"), 1))
            .unwrap();
        s2.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 2))
            .unwrap();
        sentences.push(s2);

        sentences
    };
}

/// A malformed sentence whose first two tokens govern each other.
pub fn cyclic_sentence() -> Sentence {
    let mut sentence = Sentence::from_iter(vec![Token::new("a"), Token::new("b"), Token::new("c")]);
    for (head, dependent) in &[(2, 1), (1, 2), (1, 3)] {
        sentence
            .dep_graph_mut()
            .add_deprel(DepTriple::new(*head, Some("dep"), *dependent))
            .unwrap();
    }
    sentence
}
