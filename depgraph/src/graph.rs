//! Dependency graphs.

use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;
use std::ops::Index;

use petgraph::graph::{node_index, DiGraph, NodeIndices};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::GraphError;
use crate::token::Token;

/// Name of the comment attribute that holds the surface text.
pub const TEXT_ATTR: &str = "text";

/// Dependency graph node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// Virtual root node.
    Root,

    /// Token node.
    Token(Token),
}

impl Node {
    pub fn is_root(&self) -> bool {
        !self.is_token()
    }

    pub fn is_token(&self) -> bool {
        match self {
            Node::Root => false,
            Node::Token(_) => true,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Node::Root => None,
            Node::Token(token) => Some(token),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// Sentence comment.
pub enum Comment {
    /// Attribute-value pair
    AttrVal { attr: String, val: String },

    /// String comment
    String(String),
}

impl Comment {
    /// Get the comment attribute value pair.
    pub fn attr_val(&self) -> Option<(&str, &str)> {
        match self {
            Comment::AttrVal { attr, val } => Some((attr, val)),
            Comment::String(_) => None,
        }
    }
}

impl Display for Comment {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Comment::AttrVal { attr, val } => write!(fmt, "# {} = {}", attr, val),
            Comment::String(val) => write!(fmt, "# {}", val),
        }
    }
}

/// Returns `true` if token `a` linearly precedes token `b`.
pub fn precedes(a: usize, b: usize) -> bool {
    a < b
}

/// Returns `true` if `relation` belongs to the label family `family`.
///
/// Families are prefixes, so `nsubj:pass` and `nsubj` are both in the
/// `nsubj` family.
pub fn in_family(relation: &str, family: &str) -> bool {
    relation.starts_with(family)
}

/// A dependency triple.
///
/// A dependency triple consists of: a head index; a dependent index; and
/// an optional dependency label.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct DepTriple<S> {
    head: usize,
    dependent: usize,
    relation: Option<S>,
}

impl<S> DepTriple<S> {
    /// Construct a new dependency triple.
    pub fn new(head: usize, relation: Option<S>, dependent: usize) -> Self {
        DepTriple {
            head,
            dependent,
            relation,
        }
    }

    /// Get the dependent.
    pub fn dependent(&self) -> usize {
        self.dependent
    }

    /// Get the head.
    pub fn head(&self) -> usize {
        self.head
    }
}

impl<S> DepTriple<S>
where
    S: Borrow<str>,
{
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_ref().map(Borrow::borrow)
    }

    /// Returns `true` if the relation label is in `family`.
    ///
    /// Unlabeled relations are in no family.
    pub fn in_family(&self, family: &str) -> bool {
        self.relation().map_or(false, |rel| in_family(rel, family))
    }
}

/// Dependency edge: the optional relation label.
pub type Edge = Option<String>;

/// A dependency-parsed sentence.
///
/// `Sentence` stores a dependency graph. The nodes in the graph (except
/// the virtual root at index 0) are tokens, where the index of a token
/// is its 1-based position in the sentence. Dependency relations are
/// stored as edges from head to dependent.
///
/// This data structure is a thin wrapper around the `petgraph` `DiGraph`
/// that enforces single-headedness. It does not enforce acyclicity, so
/// queries that follow heads are bounded by the sentence length.
#[derive(Clone, Debug)]
pub struct Sentence {
    comments: Vec<Comment>,
    graph: DiGraph<Node, Edge>,
}

#[allow(clippy::len_without_is_empty)]
impl Sentence {
    /// Construct a new sentence.
    ///
    /// The sentence will be constructed such that the first node is
    /// the root of the dependency graph:
    ///
    /// ```
    /// use depgraph::graph::{Node, Sentence};
    ///
    /// let sentence = Sentence::new();
    /// assert_eq!(sentence[0], Node::Root);
    /// ```
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        graph.add_node(Node::Root);
        Sentence {
            comments: Vec::new(),
            graph,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.comments
    }

    /// Get the original surface text of the sentence, if recorded.
    pub fn text(&self) -> Option<&str> {
        self.comments
            .iter()
            .filter_map(Comment::attr_val)
            .find(|(attr, _)| *attr == TEXT_ATTR)
            .map(|(_, val)| val)
    }

    /// Set the original surface text of the sentence.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        for comment in &mut self.comments {
            if let Comment::AttrVal { attr, val } = comment {
                if attr == TEXT_ATTR {
                    *val = text;
                    return;
                }
            }
        }

        self.comments.push(Comment::AttrVal {
            attr: TEXT_ATTR.to_string(),
            val: text,
        });
    }

    /// Get an iterator over the nodes in the graph.
    pub fn iter(&self) -> Iter {
        Iter {
            inner: self.graph.node_indices(),
            graph: &self.graph,
        }
    }

    /// Add a new token to the graph.
    ///
    /// Tokens should always be pushed in sentence order.
    ///
    /// Returns the index of the token. The first pushed token has index 1,
    /// since index 0 is reserved by the root of the graph.
    pub fn push(&mut self, token: Token) -> usize {
        self.graph.add_node(Node::Token(token)).index()
    }

    /// Get the dependency graph.
    pub fn dep_graph(&self) -> DepGraph {
        DepGraph { inner: &self.graph }
    }

    /// Get the graph mutably.
    pub fn dep_graph_mut(&mut self) -> DepGraphMut {
        DepGraphMut {
            inner: &mut self.graph,
        }
    }

    /// Get the number of nodes in the dependency graph.
    ///
    /// This is equal to the number of tokens, plus one root node.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the token with the given index.
    ///
    /// Returns `None` for the root and for indices past the last token.
    pub fn token(&self, idx: usize) -> Option<&Token> {
        if idx >= self.len() {
            return None;
        }

        self[idx].token()
    }

    /// Get the token that immediately follows token `idx`.
    pub fn next_token(&self, idx: usize) -> Option<&Token> {
        self.token(idx + 1)
    }

    /// Get the dependency relations of the sentence.
    ///
    /// Relations are returned in the order of their dependents, which is
    /// the word order of the sentence. Tokens without a head are skipped.
    pub fn dependencies(&self) -> impl Iterator<Item = DepTriple<&str>> {
        let graph = self.dep_graph();
        (1..self.len()).filter_map(move |dependent| graph.head(dependent))
    }

    /// Get the dependency relations whose dependent lies in `[low, high)`.
    pub fn window(&self, low: usize, high: usize) -> impl Iterator<Item = DepTriple<&str>> {
        let graph = self.dep_graph();
        (low.max(1)..high.min(self.len())).filter_map(move |dependent| graph.head(dependent))
    }
}

impl Default for Sentence {
    fn default() -> Self {
        Sentence::new()
    }
}

impl FromIterator<Token> for Sentence {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Token>,
    {
        let mut sentence = Sentence::new();
        for token in iter {
            sentence.push(token);
        }
        sentence
    }
}

/// Iterator over the nodes in a dependency graph.
pub struct Iter<'a> {
    inner: NodeIndices,
    graph: &'a DiGraph<Node, Edge>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|idx| &self.graph[idx])
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Eq for Sentence {}

impl Index<usize> for Sentence {
    type Output = Node;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.graph[node_index(idx)]
    }
}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        self.comments == other.comments && self.dep_graph() == other.dep_graph()
    }
}

/// A graph view.
///
/// This data structure provides a view of a sentence's dependency graph.
/// The view can be used to retrieve the dependents of a head or the head
/// of a dependent, and to walk the chain of heads towards the root.
#[derive(Clone, Copy)]
pub struct DepGraph<'a> {
    inner: &'a DiGraph<Node, Edge>,
}

#[allow(clippy::len_without_is_empty)]
impl<'a> DepGraph<'a> {
    /// Return the dependents of `head`, ordered by dependent index.
    pub fn dependents(&self, head: usize) -> Vec<DepTriple<&'a str>> {
        if head >= self.len() {
            return Vec::new();
        }

        let mut dependents = self
            .inner
            .edges_directed(node_index(head), Direction::Outgoing)
            .map(|e| DepTriple::new(e.source().index(), e.weight().as_deref(), e.target().index()))
            .collect::<Vec<_>>();
        dependents.sort_by_key(DepTriple::dependent);
        dependents
    }

    /// Return the head relation of `dependent`, if any.
    pub fn head(&self, dependent: usize) -> Option<DepTriple<&'a str>> {
        if dependent >= self.len() {
            return None;
        }

        self.inner
            .edges_directed(node_index(dependent), Direction::Incoming)
            .next()
            .map(|e| DepTriple::new(e.source().index(), e.weight().as_deref(), e.target().index()))
    }

    /// Return the chain of head relations from `dependent` up to the root.
    ///
    /// The first relation is the head relation of `dependent`, the last
    /// one is attached to the virtual root. Returns `None` when the chain
    /// does not reach the root: when a token on the way has no head, or
    /// when the heads form a cycle. Ascent takes at most one step per
    /// token.
    pub fn head_chain(&self, dependent: usize) -> Option<Vec<DepTriple<&'a str>>> {
        let mut chain = Vec::new();
        let mut current = dependent;

        for _ in 1..self.len() {
            let triple = self.head(current)?;
            current = triple.head();
            chain.push(triple);

            if current == 0 {
                return Some(chain);
            }
        }

        None
    }

    /// Returns `true` if the distinct tokens `a` and `b` are governed by the
    /// same head.
    pub fn co_indexed(&self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }

        match (self.head(a), self.head(b)) {
            (Some(head_a), Some(head_b)) => head_a.head() == head_b.head(),
            _ => false,
        }
    }

    /// Return the relations of the other dependents of `dependent`'s head.
    pub fn siblings(&self, dependent: usize) -> Vec<DepTriple<&'a str>> {
        match self.head(dependent) {
            Some(triple) => self
                .dependents(triple.head())
                .into_iter()
                .filter(|sibling| sibling.dependent() != dependent)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Get the number of nodes in the dependency graph.
    ///
    /// This is equal to the number of tokens, plus one root node.
    pub fn len(&self) -> usize {
        self.inner.node_count()
    }
}

impl<'a> Eq for DepGraph<'a> {}

impl<'a> Index<usize> for DepGraph<'a> {
    type Output = Node;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.inner[node_index(idx)]
    }
}

impl<'a, 'b> PartialEq<DepGraph<'b>> for DepGraph<'a> {
    fn eq(&self, other: &DepGraph<'b>) -> bool {
        // Cheap checks
        if self.inner.node_count() != other.inner.node_count()
            || self.inner.edge_count() != other.inner.edge_count()
        {
            return false;
        }

        for i in 0..self.len() {
            // Nodes should be equal.
            if self[i] != other[i] {
                return false;
            }

            // Relation to a token's head should be the same.
            if self.head(i) != other.head(i) {
                return false;
            }
        }

        true
    }
}

/// A mutable graph view, used to attach tokens to their heads.
pub struct DepGraphMut<'a> {
    inner: &'a mut DiGraph<Node, Edge>,
}

impl<'a> DepGraphMut<'a> {
    /// Add a dependency relation between `head` and `dependent`.
    ///
    /// If `dependent` already has a head relation, this relation is removed
    /// to ensure single-headedness.
    pub fn add_deprel<S>(&mut self, triple: DepTriple<S>) -> Result<(), GraphError>
    where
        S: Into<String>,
    {
        if triple.head() >= self.inner.node_count() {
            return Err(GraphError::HeadOutOfBounds {
                head: triple.head(),
                node_count: self.inner.node_count(),
            });
        }

        if triple.dependent() >= self.inner.node_count() {
            return Err(GraphError::DependentOutOfBounds {
                dependent: triple.dependent(),
                node_count: self.inner.node_count(),
            });
        }

        // Remove existing head relation (when present).
        if let Some(id) = self
            .inner
            .edges_directed(node_index(triple.dependent), Direction::Incoming)
            .map(|e| e.id())
            .next()
        {
            self.inner.remove_edge(id);
        }

        self.inner.add_edge(
            node_index(triple.head),
            node_index(triple.dependent),
            triple.relation.map(Into::into),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{in_family, precedes, DepTriple, Node, Sentence, Token};
    use crate::tests::{cyclic_sentence, TEST_SENTENCES};
    use crate::token::TokenBuilder;

    #[test]
    fn add_deprel() {
        let mut g = Sentence::default();
        g.push(Token::new("dogs"));
        g.push(Token::new("bark"));
        g.push(Token::new("loudly"));
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("wrong"), 1))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 2))
            .unwrap();

        assert!(g.dep_graph().head(0).is_none());
        assert_eq!(
            g.dep_graph().head(1),
            Some(DepTriple::new(0, Some("wrong"), 1))
        );
        assert!(g.dep_graph().head(3).is_none());

        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("nsubj"), 1))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("advmod"), 3))
            .unwrap();
        assert_eq!(
            g.dep_graph().head(1),
            Some(DepTriple::new(2, Some("nsubj"), 1))
        );
        assert_eq!(
            g.dep_graph().head(3),
            Some(DepTriple::new(2, Some("advmod"), 3))
        );
    }

    #[test]
    fn dependents_are_in_word_order() {
        let sentence = &TEST_SENTENCES[0];
        let graph = sentence.dep_graph();

        assert_eq!(graph.dependents(0), vec![DepTriple::new(0, Some("root"), 5)]);
        assert_eq!(
            graph.dependents(2),
            vec![
                DepTriple::new(2, Some("det"), 1),
                DepTriple::new(2, Some("nmod"), 4)
            ]
        );
        assert!(graph.dependents(1).is_empty());
        assert!(graph.dependents(42).is_empty());
    }

    #[test]
    fn dependencies_are_in_word_order() {
        let deps = TEST_SENTENCES[0]
            .dependencies()
            .map(|t| t.dependent())
            .collect::<Vec<_>>();
        assert_eq!(deps, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn window_is_half_open() {
        let deps = TEST_SENTENCES[0]
            .window(2, 5)
            .map(|t| t.dependent())
            .collect::<Vec<_>>();
        assert_eq!(deps, vec![2, 3, 4]);

        assert_eq!(TEST_SENTENCES[0].window(0, 100).count(), 6);
        assert_eq!(TEST_SENTENCES[0].window(5, 2).count(), 0);
    }

    #[test]
    fn head_chain_reaches_root() {
        let chain = TEST_SENTENCES[0].dep_graph().head_chain(3).unwrap();
        assert_eq!(
            chain,
            vec![
                DepTriple::new(4, Some("case"), 3),
                DepTriple::new(2, Some("nmod"), 4),
                DepTriple::new(5, Some("nsubj"), 2),
                DepTriple::new(0, Some("root"), 5),
            ]
        );
    }

    #[test]
    fn head_chain_of_root_token() {
        let chain = TEST_SENTENCES[0].dep_graph().head_chain(5).unwrap();
        assert_eq!(chain, vec![DepTriple::new(0, Some("root"), 5)]);
        assert!(TEST_SENTENCES[0].dep_graph().head_chain(0).is_none());
    }

    #[test]
    fn head_chain_stops_on_cycle() {
        let sentence = cyclic_sentence();
        assert!(sentence.dep_graph().head_chain(1).is_none());
        assert!(sentence.dep_graph().head_chain(3).is_none());
    }

    #[test]
    fn head_chain_stops_on_missing_head() {
        let mut sentence: Sentence = vec![Token::new("a"), Token::new("b")].into_iter().collect();
        sentence
            .dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("dep"), 1))
            .unwrap();
        assert!(sentence.dep_graph().head_chain(1).is_none());
    }

    #[test]
    fn co_indexation() {
        let graph = TEST_SENTENCES[0].dep_graph();
        assert!(graph.co_indexed(2, 6));
        assert!(!graph.co_indexed(1, 6));
        assert!(!graph.co_indexed(5, 6));
        assert!(!graph.co_indexed(0, 1));

        // A token is not co-indexed with itself.
        assert!(!graph.co_indexed(2, 2));

        let siblings = graph.siblings(2);
        assert_eq!(siblings, vec![DepTriple::new(5, Some("punct"), 6)]);
    }

    #[test]
    fn adjacency() {
        let sentence = &TEST_SENTENCES[0];
        assert_eq!(sentence.next_token(1).map(Token::form), Some("man"));
        assert!(sentence.next_token(6).is_none());
        assert!(sentence.token(0).is_none());
    }

    #[test]
    fn label_families_and_order() {
        assert!(in_family("nsubj:pass", "nsubj"));
        assert!(in_family("nsubj", "nsubj"));
        assert!(!in_family("obl", "obj"));
        assert!(DepTriple::new(1, Some("acl:relcl"), 2).in_family("acl"));
        assert!(!DepTriple::<&str>::new(1, None, 2).in_family("acl"));

        assert!(precedes(2, 4));
        assert!(!precedes(4, 4));
    }

    #[test]
    fn text_comment() {
        let mut sentence = TEST_SENTENCES[0].clone();
        assert_eq!(sentence.text(), Some("The man near Paris left."));

        sentence.set_text("The man left.");
        assert_eq!(sentence.text(), Some("The man left."));
        assert_eq!(sentence.comments().len(), 2);

        let mut bare = Sentence::new();
        assert!(bare.text().is_none());
        bare.set_text("hello");
        assert_eq!(bare.text(), Some("hello"));
    }

    #[test]
    fn equality() {
        let mut g1 = Sentence::default();
        g1.push(Token::new("does"));
        g1.push(Token::new("equality"));
        g1.push(Token::new("work"));

        let g2 = g1.clone();
        assert_eq!(g1, g2);

        g1.push(Token::new("?"));
        assert_ne!(g1, g2);

        let mut g3 = g1.clone();
        g1.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 3))
            .unwrap();
        assert_ne!(g1, g3);
        g3.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 3))
            .unwrap();
        assert_eq!(g1, g3);

        let g4: Sentence = vec![TokenBuilder::new("does").upos("AUX").into()]
            .into_iter()
            .collect();
        assert_ne!(g4[1], Node::Token(Token::new("does")));
    }

    #[test]
    #[should_panic(expected = "HeadOutOfBounds")]
    fn incorrect_head_is_rejected() {
        let mut g = Sentence::default();
        g.push(Token::new("dogs"));
        g.push(Token::new("bark"));
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(3, Some("nsubj"), 1))
            .unwrap();
    }

    #[test]
    #[should_panic(expected = "DependentOutOfBounds")]
    fn incorrect_dependent_is_rejected() {
        let mut g = Sentence::default();
        g.push(Token::new("dogs"));
        g.push(Token::new("bark"));
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("nsubj"), 3))
            .unwrap();
    }
}
