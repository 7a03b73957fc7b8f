use thiserror::Error;

/// Error constructing a dependency graph.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("dependent {dependent:?} is out of bounds for sentence with {node_count:?} nodes")]
    DependentOutOfBounds { dependent: usize, node_count: usize },

    #[error("head {head:?} is out of bounds for sentence with {node_count:?} nodes")]
    HeadOutOfBounds { head: usize, node_count: usize },
}
