//! Dependency-parsed sentences.
//!
//! A [`Sentence`](graph::Sentence) is a dependency graph over its tokens,
//! with a virtual root node at index 0. Besides construction, this crate
//! only provides the structural queries that corpus predicates are built
//! from: linear order, label families, head-chain ascent, co-indexation,
//! adjacency, feature presence and windowed scans.

mod error;
pub use crate::error::GraphError;

pub mod graph;

pub mod token;

#[cfg(test)]
mod tests;
