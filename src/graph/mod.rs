//! The dataflow graph the fusion pass operates on.
//!
//! Graphs are bipartite: operation nodes read and write data-value
//! nodes, and value nodes record which operations produce and consume
//! them. Both directions of every edge are stored, ordered, so that
//! analyses can walk producers and consumers without searching.

mod graph;
mod node;

pub use graph::Graph;
pub use node::{NodeData, NodeId, NodeKind, OpData, VarData};
