//! Fusegroup: subgraph extraction for kernel-fusion passes.
//!
//! A fusion pass clusters operations of a dataflow graph into
//! candidates, then hands each candidate to a code generator that emits
//! one fused kernel. This crate covers the step in between: it wraps a
//! cluster of nodes as a [`SubGraph`] view over the parent [`Graph`]
//! and answers the questions code generation depends on.
//!
//! # Architecture
//!
//! - **graph**: the parent dataflow graph, an arena of operation and
//!   value nodes addressed by stable [`NodeId`] handles
//! - **subgraph**: the [`SubGraph`] view with validity checking,
//!   boundary-aware topological ordering, and input/output analysis
//! - **dtype**: element types and layouts carried by value nodes
//! - **dot**: Graphviz rendering for debugging candidates
//!
//! # Example
//!
//! ```
//! use fusegroup::{DType, Graph, SubGraph};
//!
//! // x -> [exp] -> y -> [neg] -> z
//! let mut graph = Graph::new();
//! let x = graph.add_var(DType::F32);
//! let y = graph.add_var(DType::F32);
//! let z = graph.add_var(DType::F32);
//! let exp = graph.add_op("exp", &[x], &[y]);
//! let neg = graph.add_op("neg", &[y], &[z]);
//!
//! let sub = SubGraph::new(&graph, 0, false, &[exp, neg]);
//! assert!(sub.is_valid(2));
//! assert_eq!(sub.data_type(), Some(DType::F32));
//! assert_eq!(sub.input_vars(), vec![x]);
//! assert_eq!(sub.output_vars(), vec![z]);
//! ```

// ============================================================================
// Core Modules
// ============================================================================

pub mod dot;
pub mod dtype;
pub mod graph;
pub mod subgraph;

// ============================================================================
// Re-exports
// ============================================================================

pub use dot::ToDot;
pub use dtype::{DType, Layout};
pub use graph::{Graph, NodeData, NodeId, NodeKind};
pub use subgraph::{InvalidSubgraph, SubGraph};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module with commonly used types and traits
pub mod prelude {
    pub use crate::dot::ToDot;
    pub use crate::dtype::{DType, Layout};
    pub use crate::graph::{Graph, NodeId};
    pub use crate::subgraph::{InvalidSubgraph, SubGraph};
}
