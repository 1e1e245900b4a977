//! Fusion-candidate subgraphs and their boundary analysis.
//!
//! A [`SubGraph`] is a view over a subset of nodes of a parent
//! [`Graph`](crate::graph::Graph), produced by a clustering pass and
//! consumed by a code generator. [`SubGraph::validate`] decides whether
//! the candidate is legal to fuse at all. [`SubGraph::sorted_nodes`]
//! gives the order its nodes execute in, and [`SubGraph::input_vars`]
//! and [`SubGraph::output_vars`] give the values crossing its boundary.
//!
//! The view never mutates the parent graph; all analyses run over local
//! scoped copies of the relevant adjacency.

use std::cell::OnceCell;

use rustc_hash::FxHashSet;

use crate::dtype::DType;
use crate::graph::{Graph, NodeId};

mod boundary;
mod sort;
mod validate;

pub use validate::InvalidSubgraph;

/// A self-contained view over a subset of a parent graph's nodes.
///
/// Construction expands the caller's seed set to the closure over
/// operation neighbors: every operation node's immediate input and
/// output value nodes are members too. Membership is immutable after
/// construction; derived state (element type, topological order) is
/// cached for the lifetime of the instance and never invalidated.
///
/// The instance borrows the parent graph, so the graph always outlives
/// the view. The lazily computed sort cache is unsynchronized, which
/// makes `SubGraph` `!Sync`; wrap it in a lock to share across threads.
#[derive(Debug)]
pub struct SubGraph<'g> {
    graph: &'g Graph,
    /// Opaque fusion-strategy tag assigned by the clustering pass.
    kind: i32,
    /// Name of the generated kernel, once code generation has run.
    func_name: Option<String>,
    /// Whether internally consumed values are still exposed as outputs.
    keep_intermediate_outputs: bool,
    /// Members in insertion order; the canonical iteration order for
    /// every analysis, which makes their results reproducible.
    nodes: Vec<NodeId>,
    node_set: FxHashSet<NodeId>,
    /// Uniform element type, extracted at construction; `None` records
    /// a failed extraction.
    data_type: Option<DType>,
    sorted: OnceCell<Vec<NodeId>>,
}

fn insert(nodes: &mut Vec<NodeId>, set: &mut FxHashSet<NodeId>, id: NodeId) {
    if set.insert(id) {
        nodes.push(id);
    }
}

impl<'g> SubGraph<'g> {
    /// Builds a subgraph from a seed set of node handles.
    ///
    /// Seeds may be operation or value nodes, in any order; each
    /// operation seed pulls in its connected value nodes. No transitive
    /// expansion happens beyond that single step, so the boundary is
    /// exactly the edge set touching the seed operations.
    ///
    /// Construction never fails: an untypeable or mixed-type member set
    /// leaves the subgraph in an invalid state that [`SubGraph::validate`]
    /// reports and [`SubGraph::data_type`] exposes as `None`.
    ///
    /// # Panics
    /// Panics if a seed handle was not issued by `graph`.
    pub fn new(
        graph: &'g Graph,
        kind: i32,
        keep_intermediate_outputs: bool,
        seeds: &[NodeId],
    ) -> Self {
        let mut nodes = Vec::new();
        let mut node_set = FxHashSet::default();
        for &seed in seeds {
            insert(&mut nodes, &mut node_set, seed);
            let data = graph.node(seed);
            if data.is_op() {
                for &var in data.inputs.iter().chain(&data.outputs) {
                    insert(&mut nodes, &mut node_set, var);
                }
            }
        }
        let data_type = validate::extract_data_type(graph, &nodes).ok();
        SubGraph {
            graph,
            kind,
            func_name: None,
            keep_intermediate_outputs,
            nodes,
            node_set,
            data_type,
            sorted: OnceCell::new(),
        }
    }

    /// The parent graph this view was built over.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// The fusion-strategy tag carried through from the clustering pass.
    pub fn kind(&self) -> i32 {
        self.kind
    }

    /// The uniform element type of all member value nodes, or `None`
    /// if the members failed extraction (mixed, unsupported, or unset
    /// types or layouts).
    pub fn data_type(&self) -> Option<DType> {
        self.data_type
    }

    /// Records the name of the generated kernel. Intended to be set
    /// once by the code generator and read thereafter.
    pub fn set_func_name(&mut self, name: impl Into<String>) {
        self.func_name = Some(name.into());
    }

    /// The generated kernel name, once assigned.
    pub fn func_name(&self) -> Option<&str> {
        self.func_name.as_deref()
    }

    /// Member handles in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns true if `id` is a member of this subgraph.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node_set.contains(&id)
    }

    /// Number of member nodes, operations and values combined.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the subgraph has no members.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of member operation nodes.
    pub fn num_operations(&self) -> usize {
        self.nodes
            .iter()
            .filter(|&&id| self.graph.node(id).is_op())
            .count()
    }
}
