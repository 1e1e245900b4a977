use crate::dtype::{DType, Layout};

use super::node::{NodeData, NodeId, NodeKind, OpData, VarData};

/// Owns all the nodes of a dataflow graph.
///
/// The `Graph` is an arena: nodes live in a vector and are addressed by
/// [`NodeId`] handles. Operation nodes and data-value nodes share the
/// arena so that a single ordering can interleave both kinds.
///
/// Edges are stored as ordered adjacency on each node and are always
/// wired symmetrically: [`Graph::add_op`] is the only edge writer, and
/// it records the new operation in every connected value's edge lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<NodeData>,
}

impl Graph {
    /// Creates a new, empty graph.
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    /// Adds a data-value node with the given element type and the
    /// strided layout every fusible value uses.
    pub fn add_var(&mut self, dtype: DType) -> NodeId {
        self.add_var_detailed(Some(dtype), Some(Layout::Strided))
    }

    /// Adds a data-value node with full control over the type and
    /// layout tags, including leaving them unset.
    pub fn add_var_detailed(&mut self, dtype: Option<DType>, layout: Option<Layout>) -> NodeId {
        self.push(NodeData::new(NodeKind::Var(VarData { dtype, layout })))
    }

    /// Adds an operation node reading `inputs` and writing `outputs`,
    /// wiring every edge in both directions in call order.
    ///
    /// # Panics
    /// Panics if any connected handle does not belong to this graph or
    /// refers to an operation node.
    pub fn add_op(
        &mut self,
        kind: impl Into<String>,
        inputs: &[NodeId],
        outputs: &[NodeId],
    ) -> NodeId {
        for &var in inputs.iter().chain(outputs) {
            assert!(
                self.nodes[var.0].is_var(),
                "operation edges must point at data-value nodes, got {var:?}"
            );
        }
        let op = self.push(NodeData::new(NodeKind::Op(OpData { kind: kind.into() })));
        for &var in inputs {
            self.nodes[op.0].inputs.push(var);
            self.nodes[var.0].outputs.push(op);
        }
        for &var in outputs {
            self.nodes[op.0].outputs.push(var);
            self.nodes[var.0].inputs.push(op);
        }
        op
    }

    /// Gets a reference to a node by its ID.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    /// Gets a reference to a node by its ID.
    ///
    /// # Panics
    /// Panics if the handle was not issued by this graph.
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    /// Iterates over all nodes with their handles, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Returns the total number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
