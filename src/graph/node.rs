use crate::dtype::{DType, Layout};

/// A unique identifier for a node within a [`Graph`](super::Graph).
///
/// Handles are plain arena indices; nodes are never removed, so a
/// `NodeId` stays valid for the lifetime of the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Payload of an operation node.
///
/// The operation name is opaque to this crate; which names are fusible
/// is the concern of the operation registry that drives clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct OpData {
    /// Operation name, e.g. `"add"` or `"relu"`.
    pub kind: String,
}

/// Payload of a data-value node.
#[derive(Debug, Clone, PartialEq)]
pub struct VarData {
    /// Element type, unset until type inference has run.
    pub dtype: Option<DType>,
    /// Storage layout, unset until placement has run.
    pub layout: Option<Layout>,
}

/// What a node is: an operation or a data value flowing between
/// operations.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Op(OpData),
    Var(VarData),
}

/// The data associated with a single node in the dataflow graph.
///
/// Both node kinds carry the same bidirectional adjacency: for an
/// operation node, `inputs` are the values it reads and `outputs` the
/// values it writes; for a value node, `inputs` are the operations that
/// produce it and `outputs` the operations that consume it. Edge lists
/// are ordered and may contain repeats (an operation reading the same
/// value twice).
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub kind: NodeKind,
    pub inputs: Vec<NodeId>,
    pub outputs: Vec<NodeId>,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        NodeData {
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Returns true if this is an operation node.
    pub fn is_op(&self) -> bool {
        matches!(self.kind, NodeKind::Op(_))
    }

    /// Returns true if this is a data-value node.
    pub fn is_var(&self) -> bool {
        matches!(self.kind, NodeKind::Var(_))
    }

    /// The operation payload, if this is an operation node.
    pub fn as_op(&self) -> Option<&OpData> {
        match &self.kind {
            NodeKind::Op(op) => Some(op),
            NodeKind::Var(_) => None,
        }
    }

    /// The value payload, if this is a data-value node.
    pub fn as_var(&self) -> Option<&VarData> {
        match &self.kind {
            NodeKind::Op(_) => None,
            NodeKind::Var(var) => Some(var),
        }
    }
}
