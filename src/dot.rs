//! Graphviz DOT rendering for graphs and subgraphs.

use crate::graph::{Graph, NodeId, NodeKind};
use crate::subgraph::SubGraph;

/// Types that can render themselves as a Graphviz DOT document.
pub trait ToDot {
    /// Returns the DOT representation as a string.
    fn to_dot(&self) -> String;
}

fn push_node_defs(dot: &mut String, graph: &Graph, highlight: impl Fn(NodeId) -> bool) {
    for (id, data) in graph.iter() {
        let fill = if highlight(id) {
            ", style=filled, fillcolor=lightblue"
        } else {
            ""
        };
        match &data.kind {
            NodeKind::Op(op) => {
                dot.push_str(&format!(
                    "  n{} [shape=box, label=\"{}\"{}];\n",
                    id.0, op.kind, fill
                ));
            }
            NodeKind::Var(var) => {
                let dtype = match var.dtype {
                    Some(d) => d.to_string(),
                    None => "untyped".to_string(),
                };
                dot.push_str(&format!(
                    "  n{} [shape=ellipse, label=\"v{}: {}\"{}];\n",
                    id.0, id.0, dtype, fill
                ));
            }
        }
    }
}

fn push_edges(dot: &mut String, graph: &Graph) {
    // Every edge touches exactly one operation, so walking operation
    // endpoints emits each edge once.
    for (id, data) in graph.iter() {
        if data.is_op() {
            for input in &data.inputs {
                dot.push_str(&format!("  n{} -> n{};\n", input.0, id.0));
            }
            for output in &data.outputs {
                dot.push_str(&format!("  n{} -> n{};\n", id.0, output.0));
            }
        }
    }
}

impl ToDot for Graph {
    fn to_dot(&self) -> String {
        let mut dot = String::from("digraph G {\n");
        dot.push_str("  rankdir=LR;\n\n");
        push_node_defs(&mut dot, self, |_| false);
        dot.push('\n');
        push_edges(&mut dot, self);
        dot.push_str("}\n");
        dot
    }
}

impl<'g> ToDot for SubGraph<'g> {
    /// Renders the whole parent graph with subgraph members filled, so
    /// a candidate can be inspected in the context it was cut from.
    fn to_dot(&self) -> String {
        let mut dot = String::from("digraph G {\n");
        dot.push_str("  rankdir=LR;\n\n");
        push_node_defs(&mut dot, self.graph(), |id| self.contains(id));
        dot.push('\n');
        push_edges(&mut dot, self.graph());
        dot.push_str("}\n");
        dot
    }
}
