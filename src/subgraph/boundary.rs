//! Boundary classification for subgraph members.
//!
//! The fused kernel's signature is derived here: which member values
//! must be bound before the kernel runs, and which must be written back
//! for the rest of the graph to observe. Classification only inspects
//! edges against the membership set; the parent graph stays untouched.

use crate::graph::NodeId;

use super::SubGraph;

impl<'g> SubGraph<'g> {
    /// Member value nodes the fused kernel reads from the outside, in
    /// execution order.
    ///
    /// A value qualifies when it has no producer at all or when at
    /// least one of its producers is not a member, so its contents
    /// cannot be computed inside the kernel.
    pub fn input_vars(&self) -> Vec<NodeId> {
        self.sorted_nodes()
            .iter()
            .copied()
            .filter(|&id| {
                let data = self.graph.node(id);
                if !data.is_var() {
                    return false;
                }
                let producers = &data.inputs;
                producers.is_empty() || producers.iter().any(|p| !self.contains(*p))
            })
            .collect()
    }

    /// Member value nodes the fused kernel must write back, in
    /// execution order.
    ///
    /// Candidates are the values produced by a member operation. With
    /// `keep_intermediate_outputs` set, all of them are returned;
    /// otherwise only those observable from outside remain, meaning
    /// values with no consumer or with at least one non-member
    /// consumer.
    pub fn output_vars(&self) -> Vec<NodeId> {
        self.sorted_nodes()
            .iter()
            .copied()
            .filter(|&id| {
                let data = self.graph.node(id);
                if !data.is_var() {
                    return false;
                }
                let produced_inside = data.inputs.iter().any(|p| self.contains(*p));
                if !produced_inside {
                    return false;
                }
                if self.keep_intermediate_outputs {
                    return true;
                }
                let consumers = &data.outputs;
                consumers.is_empty() || consumers.iter().any(|c| !self.contains(*c))
            })
            .collect()
    }
}
