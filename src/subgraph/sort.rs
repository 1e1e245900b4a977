//! Execution ordering for subgraph members.
//!
//! The sort sees the parent graph through a scoped edge view: an edge
//! counts only when both endpoints are members, so values produced or
//! consumed outside the subgraph do not constrain the order. The view
//! is a local in-degree map; the parent graph is never touched.

use std::collections::VecDeque;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::graph::NodeId;

use super::SubGraph;

impl<'g> SubGraph<'g> {
    /// Member handles in dependency order, computed once and cached.
    ///
    /// Every member operation appears after the member values it reads
    /// and before the member values it writes. Nodes become ready in
    /// member order and are emitted first-in first-out, so the result
    /// is reproducible for a given construction order.
    ///
    /// Members on a dependency cycle are silently left out; acyclic
    /// input is the caller's responsibility.
    pub fn sorted_nodes(&self) -> &[NodeId] {
        self.sorted.get_or_init(|| self.toposort())
    }

    fn toposort(&self) -> Vec<NodeId> {
        // In-degree over member-internal edges only. The map also acts
        // as the membership filter when walking successors below.
        let mut in_degree: FxHashMap<NodeId, usize> = FxHashMap::default();
        for &id in &self.nodes {
            let internal = self
                .graph
                .node(id)
                .inputs
                .iter()
                .filter(|p| self.contains(**p))
                .count();
            in_degree.insert(id, internal);
        }

        let mut ready: VecDeque<NodeId> = self
            .nodes
            .iter()
            .copied()
            .filter(|id| in_degree[id] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(id) = ready.pop_front() {
            order.push(id);
            // Wiring is symmetric, so a value consumed twice by one
            // operation holds two in-degree units and gets two
            // decrements here.
            for &succ in &self.graph.node(id).outputs {
                if let Some(degree) = in_degree.get_mut(&succ) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(succ);
                    }
                }
            }
        }

        if order.len() < self.nodes.len() {
            debug!(
                "dependency cycle: ordered {} of {} subgraph nodes",
                order.len(),
                self.nodes.len()
            );
        }
        trace!("topological order over {} subgraph nodes", order.len());
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::graph::Graph;

    #[test]
    fn chain_orders_values_and_ops_alternately() {
        let mut graph = Graph::new();
        let a = graph.add_var(DType::F32);
        let b = graph.add_var(DType::F32);
        let c = graph.add_var(DType::F32);
        let op1 = graph.add_op("exp", &[a], &[b]);
        let op2 = graph.add_op("neg", &[b], &[c]);

        let sub = SubGraph::new(&graph, 0, false, &[op1, op2]);
        assert_eq!(sub.sorted_nodes(), &[a, op1, b, op2, c]);
    }

    #[test]
    fn external_producers_do_not_constrain_the_order() {
        // x -> [opa] -> y -> [opb] -> z, with only opb inside. The
        // member copy of y has no internal producer and sorts first.
        let mut graph = Graph::new();
        let x = graph.add_var(DType::F32);
        let y = graph.add_var(DType::F32);
        let z = graph.add_var(DType::F32);
        graph.add_op("exp", &[x], &[y]);
        let opb = graph.add_op("neg", &[y], &[z]);

        let sub = SubGraph::new(&graph, 0, false, &[opb]);
        assert_eq!(sub.sorted_nodes(), &[y, opb, z]);
    }

    #[test]
    fn diamond_is_ordered_breadth_first() {
        let mut graph = Graph::new();
        let a = graph.add_var(DType::F32);
        let b = graph.add_var(DType::F32);
        let c = graph.add_var(DType::F32);
        let d = graph.add_var(DType::F32);
        let op1 = graph.add_op("exp", &[a], &[b]);
        let op2 = graph.add_op("neg", &[a], &[c]);
        let op3 = graph.add_op("add", &[b, c], &[d]);

        let sub = SubGraph::new(&graph, 0, false, &[op1, op2, op3]);
        assert_eq!(sub.sorted_nodes(), &[a, op1, op2, b, c, op3, d]);
    }

    #[test]
    fn ops_sit_between_their_values() {
        let mut graph = Graph::new();
        let a = graph.add_var(DType::F32);
        let b = graph.add_var(DType::F32);
        let c = graph.add_var(DType::F32);
        let d = graph.add_var(DType::F32);
        let ops = vec![
            graph.add_op("exp", &[a], &[b]),
            graph.add_op("neg", &[a], &[c]),
            graph.add_op("add", &[b, c], &[d]),
        ];

        let sub = SubGraph::new(&graph, 0, false, &ops);
        let position = |id: NodeId| {
            sub.sorted_nodes()
                .iter()
                .position(|&n| n == id)
                .unwrap_or_else(|| panic!("{id:?} missing from order"))
        };
        for &op in &ops {
            for &input in &graph.node(op).inputs {
                assert!(position(input) < position(op));
            }
            for &output in &graph.node(op).outputs {
                assert!(position(op) < position(output));
            }
        }
    }

    #[test]
    fn repeated_operands_still_drain() {
        let mut graph = Graph::new();
        let x = graph.add_var(DType::F32);
        let y = graph.add_var(DType::F32);
        let op = graph.add_op("mul", &[x, x], &[y]);

        let sub = SubGraph::new(&graph, 0, false, &[op]);
        assert_eq!(sub.sorted_nodes(), &[x, op, y]);
    }

    #[test]
    fn cycles_yield_a_partial_order() {
        let mut graph = Graph::new();
        let v1 = graph.add_var(DType::F32);
        let v2 = graph.add_var(DType::F32);
        let detached = graph.add_var(DType::F32);
        let op1 = graph.add_op("exp", &[v1], &[v2]);
        let op2 = graph.add_op("neg", &[v2], &[v1]);

        let sub = SubGraph::new(&graph, 0, false, &[op1, op2, detached]);
        assert_eq!(sub.sorted_nodes(), &[detached]);
    }

    #[test]
    fn sort_is_computed_once() {
        let mut graph = Graph::new();
        let x = graph.add_var(DType::F32);
        let y = graph.add_var(DType::F32);
        let op = graph.add_op("exp", &[x], &[y]);

        let sub = SubGraph::new(&graph, 0, false, &[op]);
        let first = sub.sorted_nodes().as_ptr();
        let second = sub.sorted_nodes().as_ptr();
        assert_eq!(first, second);
    }
}
