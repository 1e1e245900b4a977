//! Fusion legality checks.
//!
//! A candidate subgraph is only worth handing to the code generator if
//! it is large enough to pay for the kernel-launch overhead it saves and
//! if every value it touches shares one supported element type. Both
//! checks live here.

use log::{debug, trace};
use thiserror::Error;

use crate::dtype::{DType, Layout};
use crate::graph::{Graph, NodeId};

use super::SubGraph;

/// Why a candidate subgraph cannot be fused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSubgraph {
    /// Fewer operations than the configured minimum; fusing would not
    /// pay for itself.
    #[error("subgraph has {found} operations, fusion requires at least {required}")]
    TooFewOperations { found: usize, required: usize },

    /// A member value node has no layout or a layout the generated
    /// kernels cannot address.
    #[error("value node {0:?} does not have a dense strided layout")]
    UnsupportedLayout(NodeId),

    /// A member value node carries no element type at all.
    #[error("value node {0:?} has no element type")]
    UntypedVar(NodeId),

    /// Member value nodes disagree on their element type; generated
    /// kernels are monomorphic.
    #[error("mixed element types {first} and {second} in one subgraph")]
    MixedDTypes { first: DType, second: DType },

    /// The uniform element type is one no kernel template exists for.
    #[error("element type {0} is not supported by fused kernels")]
    UnsupportedDType(DType),
}

/// Resolves the single element type shared by every value node in
/// `members`, in member order. Operation nodes are skipped.
pub(super) fn extract_data_type(
    graph: &Graph,
    members: &[NodeId],
) -> Result<DType, InvalidSubgraph> {
    let mut found: Option<DType> = None;
    for &id in members {
        let Some(var) = graph.node(id).as_var() else {
            continue;
        };
        if var.layout != Some(Layout::Strided) {
            return Err(InvalidSubgraph::UnsupportedLayout(id));
        }
        let dtype = var.dtype.ok_or(InvalidSubgraph::UntypedVar(id))?;
        match found {
            None => found = Some(dtype),
            Some(first) if dtype != first => {
                return Err(InvalidSubgraph::MixedDTypes {
                    first,
                    second: dtype,
                });
            }
            Some(_) => {}
        }
    }
    // A subgraph without value nodes constrains nothing; fall back to
    // the default kernel element type.
    let dtype = found.unwrap_or(DType::F32);
    if !dtype.is_float() {
        return Err(InvalidSubgraph::UnsupportedDType(dtype));
    }
    trace!("subgraph element type resolved to {dtype}");
    Ok(dtype)
}

impl<'g> SubGraph<'g> {
    /// Checks whether this subgraph is a legal fusion candidate.
    ///
    /// The size gate runs first, so an undersized candidate reports
    /// [`InvalidSubgraph::TooFewOperations`] even when its types are
    /// also broken. Type extraction is re-run from the current node
    /// data rather than read from the construction-time cache.
    pub fn validate(&self, min_operations: usize) -> Result<(), InvalidSubgraph> {
        let found = self.num_operations();
        if found < min_operations {
            return Err(InvalidSubgraph::TooFewOperations {
                found,
                required: min_operations,
            });
        }
        extract_data_type(self.graph, &self.nodes).map(|_| ())
    }

    /// Boolean form of [`SubGraph::validate`] for pass pipelines that
    /// only filter. The rejection reason is logged instead of returned.
    pub fn is_valid(&self, min_operations: usize) -> bool {
        match self.validate(min_operations) {
            Ok(()) => true,
            Err(reason) => {
                debug!(
                    "rejecting fusion candidate with {} nodes: {reason}",
                    self.len()
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn single_op(dtype: DType) -> Graph {
        let mut graph = Graph::new();
        let x = graph.add_var(dtype);
        let y = graph.add_var(dtype);
        graph.add_op("relu", &[x], &[y]);
        graph
    }

    fn all_ops(graph: &Graph) -> Vec<NodeId> {
        graph
            .iter()
            .filter(|(_, data)| data.is_op())
            .map(|(id, _)| id)
            .collect()
    }

    #[rstest]
    #[case(DType::F16)]
    #[case(DType::F32)]
    #[case(DType::F64)]
    fn uniform_float_members_validate(#[case] dtype: DType) {
        let graph = single_op(dtype);
        let sub = SubGraph::new(&graph, 0, false, &all_ops(&graph));
        assert_eq!(sub.data_type(), Some(dtype));
        assert_eq!(sub.validate(1), Ok(()));
    }

    #[rstest]
    #[case(DType::I32)]
    #[case(DType::I64)]
    #[case(DType::Bool)]
    fn non_float_members_are_rejected(#[case] dtype: DType) {
        let graph = single_op(dtype);
        let sub = SubGraph::new(&graph, 0, false, &all_ops(&graph));
        assert_eq!(sub.data_type(), None);
        assert_eq!(sub.validate(1), Err(InvalidSubgraph::UnsupportedDType(dtype)));
    }

    #[test]
    fn mixed_types_are_rejected() {
        let mut graph = Graph::new();
        let x = graph.add_var(DType::F32);
        let y = graph.add_var(DType::F64);
        graph.add_op("cast", &[x], &[y]);
        let sub = SubGraph::new(&graph, 0, false, &all_ops(&graph));

        assert_eq!(sub.data_type(), None);
        assert_eq!(
            sub.validate(1),
            Err(InvalidSubgraph::MixedDTypes {
                first: DType::F32,
                second: DType::F64,
            })
        );
    }

    #[test]
    fn untyped_value_is_rejected() {
        let mut graph = Graph::new();
        let x = graph.add_var(DType::F32);
        let y = graph.add_var_detailed(None, Some(Layout::Strided));
        graph.add_op("exp", &[x], &[y]);
        let sub = SubGraph::new(&graph, 0, false, &all_ops(&graph));

        assert_eq!(sub.validate(1), Err(InvalidSubgraph::UntypedVar(y)));
    }

    #[rstest]
    #[case(Some(Layout::Sparse))]
    #[case(None)]
    fn non_strided_layout_is_rejected(#[case] layout: Option<Layout>) {
        let mut graph = Graph::new();
        let x = graph.add_var(DType::F32);
        let y = graph.add_var_detailed(Some(DType::F32), layout);
        graph.add_op("exp", &[x], &[y]);
        let sub = SubGraph::new(&graph, 0, false, &all_ops(&graph));

        assert_eq!(sub.validate(1), Err(InvalidSubgraph::UnsupportedLayout(y)));
    }

    #[test]
    fn no_value_members_defaults_to_f32() {
        let graph = Graph::new();
        let sub = SubGraph::new(&graph, 0, false, &[]);
        assert_eq!(sub.data_type(), Some(DType::F32));
        assert_eq!(sub.validate(0), Ok(()));
    }

    #[test]
    fn size_gate_runs_before_type_check() {
        // One op over mixed types fails both checks; the count wins.
        let mut graph = Graph::new();
        let x = graph.add_var(DType::F32);
        let y = graph.add_var(DType::F64);
        graph.add_op("cast", &[x], &[y]);
        let sub = SubGraph::new(&graph, 0, false, &all_ops(&graph));

        assert_eq!(
            sub.validate(2),
            Err(InvalidSubgraph::TooFewOperations {
                found: 1,
                required: 2,
            })
        );
    }

    #[test]
    fn is_valid_logs_and_filters() {
        let _ = env_logger::builder().is_test(true).try_init();
        let graph = single_op(DType::F32);
        let sub = SubGraph::new(&graph, 0, false, &all_ops(&graph));

        assert!(sub.is_valid(1));
        assert!(!sub.is_valid(2));

        let bad = single_op(DType::I32);
        let sub = SubGraph::new(&bad, 0, false, &all_ops(&bad));
        assert!(!sub.is_valid(1));
    }
}
