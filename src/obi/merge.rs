// SPDX-License-Identifier: MIT

//! Edge merging - folds edges into node adjacency lists

use std::collections::HashMap;

use super::types::{Edge, GraphNode, IndexedNode};
use crate::error::GraphConsistencyError;

/// Merge edges into their source nodes' `neighbor_ids`
///
/// Node order follows `nodes`; neighbor order follows `edges`. Duplicate
/// edges produce duplicate neighbors. An edge whose endpoint is not among
/// `nodes` is a bug in the strategy that produced it and is reported as
/// [`GraphConsistencyError::DanglingEdge`].
pub fn merge(
    nodes: Vec<IndexedNode>,
    edges: &[Edge],
) -> Result<Vec<GraphNode>, GraphConsistencyError> {
    let mut graph: Vec<GraphNode> = nodes.into_iter().map(GraphNode::from).collect();
    let index: HashMap<String, usize> = graph
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.clone(), i))
        .collect();

    for edge in edges {
        let from = index
            .get(&edge.from)
            .copied()
            .ok_or_else(|| GraphConsistencyError::dangling(edge, &edge.from))?;
        if !index.contains_key(&edge.to) {
            return Err(GraphConsistencyError::dangling(edge, &edge.to));
        }
        graph[from].neighbor_ids.push(edge.to.clone());
    }

    Ok(graph)
}
