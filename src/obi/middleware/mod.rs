// SPDX-License-Identifier: MIT

//! Post-processing passes over a strategy's nodes and edges
//!
//! A middleware runs between `build_edges` and `output` and may add nodes
//! and rewire edges. Middlewares are applied in the order a strategy lists
//! them.

mod branch;

pub use branch::{BranchMiddleware, BRANCHES};

use super::types::{Edge, NodeCollection};

/// Nodes and edges in flight between pipeline stages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphParts {
    pub nodes: NodeCollection,
    pub edges: Vec<Edge>,
}

impl GraphParts {
    pub fn new(nodes: NodeCollection, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }
}

/// A pass that receives and returns the full node/edge set
pub trait Middleware: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, parts: GraphParts) -> GraphParts;
}
