// SPDX-License-Identifier: MIT

//! Node/edge construction strategies
//!
//! Each strategy handles one structural shape of dialog document. A
//! strategy selects typed nodes from the document, links them with edges,
//! optionally hands both to its middlewares, and finally merges the edges
//! into the exported graph.

mod graphical;
mod root_dialog;
mod sequential;

pub use graphical::GraphicalStrategy;
pub use root_dialog::RootDialogStrategy;
pub use sequential::SequentialStrategy;

use serde_json::Value;
use std::fmt;

use super::document::{ObiDocument, ROOT_ID};
use super::merge::merge;
use super::middleware::{GraphParts, Middleware};
use super::normalizer::normalize_step;
use super::types::{Edge, GraphNode, IndexedNode, NodeCollection, NodeType, StepKind};
use crate::error::GraphConsistencyError;

/// Names of the node groups strategies put into a [`NodeCollection`]
pub mod group {
    pub const RECOGNIZER: &str = "recognizer";
    pub const STEPS: &str = "steps";
    pub const RULES: &str = "rules";
    pub const WELCOMES: &str = "welcomes";
    pub const FALLBACKS: &str = "fallbacks";
    pub const INTENTS: &str = "intents";
    pub const EVENT_GROUP: &str = "eventGroup";
    pub const INTENT_GROUP: &str = "intentGroup";
}

/// Identifies a strategy implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Sequential,
    Graphical,
    RootDialog,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Sequential => write!(f, "sequential"),
            StrategyKind::Graphical => write!(f, "graphical"),
            StrategyKind::RootDialog => write!(f, "root-dialog"),
        }
    }
}

/// One node/edge construction algorithm
pub trait Strategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn select_nodes(&self, doc: &ObiDocument<'_>) -> NodeCollection;

    fn build_edges(&self, nodes: &NodeCollection) -> Vec<Edge>;

    fn middlewares(&self) -> &[Box<dyn Middleware>] {
        &[]
    }

    fn output(
        &self,
        nodes: NodeCollection,
        edges: Vec<Edge>,
    ) -> Result<Vec<GraphNode>, GraphConsistencyError> {
        merge(nodes.flatten(), &edges)
    }
}

/// Run `strategy` over `doc`: select, link, apply middlewares, output
pub fn consume(
    doc: &ObiDocument<'_>,
    strategy: &dyn Strategy,
) -> Result<Vec<GraphNode>, GraphConsistencyError> {
    let nodes = strategy.select_nodes(doc);
    let edges = strategy.build_edges(&nodes);

    let parts = strategy
        .middlewares()
        .iter()
        .fold(GraphParts::new(nodes, edges), |parts, middleware| {
            middleware.apply(parts)
        });

    strategy.output(parts.nodes, parts.edges)
}

/// Normalized step nodes in document order
pub(crate) fn select_steps(doc: &ObiDocument<'_>) -> Vec<IndexedNode> {
    let (field, steps) = doc.steps();
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let payload = normalize_step(step);
            let node_type = StepKind::of(&payload).node_type();
            IndexedNode::new(list_id(field, i), node_type, payload)
        })
        .collect()
}

pub(crate) fn recognizer_node(recognizer: &Value) -> IndexedNode {
    IndexedNode::new(
        format!("{}.recognizer", ROOT_ID),
        NodeType::Decision,
        recognizer.clone(),
    )
}

pub(crate) fn rule_node(field: &str, index: usize, rule: &Value) -> IndexedNode {
    IndexedNode::new(list_id(field, index), NodeType::Process, rule.clone())
}

pub(crate) fn list_id(field: &str, index: usize) -> String {
    format!("{}.{}[{}]", ROOT_ID, field, index)
}

/// Edges linking `nodes` one after another
pub(crate) fn chain(nodes: &[IndexedNode]) -> Vec<Edge> {
    nodes
        .windows(2)
        .map(|pair| Edge::new(&pair[0].id, &pair[1].id))
        .collect()
}
