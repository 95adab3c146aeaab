// SPDX-License-Identifier: MIT

//! Sequential strategy - the fallback for any document shape
//!
//! Steps and rules become two independent chains. A typed recognizer is
//! shown but not linked. Conditional steps are expanded by the branch
//! middleware.

use super::{chain, group, recognizer_node, rule_node, select_steps, Strategy, StrategyKind};
use crate::obi::document::ObiDocument;
use crate::obi::middleware::{BranchMiddleware, Middleware};
use crate::obi::types::{Edge, NodeCollection};

pub struct SequentialStrategy {
    middlewares: Vec<Box<dyn Middleware>>,
}

impl SequentialStrategy {
    pub fn new() -> Self {
        Self {
            middlewares: vec![Box::new(BranchMiddleware::new())],
        }
    }
}

impl Default for SequentialStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for SequentialStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Sequential
    }

    fn select_nodes(&self, doc: &ObiDocument<'_>) -> NodeCollection {
        let (rule_field, rules) = doc.rules();

        let mut nodes = NodeCollection::new();
        nodes.insert(group::STEPS, select_steps(doc));
        nodes.insert(
            group::RULES,
            rules
                .iter()
                .enumerate()
                .map(|(i, rule)| rule_node(rule_field, i, rule))
                .collect(),
        );
        nodes.insert(
            group::RECOGNIZER,
            doc.typed_recognizer().map(recognizer_node).into_iter().collect(),
        );
        nodes
    }

    fn build_edges(&self, nodes: &NodeCollection) -> Vec<Edge> {
        let mut edges = chain(nodes.get(group::STEPS));
        edges.extend(chain(nodes.get(group::RULES)));
        edges
    }

    fn middlewares(&self) -> &[Box<dyn Middleware>] {
        &self.middlewares
    }
}
