// SPDX-License-Identifier: MIT

//! Graphical strategy - recognizer-centred layout
//!
//! Rules are bucketed by kind. The first welcome rule leads into the
//! recognizer, the recognizer fans out to every intent rule and to the
//! first fallback rule. Remaining rules and the steps form plain chains.

use super::{chain, group, recognizer_node, rule_node, select_steps, Strategy, StrategyKind};
use crate::obi::document::ObiDocument;
use crate::obi::types::{Edge, IndexedNode, NodeCollection, RuleKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicalStrategy;

impl GraphicalStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for GraphicalStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Graphical
    }

    fn select_nodes(&self, doc: &ObiDocument<'_>) -> NodeCollection {
        let (rule_field, rules) = doc.rules();

        let mut welcomes = Vec::new();
        let mut fallbacks = Vec::new();
        let mut intents = Vec::new();
        let mut others = Vec::new();

        for (i, rule) in rules.iter().enumerate() {
            let node = rule_node(rule_field, i, rule);
            match RuleKind::of(rule) {
                RuleKind::Welcome => welcomes.push(node),
                RuleKind::NoMatch => fallbacks.push(node),
                RuleKind::Intent => intents.push(node),
                RuleKind::Other(_) => others.push(node),
            }
        }

        let mut nodes = NodeCollection::new();
        nodes.insert(
            group::RECOGNIZER,
            doc.typed_recognizer().map(recognizer_node).into_iter().collect(),
        );
        nodes.insert(group::WELCOMES, welcomes);
        nodes.insert(group::FALLBACKS, fallbacks);
        nodes.insert(group::INTENTS, intents);
        nodes.insert(group::RULES, others);
        nodes.insert(group::STEPS, select_steps(doc));
        nodes
    }

    fn build_edges(&self, nodes: &NodeCollection) -> Vec<Edge> {
        let mut edges = chain(nodes.get(group::STEPS));
        edges.extend(chain(nodes.get(group::RULES)));

        if let Some(recognizer) = nodes.get(group::RECOGNIZER).first() {
            if let Some(welcome) = nodes.get(group::WELCOMES).first() {
                edges.push(Edge::new(&welcome.id, &recognizer.id));
            }
            edges.extend(
                nodes
                    .get(group::INTENTS)
                    .iter()
                    .map(|intent: &IndexedNode| Edge::new(&recognizer.id, &intent.id)),
            );
            if let Some(fallback) = nodes.get(group::FALLBACKS).first() {
                edges.push(Edge::new(&recognizer.id, &fallback.id));
            }
        }

        edges
    }
}
