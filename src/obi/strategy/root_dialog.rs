// SPDX-License-Identifier: MIT

//! Root dialog strategy - recognizer followed by grouped rules
//!
//! Welcome and no-match rules collapse into an event group, intent rules
//! into an intent group. The recognizer leads to the event group, which
//! leads to the intent group. Other rules and the steps form plain chains.

use serde_json::json;

use super::{chain, group, recognizer_node, rule_node, select_steps, Strategy, StrategyKind};
use crate::obi::document::{ObiDocument, ROOT_ID};
use crate::obi::types::{Edge, IndexedNode, NodeCollection, NodeType, RuleKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct RootDialogStrategy;

impl RootDialogStrategy {
    pub fn new() -> Self {
        Self
    }
}

fn group_node(name: &str, type_tag: &str, children: Vec<IndexedNode>) -> IndexedNode {
    IndexedNode::new(
        format!("{}.{}", ROOT_ID, name),
        NodeType::Group,
        json!({ "$type": type_tag, "children": children }),
    )
}

impl Strategy for RootDialogStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RootDialog
    }

    fn select_nodes(&self, doc: &ObiDocument<'_>) -> NodeCollection {
        let (rule_field, rules) = doc.rules();

        let mut events = Vec::new();
        let mut intents = Vec::new();
        let mut others = Vec::new();

        for (i, rule) in rules.iter().enumerate() {
            let node = rule_node(rule_field, i, rule);
            match RuleKind::of(rule) {
                RuleKind::Welcome | RuleKind::NoMatch => events.push(node),
                RuleKind::Intent => intents.push(node),
                RuleKind::Other(_) => others.push(node),
            }
        }

        let mut nodes = NodeCollection::new();
        nodes.insert(
            group::RECOGNIZER,
            doc.truthy_recognizer().map(recognizer_node).into_iter().collect(),
        );
        nodes.insert(
            group::EVENT_GROUP,
            vec![group_node(group::EVENT_GROUP, "EventGroup", events)],
        );
        nodes.insert(
            group::INTENT_GROUP,
            vec![group_node(group::INTENT_GROUP, "IntentGroup", intents)],
        );
        nodes.insert(group::RULES, others);
        nodes.insert(group::STEPS, select_steps(doc));
        nodes
    }

    fn build_edges(&self, nodes: &NodeCollection) -> Vec<Edge> {
        let mut edges = chain(nodes.get(group::STEPS));
        edges.extend(chain(nodes.get(group::RULES)));

        let recognizer = nodes.get(group::RECOGNIZER).first();
        let events = nodes.get(group::EVENT_GROUP).first();
        let intents = nodes.get(group::INTENT_GROUP).first();
        if let (Some(recognizer), Some(events), Some(intents)) = (recognizer, events, intents) {
            edges.push(Edge::new(&recognizer.id, &events.id));
            edges.push(Edge::new(&events.id, &intents.id));
        }

        edges
    }
}
