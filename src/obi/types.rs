// SPDX-License-Identifier: MIT

//! Graph type definitions
//!
//! This module defines the node, edge and collection types shared by every
//! strategy, plus the closed step/rule kind vocabularies read from `$type`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key holding the type tag of a step, rule or recognizer
pub const TYPE_KEY: &str = "$type";

/// Optional namespace prefix on type tags
const TYPE_NAMESPACE: &str = "Microsoft.";

/// Structural role of a node in the rendered graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum NodeType {
    /// Ordinary step or rule
    Process,
    /// Branch point: recognizers and conditional steps
    Decision,
    /// Synthetic aggregation of other nodes
    Group,
    /// Synthetic back-reference to a parent context
    Start,
}

/// A node located in the source document
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IndexedNode {
    /// Path expression locating the node in the source document
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// The document fragment this node represents
    pub payload: Value,
}

impl IndexedNode {
    pub fn new(id: impl Into<String>, node_type: NodeType, payload: Value) -> Self {
        Self {
            id: id.into(),
            node_type,
            payload,
        }
    }
}

/// A directed edge between two node ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Optional label, e.g. the branch key
    pub text: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: None,
        }
    }

    pub fn labeled(
        from: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: Some(text.into()),
        }
    }
}

/// Exported graph record consumed by the renderer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Adjacency list in edge insertion order
    pub neighbor_ids: Vec<String>,
    pub payload: Value,
}

impl From<IndexedNode> for GraphNode {
    fn from(node: IndexedNode) -> Self {
        Self {
            id: node.id,
            node_type: node.node_type,
            neighbor_ids: Vec::new(),
            payload: node.payload,
        }
    }
}

/// Named node groups, kept in insertion order
///
/// The order groups are inserted in is the order nodes appear in the final
/// graph once the collection is flattened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeCollection {
    groups: Vec<(String, Vec<IndexedNode>)>,
}

impl NodeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a group, replacing any previous group of the same name in place
    pub fn insert(&mut self, name: impl Into<String>, nodes: Vec<IndexedNode>) {
        let name = name.into();
        match self.groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = nodes,
            None => self.groups.push((name, nodes)),
        }
    }

    /// Append to a group, creating it at the end if it does not exist yet
    pub fn append(&mut self, name: impl Into<String>, nodes: Vec<IndexedNode>) {
        let name = name.into();
        match self.groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => existing.extend(nodes),
            None => self.groups.push((name, nodes)),
        }
    }

    pub fn get(&self, name: &str) -> &[IndexedNode] {
        self.groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, nodes)| nodes.as_slice())
            .unwrap_or(&[])
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(n, _)| n.as_str())
    }

    /// Total number of nodes across all groups
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, nodes)| nodes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenate every group in insertion order
    pub fn flatten(self) -> Vec<IndexedNode> {
        self.groups.into_iter().flat_map(|(_, nodes)| nodes).collect()
    }
}

/// Read the `$type` tag of a document fragment
pub fn type_tag(value: &Value) -> Option<&str> {
    value.get(TYPE_KEY).and_then(Value::as_str)
}

fn strip_namespace(tag: &str) -> &str {
    tag.strip_prefix(TYPE_NAMESPACE).unwrap_or(tag)
}

/// Known step kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    BeginDialog,
    IfCondition,
    SwitchCondition,
    /// Any other tag, kept verbatim; an untagged step has an empty tag
    Other(String),
}

impl StepKind {
    pub fn of(step: &Value) -> Self {
        Self::from_tag(type_tag(step).unwrap_or_default())
    }

    pub fn from_tag(tag: &str) -> Self {
        match strip_namespace(tag) {
            "BeginDialog" => StepKind::BeginDialog,
            "IfCondition" => StepKind::IfCondition,
            "SwitchCondition" => StepKind::SwitchCondition,
            _ => StepKind::Other(tag.to_string()),
        }
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self, StepKind::IfCondition | StepKind::SwitchCondition)
    }

    /// Node type a step of this kind renders as
    pub fn node_type(&self) -> NodeType {
        if self.is_conditional() {
            NodeType::Decision
        } else {
            NodeType::Process
        }
    }
}

/// Known rule (trigger) kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Welcome,
    NoMatch,
    Intent,
    /// Any other tag; these land in the plain "rules" bucket
    Other(String),
}

impl RuleKind {
    pub fn of(rule: &Value) -> Self {
        Self::from_tag(type_tag(rule).unwrap_or_default())
    }

    pub fn from_tag(tag: &str) -> Self {
        match strip_namespace(tag) {
            "WelcomeRule" | "OnConversationUpdateActivity" => RuleKind::Welcome,
            "NoMatchRule" | "OnUnknownIntent" => RuleKind::NoMatch,
            "IntentRule" | "OnIntent" => RuleKind::Intent,
            _ => RuleKind::Other(tag.to_string()),
        }
    }
}
