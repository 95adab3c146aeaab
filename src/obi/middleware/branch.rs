// SPDX-License-Identifier: MIT

//! Branch flattening for if/switch steps
//!
//! Each conditional step in the step chain is expanded into one sub-chain
//! per branch. The conditional fans out to the head of every branch and the
//! tail of every branch converges on whatever followed the conditional.
//! Branch steps may be conditionals themselves; they are expanded on the
//! next pass, one nesting depth at a time.

use serde_json::Value;

use super::{GraphParts, Middleware};
use crate::obi::normalizer::normalize_step;
use crate::obi::strategy::group;
use crate::obi::types::{Edge, IndexedNode, StepKind};

/// Group the expanded branch nodes are collected under
pub const BRANCHES: &str = "branches";

/// Expands conditional steps of one node group into branch sub-chains
#[derive(Debug, Clone)]
pub struct BranchMiddleware {
    source_group: String,
}

impl BranchMiddleware {
    pub fn new() -> Self {
        Self::for_group(group::STEPS)
    }

    /// Expand the conditionals of `source_group` instead of the step group
    pub fn for_group(source_group: impl Into<String>) -> Self {
        Self {
            source_group: source_group.into(),
        }
    }
}

impl Default for BranchMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for BranchMiddleware {
    fn name(&self) -> &str {
        "branch"
    }

    fn apply(&self, parts: GraphParts) -> GraphParts {
        let GraphParts { mut nodes, mut edges } = parts;

        let mut pending: Vec<IndexedNode> = nodes.get(&self.source_group).to_vec();
        let mut created = Vec::new();

        while !pending.is_empty() {
            let mut next_depth = Vec::new();
            for node in pending
                .iter()
                .filter(|n| StepKind::of(&n.payload).is_conditional())
            {
                let follower = take_follower(&mut edges, &node.id);
                next_depth.extend(expand(node, follower.as_deref(), &mut edges));
            }
            created.extend(next_depth.iter().cloned());
            pending = next_depth;
        }

        if !created.is_empty() {
            nodes.append(BRANCHES, created);
        }

        GraphParts { nodes, edges }
    }
}

/// Remove the sequence edge leaving `id` and return its target
fn take_follower(edges: &mut Vec<Edge>, id: &str) -> Option<String> {
    let position = edges.iter().position(|e| e.from == id)?;
    Some(edges.remove(position).to)
}

/// One declared branch of a conditional step
struct Branch<'a> {
    /// Path segment under the conditional's id, e.g. `ifTrue` or `cases[0].steps`
    field: String,
    label: String,
    steps: &'a [Value],
}

impl<'a> Branch<'a> {
    fn new(field: impl Into<String>, label: impl Into<String>, steps: &'a [Value]) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            steps,
        }
    }
}

fn expand(node: &IndexedNode, follower: Option<&str>, edges: &mut Vec<Edge>) -> Vec<IndexedNode> {
    let mut created = Vec::new();
    let mut has_empty_branch = false;

    for branch in branches(&node.payload) {
        let chain: Vec<IndexedNode> = branch
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let payload = normalize_step(step);
                let node_type = StepKind::of(&payload).node_type();
                IndexedNode::new(format!("{}.{}[{}]", node.id, branch.field, i), node_type, payload)
            })
            .collect();

        match (chain.first(), chain.last()) {
            (Some(head), Some(tail)) => {
                edges.push(Edge::labeled(&node.id, &head.id, branch.label));
                for pair in chain.windows(2) {
                    edges.push(Edge::new(&pair[0].id, &pair[1].id));
                }
                if let Some(follower) = follower {
                    edges.push(Edge::new(&tail.id, follower));
                }
            }
            _ => has_empty_branch = true,
        }

        created.extend(chain);
    }

    // Empty branches all fall through the same way; one edge covers them.
    if has_empty_branch {
        if let Some(follower) = follower {
            edges.push(Edge::new(&node.id, follower));
        }
    }

    created
}

fn branches(payload: &Value) -> Vec<Branch<'_>> {
    match StepKind::of(payload) {
        StepKind::IfCondition => vec![
            if_branch(payload, "ifTrue", "actions"),
            if_branch(payload, "ifFalse", "elseActions"),
        ],
        StepKind::SwitchCondition => switch_branches(payload),
        _ => Vec::new(),
    }
}

/// An if branch, read from `primary` or from the later-schema `alias`
fn if_branch<'a>(payload: &'a Value, primary: &'static str, alias: &'static str) -> Branch<'a> {
    let field = if payload.get(primary).is_none() && payload.get(alias).is_some() {
        alias
    } else {
        primary
    };
    Branch::new(field, field, step_list(payload.get(field)))
}

fn switch_branches(payload: &Value) -> Vec<Branch<'_>> {
    let mut result = Vec::new();

    match payload.get("cases") {
        Some(Value::Array(cases)) => {
            for (i, case) in cases.iter().enumerate() {
                let list_field = ["steps", "actions"]
                    .into_iter()
                    .find(|f| case.get(*f).is_some())
                    .unwrap_or("steps");
                let steps = step_list(case.get(list_field));
                let label = match case.get("value") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => format!("cases[{}]", i),
                    Some(other) => other.to_string(),
                };
                result.push(Branch::new(format!("cases[{}].{}", i, list_field), label, steps));
            }
        }
        Some(Value::Object(cases)) => {
            for (key, steps) in cases {
                // Quoted so keys containing `.` or `[` cannot alias other ids
                let field = format!("cases[{}]", Value::String(key.clone()));
                result.push(Branch::new(
                    field,
                    key.clone(),
                    step_list(Some(steps)),
                ));
            }
        }
        _ => {}
    }

    result.push(Branch::new("default", "default", step_list(payload.get("default"))));
    result
}

fn step_list(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
